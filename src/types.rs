multiversx_sc::imports!();
multiversx_sc::derive_imports!();

// ============================================================
// Proposal Status — lifecycle states
// ============================================================

#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, PartialEq, Debug)]
pub enum ProposalStatus {
    /// Landlords can vote, the creator can edit.
    Open,
    /// Due month aggregated into the current settlement period. Frozen.
    Settling,
    /// Removed from the due-date index. Terminal state, kept for audit.
    Reconciled,
}

// ============================================================
// Proposal — a candidate expense shared by every landlord
// ============================================================

#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, Debug)]
pub struct Proposal<M: ManagedTypeApi> {
    pub id: u64,
    pub creator: ManagedAddress<M>,
    pub description: ManagedBuffer<M>,
    pub cost_per_landlord: BigUint<M>,
    pub due_day: u8,
    pub due_month: u8,
    pub due_year: u32,
    /// First instant of the due day, the key in the due-date index
    pub due_timestamp: u64,
    pub created_at: u64,
    pub updated_at: u64,
    pub yes_votes: u32,
    pub no_votes: u32,
    pub status: ProposalStatus,
}

impl<M: ManagedTypeApi> Proposal<M> {
    pub fn is_approved(&self) -> bool {
        self.yes_votes > self.no_votes
    }
}

// ============================================================
// Vote — per-landlord ballot on a proposal
// ============================================================

/// `None` must stay the first variant: an empty storage entry decodes to it.
#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, Copy, PartialEq, Debug)]
pub enum Vote {
    None,
    Yes,
    No,
}

impl Vote {
    pub fn from_bool(in_favor: bool) -> Self {
        if in_favor {
            Vote::Yes
        } else {
            Vote::No
        }
    }
}

// ============================================================
// Queue Entry — one link of the due-date index
// ============================================================

#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, PartialEq, Debug)]
pub struct QueueEntry {
    pub due_timestamp: u64,
    /// Id of the following entry, 0 at the tail
    pub next: u64,
}

// ============================================================
// Settlement Period — the month currently being paid for
// ============================================================

#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, PartialEq, Debug)]
pub enum SettlementStatus {
    /// Pool computed, payments accepted until the target month begins.
    Collecting,
    /// Fulfillment ran. Terminal for this period.
    Reconciled,
}

#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, Debug)]
pub struct SettlementPeriod<M: ManagedTypeApi> {
    pub month: u8,
    pub year: u32,
    /// Sum of the approved proposals' cost per landlord
    pub pool_value: BigUint<M>,
    /// EGLD actually received for this period
    pub collected: BigUint<M>,
    pub status: SettlementStatus,
}

#![no_std]

multiversx_sc::imports!();

pub mod calendar;
pub mod due_date_index;
pub mod errors;
pub mod landlords;
pub mod proposals;
pub mod settlement;
pub mod types;

use errors::ERR_INVALID_PARAMETERS;

// ============================================================
// Contract
// Landlords of a shared property propose future expenses, vote on
// them, and settle the approved ones month by month. Money collected
// for a month that could not be fully funded turns into credit.
// ============================================================

#[multiversx_sc::contract]
pub trait Consortium:
    landlords::LandlordsModule
    + due_date_index::DueDateIndexModule
    + proposals::ProposalsModule
    + settlement::SettlementModule
{
    // ========================================================
    // Init / Upgrade
    // ========================================================

    #[init]
    fn init(&self, landlord_capacity: u32, deposit_amount: BigUint) {
        require!(
            landlord_capacity > 0 && deposit_amount > 0u64,
            ERR_INVALID_PARAMETERS
        );

        self.landlord_capacity().set(landlord_capacity);
        self.deposit_amount().set(&deposit_amount);
        self.proposal_count().set(0u64);
        self.queue_head().set(0u64);
        self.queue_length().set(0u64);
        self.total_spent().set(BigUint::zero());
    }

    #[upgrade]
    fn upgrade(&self) {}

    // ========================================================
    // VIEWS
    // ========================================================

    #[view(getContractConfig)]
    fn get_contract_config(&self) -> MultiValue3<u32, BigUint, u64> {
        let capacity = self.landlord_capacity().get();
        let deposit = self.deposit_amount().get();
        let proposal_count = self.proposal_count().get();
        (capacity, deposit, proposal_count).into()
    }

    #[view(getConsortiumStats)]
    fn get_consortium_stats(&self) -> MultiValue4<usize, u64, BigUint, BigUint> {
        let registered = self.registered_count();
        let queued = self.queue_length().get();
        let spent = self.total_spent().get();
        let balance = self
            .blockchain()
            .get_sc_balance(&EgldOrEsdtTokenIdentifier::egld(), 0);
        (registered, queued, spent, balance).into()
    }
}

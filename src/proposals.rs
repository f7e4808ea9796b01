multiversx_sc::imports!();

use crate::calendar;
use crate::due_date_index;
use crate::errors::{
    ERR_ALREADY_VOTED, ERR_DATE_NOT_IN_FUTURE, ERR_INVALID_DATE, ERR_INVALID_PARAMETERS,
    ERR_NOT_CREATOR, ERR_NO_PRIOR_VOTE, ERR_PROPOSAL_CLOSED, ERR_PROPOSAL_NOT_FOUND,
    ERR_SAME_VOTE,
};
use crate::landlords;
use crate::types::{Proposal, ProposalStatus, Vote};

// ============================================================
// Proposal registry
// Every proposal owns exactly one due-date index entry with the
// same id until it is reconciled.
// ============================================================

#[multiversx_sc::module]
pub trait ProposalsModule:
    landlords::LandlordsModule + due_date_index::DueDateIndexModule
{
    // ========================================================
    // ENDPOINT: createProposal
    // ========================================================

    #[endpoint(createProposal)]
    fn create_proposal(
        &self,
        description: ManagedBuffer,
        cost_per_landlord: BigUint,
        day: u8,
        month: u8,
        year: u32,
    ) -> u64 {
        let caller = self.blockchain().get_caller();
        self.require_registered(&caller);
        require!(
            !description.is_empty() && cost_per_landlord > 0u64,
            ERR_INVALID_PARAMETERS
        );

        let now = self.blockchain().get_block_timestamp();
        let due_timestamp = self.schedulable_due_timestamp(day, month, year, now);

        let proposal_id = self.proposal_count().get() + 1u64;
        let proposal = Proposal {
            id: proposal_id,
            creator: caller.clone(),
            description,
            cost_per_landlord,
            due_day: day,
            due_month: month,
            due_year: year,
            due_timestamp,
            created_at: now,
            updated_at: now,
            yes_votes: 0,
            no_votes: 0,
            status: ProposalStatus::Open,
        };

        self.proposals(proposal_id).set(&proposal);
        self.proposal_count().set(proposal_id);
        self.insert_entry(proposal_id, due_timestamp);

        self.proposal_created_event(
            proposal_id,
            &caller,
            due_timestamp,
            &proposal.cost_per_landlord,
        );

        proposal_id
    }

    // ========================================================
    // ENDPOINT: editProposal
    // Empty description / zero cost keep the current value.
    // A date of 0/0/0 keeps the current due date.
    // ========================================================

    #[endpoint(editProposal)]
    fn edit_proposal(
        &self,
        proposal_id: u64,
        description: ManagedBuffer,
        cost_per_landlord: BigUint,
        day: u8,
        month: u8,
        year: u32,
    ) {
        let caller = self.blockchain().get_caller();
        self.require_registered(&caller);
        let mut proposal = self.require_proposal(proposal_id);
        require!(proposal.creator == caller, ERR_NOT_CREATOR);
        require!(
            proposal.status == ProposalStatus::Open,
            ERR_PROPOSAL_CLOSED
        );
        require!(
            !description.is_empty() || cost_per_landlord > 0u64,
            ERR_INVALID_PARAMETERS
        );

        let now = self.blockchain().get_block_timestamp();

        if !description.is_empty() {
            proposal.description = description;
        }
        if cost_per_landlord > 0u64 {
            proposal.cost_per_landlord = cost_per_landlord;
        }

        let keeps_due_date = day == 0 && month == 0 && year == 0;
        if !keeps_due_date {
            let due_timestamp = self.schedulable_due_timestamp(day, month, year, now);
            if due_timestamp != proposal.due_timestamp {
                self.remove_entry(proposal_id);
                self.insert_entry(proposal_id, due_timestamp);
                proposal.due_timestamp = due_timestamp;
            }
            proposal.due_day = day;
            proposal.due_month = month;
            proposal.due_year = year;
        }

        proposal.updated_at = now;
        self.proposals(proposal_id).set(&proposal);

        self.proposal_edited_event(proposal_id, &caller, now);
    }

    // ========================================================
    // ENDPOINT: vote
    // One vote per landlord per proposal.
    // ========================================================

    #[endpoint(vote)]
    fn vote(&self, proposal_id: u64, in_favor: bool) {
        let caller = self.blockchain().get_caller();
        self.require_registered(&caller);
        let mut proposal = self.require_proposal(proposal_id);
        require!(
            proposal.status == ProposalStatus::Open,
            ERR_PROPOSAL_CLOSED
        );
        require!(
            self.votes(proposal_id, &caller).get() == Vote::None,
            ERR_ALREADY_VOTED
        );

        let ballot = Vote::from_bool(in_favor);
        match ballot {
            Vote::Yes => proposal.yes_votes += 1,
            _ => proposal.no_votes += 1,
        }

        self.votes(proposal_id, &caller).set(ballot);
        self.proposals(proposal_id).set(&proposal);

        self.vote_event(proposal_id, &caller, in_favor);
    }

    // ========================================================
    // ENDPOINT: editVote
    // Moves the landlord's vote to the other bucket; the total
    // number of votes never changes.
    // ========================================================

    #[endpoint(editVote)]
    fn edit_vote(&self, proposal_id: u64, in_favor: bool) {
        let caller = self.blockchain().get_caller();
        self.require_registered(&caller);
        let mut proposal = self.require_proposal(proposal_id);
        require!(
            proposal.status == ProposalStatus::Open,
            ERR_PROPOSAL_CLOSED
        );

        let previous = self.votes(proposal_id, &caller).get();
        require!(previous != Vote::None, ERR_NO_PRIOR_VOTE);
        let ballot = Vote::from_bool(in_favor);
        require!(previous != ballot, ERR_SAME_VOTE);

        if in_favor {
            proposal.no_votes -= 1;
            proposal.yes_votes += 1;
        } else {
            proposal.yes_votes -= 1;
            proposal.no_votes += 1;
        }

        self.votes(proposal_id, &caller).set(ballot);
        self.proposals(proposal_id).set(&proposal);

        self.vote_edited_event(proposal_id, &caller, in_favor);
    }

    // ========================================================
    // INTERNAL
    // ========================================================

    fn require_proposal(&self, proposal_id: u64) -> Proposal<Self::Api> {
        require!(
            proposal_id != 0 && !self.proposals(proposal_id).is_empty(),
            ERR_PROPOSAL_NOT_FOUND
        );
        self.proposals(proposal_id).get()
    }

    /// Resolves the date and checks it lies in a month after the current
    /// one and not before the schedule horizon.
    fn schedulable_due_timestamp(&self, day: u8, month: u8, year: u32, now: u64) -> u64 {
        let Some(due_timestamp) = calendar::due_timestamp(day, month, year) else {
            sc_panic!(ERR_INVALID_DATE);
        };

        let (current_month, current_year) = calendar::decompose(now);
        require!(
            due_timestamp >= calendar::next_month_start(current_month, current_year),
            ERR_DATE_NOT_IN_FUTURE
        );
        require!(
            due_timestamp >= self.schedule_horizon().get(),
            ERR_DATE_NOT_IN_FUTURE
        );

        due_timestamp
    }

    /// Ids due in the month whose yes votes outnumber the no votes.
    fn approved_ids_for_month(&self, month: u8, year: u32) -> ManagedVec<u64> {
        let mut approved = ManagedVec::new();
        for proposal_id in self.ids_due_in(month, year).iter() {
            if self.proposals(proposal_id).get().is_approved() {
                approved.push(proposal_id);
            }
        }
        approved
    }

    // ========================================================
    // VIEWS
    // ========================================================

    #[view(getProposal)]
    fn get_proposal(&self, proposal_id: u64) -> Proposal<Self::Api> {
        self.require_proposal(proposal_id)
    }

    #[view(getProposals)]
    fn get_proposals(&self, from: u64, count: u64) -> MultiValueEncoded<Proposal<Self::Api>> {
        let mut result = MultiValueEncoded::new();
        let total = self.proposal_count().get();
        if count == 0 || total == 0 {
            return result;
        }
        let start = if from == 0 { 1u64 } else { from };
        if start > total {
            return result;
        }
        let end = core::cmp::min(start.saturating_add(count - 1), total);

        for id in start..=end {
            result.push(self.proposals(id).get());
        }
        result
    }

    #[view(getApprovedIdsForMonth)]
    fn get_approved_ids_for_month(&self, month: u8, year: u32) -> MultiValueEncoded<u64> {
        let mut result = MultiValueEncoded::new();
        for proposal_id in self.approved_ids_for_month(month, year).iter() {
            result.push(proposal_id);
        }
        result
    }

    // ========================================================
    // EVENTS
    // ========================================================

    #[event("proposalCreated")]
    fn proposal_created_event(
        &self,
        #[indexed] proposal_id: u64,
        #[indexed] creator: &ManagedAddress,
        #[indexed] due_timestamp: u64,
        cost_per_landlord: &BigUint,
    );

    #[event("proposalEdited")]
    fn proposal_edited_event(
        &self,
        #[indexed] proposal_id: u64,
        #[indexed] creator: &ManagedAddress,
        updated_at: u64,
    );

    #[event("vote")]
    fn vote_event(
        &self,
        #[indexed] proposal_id: u64,
        #[indexed] voter: &ManagedAddress,
        in_favor: bool,
    );

    #[event("voteEdited")]
    fn vote_edited_event(
        &self,
        #[indexed] proposal_id: u64,
        #[indexed] voter: &ManagedAddress,
        in_favor: bool,
    );

    // ========================================================
    // STORAGE
    // ========================================================

    #[view(getProposalCount)]
    #[storage_mapper("proposalCount")]
    fn proposal_count(&self) -> SingleValueMapper<u64>;

    #[storage_mapper("proposals")]
    fn proposals(&self, id: u64) -> SingleValueMapper<Proposal<Self::Api>>;

    #[view(getVote)]
    #[storage_mapper("votes")]
    fn votes(&self, proposal_id: u64, landlord: &ManagedAddress) -> SingleValueMapper<Vote>;
}

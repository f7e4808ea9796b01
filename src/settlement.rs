multiversx_sc::imports!();

use crate::calendar;
use crate::due_date_index;
use crate::errors::{
    ERR_ALREADY_CALCULATED, ERR_ALREADY_PAID, ERR_AMOUNT_MISMATCH, ERR_DUE_MONTH_NOT_STARTED,
    ERR_NOTHING_TO_RECONCILE, ERR_NOT_LAST_DAY_OF_MONTH, ERR_PAYMENT_WINDOW_CLOSED,
};
use crate::landlords;
use crate::proposals;
use crate::types::{ProposalStatus, SettlementPeriod, SettlementStatus};

// ============================================================
// Settlement ledger
// One period at a time: calculated on the last day of a month,
// paid until the target month begins, reconciled afterwards.
// ============================================================

#[multiversx_sc::module]
pub trait SettlementModule:
    landlords::LandlordsModule
    + due_date_index::DueDateIndexModule
    + proposals::ProposalsModule
{
    // ========================================================
    // ENDPOINT: calculateNextMonthExpenses
    // ========================================================

    #[endpoint(calculateNextMonthExpenses)]
    fn calculate_next_month_expenses(&self) -> BigUint {
        let caller = self.blockchain().get_caller();
        self.require_registered(&caller);

        let now = self.blockchain().get_block_timestamp();
        require!(
            calendar::is_last_day_of_month(now),
            ERR_NOT_LAST_DAY_OF_MONTH
        );

        let (current_month, current_year) = calendar::decompose(now);
        let (month, year) = calendar::next_month(current_month, current_year);

        if !self.settlement_period().is_empty() {
            let previous = self.settlement_period().get();
            require!(
                previous.month != month || previous.year != year,
                ERR_ALREADY_CALCULATED
            );
            // Its target month is at most the current one, so it has begun.
            if previous.status == SettlementStatus::Collecting {
                self.reconcile_period(previous);
            }
        }

        let approved = self.approved_ids_for_month(month, year);
        let mut pool_value = BigUint::zero();
        for proposal_id in approved.iter() {
            pool_value += &self.proposals(proposal_id).get().cost_per_landlord;
        }

        for proposal_id in self.ids_due_in(month, year).iter() {
            self.proposals(proposal_id)
                .update(|proposal| proposal.status = ProposalStatus::Settling);
        }

        self.settled_proposals().clear();
        for proposal_id in approved.iter() {
            self.settled_proposals().push(&proposal_id);
        }
        self.period_payers().clear();
        self.schedule_horizon()
            .set(calendar::next_month_start(month, year));

        self.settlement_period().set(SettlementPeriod {
            month,
            year,
            pool_value: pool_value.clone(),
            collected: BigUint::zero(),
            status: SettlementStatus::Collecting,
        });

        self.expenses_calculated_event(month, year, &pool_value);

        pool_value
    }

    // ========================================================
    // ENDPOINT: payNextMonthExpenses
    // The payment must equal the landlord's due amount exactly.
    // ========================================================

    #[endpoint(payNextMonthExpenses)]
    #[payable("EGLD")]
    fn pay_next_month_expenses(&self) {
        let caller = self.blockchain().get_caller();
        let payment_amount = self.call_value().egld_value().clone_value();
        self.require_registered(&caller);

        require!(
            !self.settlement_period().is_empty(),
            ERR_PAYMENT_WINDOW_CLOSED
        );
        let mut period = self.settlement_period().get();
        let now = self.blockchain().get_block_timestamp();
        require!(
            period.status == SettlementStatus::Collecting
                && now < calendar::month_start(period.month, period.year),
            ERR_PAYMENT_WINDOW_CLOSED
        );
        require!(!self.period_payers().contains(&caller), ERR_ALREADY_PAID);

        let amount_due = self.amount_due(&period, &caller);
        require!(payment_amount == amount_due, ERR_AMOUNT_MISMATCH);

        // Whatever the payment does not cover is drawn from credit.
        let consumed_credit = &period.pool_value - &amount_due;
        if consumed_credit > 0u64 {
            self.credit_balance(&caller)
                .update(|credit| *credit -= &consumed_credit);
        }

        self.period_payers().insert(caller.clone());
        period.collected += &payment_amount;
        self.settlement_period().set(&period);

        self.expenses_paid_event(&caller, period.month, period.year, &payment_amount);
    }

    // ========================================================
    // ENDPOINT: tryToFulfillAllProposals
    // Anyone can trigger it once the target month has begun.
    // ========================================================

    #[endpoint(tryToFulfillAllProposals)]
    fn try_to_fulfill_all_proposals(&self) -> bool {
        require!(
            !self.settlement_period().is_empty(),
            ERR_NOTHING_TO_RECONCILE
        );
        let period = self.settlement_period().get();
        require!(
            period.status == SettlementStatus::Collecting,
            ERR_NOTHING_TO_RECONCILE
        );

        let now = self.blockchain().get_block_timestamp();
        require!(
            now >= calendar::month_start(period.month, period.year),
            ERR_DUE_MONTH_NOT_STARTED
        );

        self.reconcile_period(period)
    }

    // ========================================================
    // INTERNAL: reconciliation
    // ========================================================

    /// Credits payers when the pool was not fully funded, then drains every
    /// index entry due before the end of the period's month. Returns whether
    /// the period was fully funded.
    fn reconcile_period(&self, mut period: SettlementPeriod<Self::Api>) -> bool {
        let fully_funded = self.is_fully_funded();

        if !fully_funded {
            for proposal_id in self.settled_proposals().iter() {
                let cost = self.proposals(proposal_id).get().cost_per_landlord;
                for payer in self.period_payers().iter() {
                    self.credit_balance(&payer).update(|credit| *credit += &cost);
                }
            }
        }

        // Also sweeps stale entries of earlier months that were never settled.
        let period_end = calendar::next_month_start(period.month, period.year);
        loop {
            let head = self.queue_head().get();
            if head == 0 || self.queue_entries(head).get().due_timestamp >= period_end {
                break;
            }
            self.remove_entry(head);
            self.proposals(head)
                .update(|proposal| proposal.status = ProposalStatus::Reconciled);
            self.proposal_reconciled_event(head, fully_funded);
        }

        if fully_funded {
            let spent = &period.pool_value * (self.period_payers().len() as u64);
            self.total_spent().update(|total| *total += &spent);
        }

        period.status = SettlementStatus::Reconciled;
        self.settlement_period().set(&period);

        self.period_reconciled_event(period.month, period.year, fully_funded);

        fully_funded
    }

    /// Every registered landlord paid, and there is at least one.
    fn is_fully_funded(&self) -> bool {
        let registered = self.registered_landlords();
        if registered.is_empty() {
            return false;
        }
        registered
            .iter()
            .all(|landlord| self.period_payers().contains(&landlord))
    }

    /// max(0, pool value - credit) while the period collects payments.
    fn amount_due(
        &self,
        period: &SettlementPeriod<Self::Api>,
        landlord: &ManagedAddress,
    ) -> BigUint {
        if period.status != SettlementStatus::Collecting {
            return BigUint::zero();
        }
        let credit = self.credit_balance(landlord).get();
        if period.pool_value > credit {
            &period.pool_value - &credit
        } else {
            BigUint::zero()
        }
    }

    // ========================================================
    // VIEWS
    // ========================================================

    #[view(myNextMonthExpenses)]
    fn my_next_month_expenses(&self, landlord: ManagedAddress) -> BigUint {
        self.require_registered(&landlord);
        if self.settlement_period().is_empty() {
            return BigUint::zero();
        }
        self.amount_due(&self.settlement_period().get(), &landlord)
    }

    #[view(hasPaid)]
    fn has_paid(&self, landlord: ManagedAddress) -> bool {
        self.period_payers().contains(&landlord)
    }

    #[view(getSettledProposals)]
    fn get_settled_proposals(&self) -> MultiValueEncoded<u64> {
        let mut result = MultiValueEncoded::new();
        for proposal_id in self.settled_proposals().iter() {
            result.push(proposal_id);
        }
        result
    }

    // ========================================================
    // EVENTS
    // ========================================================

    #[event("expensesCalculated")]
    fn expenses_calculated_event(
        &self,
        #[indexed] month: u8,
        #[indexed] year: u32,
        pool_value: &BigUint,
    );

    #[event("expensesPaid")]
    fn expenses_paid_event(
        &self,
        #[indexed] landlord: &ManagedAddress,
        #[indexed] month: u8,
        #[indexed] year: u32,
        amount: &BigUint,
    );

    #[event("proposalReconciled")]
    fn proposal_reconciled_event(&self, #[indexed] proposal_id: u64, fully_funded: bool);

    #[event("periodReconciled")]
    fn period_reconciled_event(
        &self,
        #[indexed] month: u8,
        #[indexed] year: u32,
        fully_funded: bool,
    );

    // ========================================================
    // STORAGE
    // ========================================================

    #[view(getSettlementPeriod)]
    #[storage_mapper("settlementPeriod")]
    fn settlement_period(&self) -> SingleValueMapper<SettlementPeriod<Self::Api>>;

    /// Approved proposals aggregated into the current pool value
    #[storage_mapper("settledProposals")]
    fn settled_proposals(&self) -> VecMapper<u64>;

    #[storage_mapper("periodPayers")]
    fn period_payers(&self) -> UnorderedSetMapper<ManagedAddress>;

    #[view(getTotalSpent)]
    #[storage_mapper("totalSpent")]
    fn total_spent(&self) -> SingleValueMapper<BigUint>;
}

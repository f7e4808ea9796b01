multiversx_sc::imports!();

use crate::errors::{
    ERR_ALREADY_DEPOSITED, ERR_ALREADY_REGISTERED, ERR_AMOUNT_MISMATCH, ERR_NEVER_INVITED,
    ERR_NOTHING_TO_CLAIM, ERR_NOT_IN_ROSTER, ERR_NOT_OWNER, ERR_NOT_REGISTERED,
    ERR_NOT_REPLACED_LANDLORD, ERR_ROSTER_FULL, ERR_STILL_REGISTERED,
};

// ============================================================
// Landlord roster
// Fixed capacity. A landlord is registered once it holds a slot
// AND has paid the guarantee deposit.
// ============================================================

#[multiversx_sc::module]
pub trait LandlordsModule {
    // ========================================================
    // ENDPOINT: registerLandlord
    // Owner invites an address into the next free slot.
    // ========================================================

    #[endpoint(registerLandlord)]
    fn register_landlord(&self, landlord: ManagedAddress) {
        let caller = self.blockchain().get_caller();
        require!(
            caller == self.blockchain().get_owner_address(),
            ERR_NOT_OWNER
        );
        require!(
            self.landlord_slot(&landlord).is_empty(),
            ERR_ALREADY_REGISTERED
        );
        require!(
            self.landlords().len() < self.landlord_capacity().get() as usize,
            ERR_ROSTER_FULL
        );

        self.landlords().push(&landlord);
        let slot = self.landlords().len();
        self.landlord_slot(&landlord).set(slot);
        self.invited(&landlord).set(true);

        self.landlord_registered_event(&landlord, slot);
    }

    // ========================================================
    // ENDPOINT: depositGuarantee
    // Completes registration of an invited landlord.
    // ========================================================

    #[endpoint(depositGuarantee)]
    #[payable("EGLD")]
    fn deposit_guarantee(&self) {
        let caller = self.blockchain().get_caller();
        let payment_amount = self.call_value().egld_value().clone_value();

        require!(!self.landlord_slot(&caller).is_empty(), ERR_NOT_IN_ROSTER);
        require!(self.deposits(&caller).is_empty(), ERR_ALREADY_DEPOSITED);
        require!(
            payment_amount == self.deposit_amount().get(),
            ERR_AMOUNT_MISMATCH
        );

        self.deposits(&caller).set(&payment_amount);
        self.guarantee_deposited_event(&caller, &payment_amount);
    }

    // ========================================================
    // ENDPOINT: replaceLandlord
    // The outgoing landlord hands its slot over. The newcomer must
    // deposit before being registered; the outgoing one can then claim.
    // ========================================================

    #[endpoint(replaceLandlord)]
    fn replace_landlord(&self, old_landlord: ManagedAddress, new_landlord: ManagedAddress) {
        let caller = self.blockchain().get_caller();
        require!(caller == old_landlord, ERR_NOT_REPLACED_LANDLORD);
        require!(
            !self.landlord_slot(&old_landlord).is_empty(),
            ERR_NOT_IN_ROSTER
        );
        require!(
            self.landlord_slot(&new_landlord).is_empty(),
            ERR_ALREADY_REGISTERED
        );

        let slot = self.landlord_slot(&old_landlord).take();
        self.landlords().set(slot, &new_landlord);
        self.landlord_slot(&new_landlord).set(slot);
        self.invited(&new_landlord).set(true);

        self.landlord_replaced_event(&old_landlord, &new_landlord, slot);
    }

    // ========================================================
    // ENDPOINT: getDepositAndExtraBalance
    // A replaced landlord withdraws its deposit plus standing credit.
    // ========================================================

    #[endpoint(getDepositAndExtraBalance)]
    fn get_deposit_and_extra_balance(&self) -> BigUint {
        let caller = self.blockchain().get_caller();
        require!(self.invited(&caller).get(), ERR_NEVER_INVITED);
        require!(
            self.landlord_slot(&caller).is_empty(),
            ERR_STILL_REGISTERED
        );

        let payout = self.deposits(&caller).take() + self.credit_balance(&caller).take();
        require!(payout > 0u64, ERR_NOTHING_TO_CLAIM);

        self.send().direct_egld(&caller, &payout);
        self.balance_claimed_event(&caller, &payout);

        payout
    }

    // ========================================================
    // INTERNAL: roster queries used by proposals and settlement
    // ========================================================

    fn is_registered(&self, address: &ManagedAddress) -> bool {
        !self.landlord_slot(address).is_empty() && !self.deposits(address).is_empty()
    }

    fn require_registered(&self, address: &ManagedAddress) {
        require!(self.is_registered(address), ERR_NOT_REGISTERED);
    }

    fn registered_landlords(&self) -> ManagedVec<ManagedAddress> {
        let mut result = ManagedVec::new();
        for landlord in self.landlords().iter() {
            if self.is_registered(&landlord) {
                result.push(landlord);
            }
        }
        result
    }

    // ========================================================
    // VIEWS
    // ========================================================

    #[view(isRegistered)]
    fn is_registered_view(&self, address: ManagedAddress) -> bool {
        self.is_registered(&address)
    }

    #[view(getRegisteredCount)]
    fn registered_count(&self) -> usize {
        self.registered_landlords().len()
    }

    #[view(getLandlords)]
    fn get_landlords(&self) -> MultiValueEncoded<ManagedAddress> {
        let mut result = MultiValueEncoded::new();
        for landlord in self.landlords().iter() {
            result.push(landlord);
        }
        result
    }

    // ========================================================
    // EVENTS
    // ========================================================

    #[event("landlordRegistered")]
    fn landlord_registered_event(&self, #[indexed] landlord: &ManagedAddress, slot: usize);

    #[event("guaranteeDeposited")]
    fn guarantee_deposited_event(&self, #[indexed] landlord: &ManagedAddress, amount: &BigUint);

    #[event("landlordReplaced")]
    fn landlord_replaced_event(
        &self,
        #[indexed] old_landlord: &ManagedAddress,
        #[indexed] new_landlord: &ManagedAddress,
        slot: usize,
    );

    #[event("balanceClaimed")]
    fn balance_claimed_event(&self, #[indexed] landlord: &ManagedAddress, amount: &BigUint);

    // ========================================================
    // STORAGE
    // ========================================================

    // ── Configuration ──

    #[view(getLandlordCapacity)]
    #[storage_mapper("landlordCapacity")]
    fn landlord_capacity(&self) -> SingleValueMapper<u32>;

    #[view(getDepositAmount)]
    #[storage_mapper("depositAmount")]
    fn deposit_amount(&self) -> SingleValueMapper<BigUint>;

    // ── Roster ──

    #[storage_mapper("landlords")]
    fn landlords(&self) -> VecMapper<ManagedAddress>;

    /// 1-based position in `landlords`; empty when the address holds no slot
    #[view(getLandlordSlot)]
    #[storage_mapper("landlordSlot")]
    fn landlord_slot(&self, landlord: &ManagedAddress) -> SingleValueMapper<usize>;

    #[storage_mapper("invited")]
    fn invited(&self, landlord: &ManagedAddress) -> SingleValueMapper<bool>;

    // ── Balances ──

    #[view(getDeposit)]
    #[storage_mapper("deposits")]
    fn deposits(&self, landlord: &ManagedAddress) -> SingleValueMapper<BigUint>;

    #[view(getCreditBalance)]
    #[storage_mapper("creditBalance")]
    fn credit_balance(&self, landlord: &ManagedAddress) -> SingleValueMapper<BigUint>;
}

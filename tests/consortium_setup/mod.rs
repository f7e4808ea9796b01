#![allow(dead_code)]

use consortium::{
    landlords::LandlordsModule, proposals::ProposalsModule, settlement::SettlementModule,
    Consortium,
};
use multiversx_sc::types::Address;
use multiversx_sc_scenario::{
    api::DebugApi, managed_address, managed_biguint, managed_buffer, rust_biguint,
    whitebox_legacy::*,
};

pub const WASM_PATH: &str = "output/consortium.wasm";
pub const CAPACITY: u32 = 3;
pub const DEPOSIT: u64 = 100;
pub const STARTING_BALANCE: u64 = 1_000;

pub type ConsortiumObj = consortium::ContractObj<DebugApi>;

pub fn timestamp(day: u8, month: u8, year: u32) -> u64 {
    consortium::calendar::due_timestamp(day, month, year).unwrap()
}

pub struct ConsortiumSetup<Builder>
where
    Builder: 'static + Copy + Fn() -> ConsortiumObj,
{
    pub b_mock: BlockchainStateWrapper,
    pub owner: Address,
    /// Four funded accounts; the first `CAPACITY` are registered by `new`
    pub landlords: Vec<Address>,
    pub outsider: Address,
    pub sc_wrapper: ContractObjWrapper<ConsortiumObj, Builder>,
}

impl<Builder> ConsortiumSetup<Builder>
where
    Builder: 'static + Copy + Fn() -> ConsortiumObj,
{
    /// Deployed contract with an empty roster, clock at 2024-01-10.
    pub fn deploy(builder: Builder) -> Self {
        let rust_zero = rust_biguint!(0);
        let mut b_mock = BlockchainStateWrapper::new();
        let owner = b_mock.create_user_account(&rust_zero);
        let landlords = (0..4)
            .map(|_| b_mock.create_user_account(&rust_biguint!(STARTING_BALANCE)))
            .collect();
        let outsider = b_mock.create_user_account(&rust_biguint!(STARTING_BALANCE));
        let sc_wrapper = b_mock.create_sc_account(&rust_zero, Some(&owner), builder, WASM_PATH);

        b_mock
            .execute_tx(&owner, &sc_wrapper, &rust_zero, |sc| {
                sc.init(CAPACITY, managed_biguint!(DEPOSIT));
            })
            .assert_ok();
        b_mock.set_block_timestamp(timestamp(10, 1, 2024));

        ConsortiumSetup {
            b_mock,
            owner,
            landlords,
            outsider,
            sc_wrapper,
        }
    }

    /// Deployed contract with three registered landlords.
    pub fn new(builder: Builder) -> Self {
        let mut setup = Self::deploy(builder);
        for index in 0..CAPACITY as usize {
            let landlord = setup.landlords[index].clone();
            setup.register(&landlord).assert_ok();
            setup.deposit(&landlord, DEPOSIT).assert_ok();
        }
        setup
    }

    pub fn landlord(&self, index: usize) -> Address {
        self.landlords[index].clone()
    }

    pub fn set_date(&mut self, day: u8, month: u8, year: u32) {
        self.b_mock.set_block_timestamp(timestamp(day, month, year));
    }

    // ── Roster ──

    pub fn register(&mut self, landlord: &Address) -> TxResult {
        let owner = self.owner.clone();
        self.register_as(&owner, landlord)
    }

    pub fn register_as(&mut self, caller: &Address, landlord: &Address) -> TxResult {
        self.b_mock
            .execute_tx(caller, &self.sc_wrapper, &rust_biguint!(0), |sc| {
                sc.register_landlord(managed_address!(landlord));
            })
    }

    pub fn deposit(&mut self, landlord: &Address, amount: u64) -> TxResult {
        self.b_mock
            .execute_tx(landlord, &self.sc_wrapper, &rust_biguint!(amount), |sc| {
                sc.deposit_guarantee();
            })
    }

    pub fn replace(&mut self, caller: &Address, old: &Address, new: &Address) -> TxResult {
        self.b_mock
            .execute_tx(caller, &self.sc_wrapper, &rust_biguint!(0), |sc| {
                sc.replace_landlord(managed_address!(old), managed_address!(new));
            })
    }

    pub fn claim(&mut self, caller: &Address) -> TxResult {
        self.b_mock
            .execute_tx(caller, &self.sc_wrapper, &rust_biguint!(0), |sc| {
                sc.get_deposit_and_extra_balance();
            })
    }

    pub fn is_registered(&mut self, address: &Address) -> bool {
        let mut registered = false;
        self.b_mock
            .execute_query(&self.sc_wrapper, |sc| {
                registered = sc.is_registered_view(managed_address!(address));
            })
            .assert_ok();
        registered
    }

    pub fn credit_of(&mut self, address: &Address) -> u64 {
        let mut credit = 0u64;
        self.b_mock
            .execute_query(&self.sc_wrapper, |sc| {
                credit = sc
                    .credit_balance(&managed_address!(address))
                    .get()
                    .to_u64()
                    .unwrap();
            })
            .assert_ok();
        credit
    }

    // ── Proposals ──

    pub fn create_proposal(
        &mut self,
        creator: &Address,
        description: &[u8],
        cost: u64,
        (day, month, year): (u8, u8, u32),
    ) -> TxResult {
        self.b_mock
            .execute_tx(creator, &self.sc_wrapper, &rust_biguint!(0), |sc| {
                sc.create_proposal(
                    managed_buffer!(description),
                    managed_biguint!(cost),
                    day,
                    month,
                    year,
                );
            })
    }

    pub fn edit_proposal(
        &mut self,
        creator: &Address,
        proposal_id: u64,
        description: &[u8],
        cost: u64,
        (day, month, year): (u8, u8, u32),
    ) -> TxResult {
        self.b_mock
            .execute_tx(creator, &self.sc_wrapper, &rust_biguint!(0), |sc| {
                sc.edit_proposal(
                    proposal_id,
                    managed_buffer!(description),
                    managed_biguint!(cost),
                    day,
                    month,
                    year,
                );
            })
    }

    pub fn vote(&mut self, voter: &Address, proposal_id: u64, in_favor: bool) -> TxResult {
        self.b_mock
            .execute_tx(voter, &self.sc_wrapper, &rust_biguint!(0), |sc| {
                sc.vote(proposal_id, in_favor);
            })
    }

    pub fn edit_vote(&mut self, voter: &Address, proposal_id: u64, in_favor: bool) -> TxResult {
        self.b_mock
            .execute_tx(voter, &self.sc_wrapper, &rust_biguint!(0), |sc| {
                sc.edit_vote(proposal_id, in_favor);
            })
    }

    /// (yes, no) tally of a proposal.
    pub fn tally(&mut self, proposal_id: u64) -> (u32, u32) {
        let mut tally = (0, 0);
        self.b_mock
            .execute_query(&self.sc_wrapper, |sc| {
                let proposal = sc.get_proposal(proposal_id);
                tally = (proposal.yes_votes, proposal.no_votes);
            })
            .assert_ok();
        tally
    }

    // ── Settlement ──

    pub fn calculate(&mut self, caller: &Address) -> TxResult {
        self.b_mock
            .execute_tx(caller, &self.sc_wrapper, &rust_biguint!(0), |sc| {
                sc.calculate_next_month_expenses();
            })
    }

    pub fn pay(&mut self, payer: &Address, amount: u64) -> TxResult {
        self.b_mock
            .execute_tx(payer, &self.sc_wrapper, &rust_biguint!(amount), |sc| {
                sc.pay_next_month_expenses();
            })
    }

    pub fn fulfill(&mut self, caller: &Address) -> TxResult {
        self.b_mock
            .execute_tx(caller, &self.sc_wrapper, &rust_biguint!(0), |sc| {
                sc.try_to_fulfill_all_proposals();
            })
    }

    pub fn amount_due(&mut self, landlord: &Address) -> u64 {
        let mut due = 0u64;
        self.b_mock
            .execute_query(&self.sc_wrapper, |sc| {
                due = sc
                    .my_next_month_expenses(managed_address!(landlord))
                    .to_u64()
                    .unwrap();
            })
            .assert_ok();
        due
    }

    /// Creates a proposal from landlord 0 and has all three landlords vote.
    pub fn approved_proposal(&mut self, cost: u64, due: (u8, u8, u32), votes: [bool; 3]) {
        let creator = self.landlord(0);
        self.create_proposal(&creator, b"Shared expense", cost, due)
            .assert_ok();
        let mut proposal_id = 0u64;
        self.b_mock
            .execute_query(&self.sc_wrapper, |sc| {
                proposal_id = sc.proposal_count().get();
            })
            .assert_ok();
        for (index, in_favor) in votes.iter().enumerate() {
            let voter = self.landlord(index);
            self.vote(&voter, proposal_id, *in_favor).assert_ok();
        }
    }
}

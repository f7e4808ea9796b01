// ============================================================
// Error messages
// Every failure aborts the transaction and reverts its writes.
// ============================================================

// ── Input ──

pub const ERR_INVALID_PARAMETERS: &str = "All parameters must be not null";
pub const ERR_INVALID_DATE: &str = "Invalid calendar date";
pub const ERR_INVALID_MONTH: &str = "Month must be between 1 and 12";
pub const ERR_DATE_NOT_IN_FUTURE: &str = "Due date must fall after the current month";

// ── Lookup ──

pub const ERR_PROPOSAL_NOT_FOUND: &str = "Proposal does not exist";
pub const ERR_ENTRY_NOT_FOUND: &str = "Node is not in queue";
pub const ERR_ENTRY_ALREADY_QUEUED: &str = "Node is already in queue";
pub const ERR_OUT_OF_BOUNDS: &str = "Position out of bounds";

// ── Authorization ──

pub const ERR_NOT_OWNER: &str = "Only the owner can call this function";
pub const ERR_NOT_REGISTERED: &str = "Only registered landlords can call this function";
pub const ERR_NOT_CREATOR: &str = "Only the proposal creator can edit it";
pub const ERR_NOT_REPLACED_LANDLORD: &str =
    "Only the landlord to be replaced can call this function";
pub const ERR_NOT_IN_ROSTER: &str = "Address does not hold a landlord slot";
pub const ERR_NEVER_INVITED: &str = "Address was never invited as landlord";

// ── Roster ──

pub const ERR_ALREADY_REGISTERED: &str = "Landlord is already registered";
pub const ERR_ROSTER_FULL: &str = "There are already enough landlords registered";
pub const ERR_ALREADY_DEPOSITED: &str = "Guarantee deposit already paid";
pub const ERR_STILL_REGISTERED: &str = "Landlord still holds a roster slot";
pub const ERR_NOTHING_TO_CLAIM: &str = "Nothing to claim";

// ── Voting ──

pub const ERR_ALREADY_VOTED: &str = "Landlord has already voted that proposal";
pub const ERR_NO_PRIOR_VOTE: &str = "Landlord has not voted that proposal";
pub const ERR_SAME_VOTE: &str = "New vote equals the current vote";
pub const ERR_PROPOSAL_CLOSED: &str = "Proposal is no longer open";

// ── Settlement ──

pub const ERR_NOT_LAST_DAY_OF_MONTH: &str =
    "Expenses can only be calculated on the last day of the month";
pub const ERR_PAYMENT_WINDOW_CLOSED: &str = "No settlement period open for payment";
pub const ERR_NOTHING_TO_RECONCILE: &str = "No settlement period awaiting reconciliation";
pub const ERR_DUE_MONTH_NOT_STARTED: &str = "Settlement month has not started yet";
pub const ERR_ALREADY_CALCULATED: &str = "Next month expenses already calculated";
pub const ERR_ALREADY_PAID: &str = "Landlord has already paid this period";
pub const ERR_AMOUNT_MISMATCH: &str = "Payment does not match the amount due";

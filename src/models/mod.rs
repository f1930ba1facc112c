pub mod earning;
pub mod payout;
pub mod transaction;
pub mod vendor;

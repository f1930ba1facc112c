pub mod commission;
pub mod gateway;
pub mod initiator;
pub mod onboarding;
pub mod payout_schedule;
pub mod reconciler;
pub mod store;
pub mod vendor_directory;

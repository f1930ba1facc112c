pub mod payments;
pub mod vendors;

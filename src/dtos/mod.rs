pub mod payment_dtos;
pub mod vendor_dtos;

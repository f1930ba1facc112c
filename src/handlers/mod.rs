pub(crate) mod payment_handlers;
pub(crate) mod vendor_handlers;

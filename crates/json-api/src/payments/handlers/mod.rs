//! Payment Handlers

pub(crate) mod confirm;
pub(crate) mod initiate;
pub(crate) mod status;

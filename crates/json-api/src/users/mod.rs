//! Users

mod errors;
mod handlers;
mod models;

pub(crate) use handlers::*;

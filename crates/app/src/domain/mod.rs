//! Storefront Domain Concerns

pub mod addresses;
pub mod carts;
pub mod orders;
pub mod payments;
pub mod products;
pub mod users;

//! Cart Data

use crate::domain::products::records::ProductUuid;

/// New Cart Item Data
///
/// Adding a product that is already in the cart increments its quantity.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCartItem {
    pub product_uuid: ProductUuid,
    pub quantity: i32,
}

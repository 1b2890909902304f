//! Order Data

use crate::domain::{addresses::records::AddressUuid, carts::records::CartItemUuid};

/// Checkout request: which cart lines to buy and where to ship them.
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrder {
    pub address_uuid: AddressUuid,
    pub cart_item_uuids: Vec<CartItemUuid>,
    pub remarks: Option<String>,
}

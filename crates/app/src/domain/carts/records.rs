//! Cart Records

use jiff::Timestamp;
use rust_decimal::Decimal;

use crate::{domain::products::records::ProductUuid, money, uuids::TypedUuid};

/// Cart Item UUID
pub type CartItemUuid = TypedUuid<CartItemRecord>;

/// Cart item joined with the product's current catalog data.
#[derive(Debug, Clone)]
pub struct CartItemRecord {
    pub uuid: CartItemUuid,
    pub product_uuid: ProductUuid,
    pub product_name: String,
    pub product_image: String,
    pub price: Decimal,
    pub quantity: u32,

    /// `price * quantity`, derived on read and never stored.
    pub subtotal: Decimal,

    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A user's cart with derived totals.
#[derive(Debug, Clone)]
pub struct Cart {
    pub items: Vec<CartItemRecord>,
    pub total_items: u64,
    pub total_amount: Decimal,
}

impl Cart {
    #[must_use]
    pub fn from_items(items: Vec<CartItemRecord>) -> Self {
        let total_items = items.iter().map(|item| u64::from(item.quantity)).sum();
        let total_amount = money::sum(items.iter().map(|item| item.subtotal));

        Self {
            items,
            total_items,
            total_amount,
        }
    }
}

/// Result of adding a product to the cart.
#[derive(Debug, Clone)]
pub struct AddedCartItem {
    pub item: CartItemRecord,

    /// `false` when an existing line was incremented.
    pub created: bool,
}

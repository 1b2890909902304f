//! Cart Models

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::carts::records::{Cart, CartItemRecord};

/// Cart Item Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartItemResponse {
    /// The unique identifier of the cart item
    pub uuid: Uuid,

    pub product_uuid: Uuid,

    /// Current product name
    pub product_name: String,

    /// Current product image URL
    pub product_image: String,

    /// Current unit price, as a decimal string
    pub price: String,

    pub quantity: u32,

    /// `price * quantity`, as a decimal string
    pub subtotal: String,

    pub created_at: String,

    pub updated_at: String,
}

impl From<CartItemRecord> for CartItemResponse {
    fn from(item: CartItemRecord) -> Self {
        Self {
            uuid: item.uuid.into_uuid(),
            product_uuid: item.product_uuid.into_uuid(),
            product_name: item.product_name,
            product_image: item.product_image,
            price: item.price.to_string(),
            quantity: item.quantity,
            subtotal: item.subtotal.to_string(),
            created_at: item.created_at.to_string(),
            updated_at: item.updated_at.to_string(),
        }
    }
}

/// Cart Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartResponse {
    pub items: Vec<CartItemResponse>,

    /// Sum of quantities across all lines
    pub total_items: u64,

    /// Sum of line subtotals, as a decimal string
    pub total_amount: String,
}

impl From<Cart> for CartResponse {
    fn from(cart: Cart) -> Self {
        Self {
            items: cart.items.into_iter().map(CartItemResponse::from).collect(),
            total_items: cart.total_items,
            total_amount: cart.total_amount.to_string(),
        }
    }
}

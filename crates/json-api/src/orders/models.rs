//! Order Models

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::orders::records::{
    OrderItemRecord, OrderRecord, OrderStatus, ShippingAddress,
};

/// Order Item Response
///
/// Product details as they were when the order was placed.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderItemResponse {
    pub uuid: Uuid,
    pub product_uuid: Uuid,
    pub product_name: String,
    pub product_image: String,
    pub price: String,
    pub quantity: u32,
    pub subtotal: String,
}

impl From<OrderItemRecord> for OrderItemResponse {
    fn from(item: OrderItemRecord) -> Self {
        Self {
            uuid: item.uuid.into_uuid(),
            product_uuid: item.product_uuid.into_uuid(),
            product_name: item.product_name,
            product_image: item.product_image,
            price: item.price.to_string(),
            quantity: item.quantity,
            subtotal: item.subtotal.to_string(),
        }
    }
}

/// Shipping Address Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ShippingAddressResponse {
    pub receiver_name: String,
    pub receiver_phone: String,
    pub province: String,
    pub city: String,
    pub district: String,
    pub detail: String,
    pub postal_code: Option<String>,
}

impl From<ShippingAddress> for ShippingAddressResponse {
    fn from(address: ShippingAddress) -> Self {
        Self {
            receiver_name: address.receiver_name,
            receiver_phone: address.receiver_phone,
            province: address.province,
            city: address.city,
            district: address.district,
            detail: address.detail,
            postal_code: address.postal_code,
        }
    }
}

/// Order Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderResponse {
    /// The unique identifier of the order
    pub uuid: Uuid,

    /// Human-readable order number
    pub order_no: String,

    pub address_uuid: Uuid,

    /// Where the order is delivered
    pub address: ShippingAddressResponse,

    /// Sum of item subtotals when the order was placed
    pub total_amount: String,

    pub discount_amount: String,

    pub shipping_fee: String,

    /// Amount the customer owes
    pub actual_amount: String,

    /// One of `pending`, `paid`, `shipped`, `completed` or `cancelled`
    #[salvo(schema(value_type = String))]
    pub status: OrderStatus,

    /// Customer-facing status name
    pub status_display: String,

    pub remarks: Option<String>,

    pub paid_at: Option<String>,

    pub shipped_at: Option<String>,

    pub completed_at: Option<String>,

    pub cancelled_at: Option<String>,

    pub created_at: String,

    pub updated_at: String,

    pub items: Vec<OrderItemResponse>,
}

impl From<OrderRecord> for OrderResponse {
    fn from(order: OrderRecord) -> Self {
        Self {
            uuid: order.uuid.into_uuid(),
            order_no: order.order_no,
            address_uuid: order.address_uuid.into_uuid(),
            address: order.shipping_address.into(),
            total_amount: order.total_amount.to_string(),
            discount_amount: order.discount_amount.to_string(),
            shipping_fee: order.shipping_fee.to_string(),
            actual_amount: order.actual_amount.to_string(),
            status: order.status,
            status_display: order.status.label().to_string(),
            remarks: order.remarks,
            paid_at: order.paid_at.as_ref().map(ToString::to_string),
            shipped_at: order.shipped_at.as_ref().map(ToString::to_string),
            completed_at: order.completed_at.as_ref().map(ToString::to_string),
            cancelled_at: order.cancelled_at.as_ref().map(ToString::to_string),
            created_at: order.created_at.to_string(),
            updated_at: order.updated_at.to_string(),
            items: order.items.into_iter().map(OrderItemResponse::from).collect(),
        }
    }
}

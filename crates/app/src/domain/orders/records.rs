//! Order Records

use std::fmt;

use jiff::Timestamp;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{
    domain::{
        addresses::records::AddressUuid, products::records::ProductUuid,
        users::records::UserUuid,
    },
    uuids::TypedUuid,
};

/// Order UUID
pub type OrderUuid = TypedUuid<OrderRecord>;

/// Order Item UUID
pub type OrderItemUuid = TypedUuid<OrderItemRecord>;

/// Lifecycle of an order.
///
/// ```text
/// pending ──▶ paid ──▶ shipped ──▶ completed
///    │
///    └──▶ cancelled
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "order_status", rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Paid,
    Shipped,
    Completed,
    Cancelled,
}

impl OrderStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Paid => "paid",
            Self::Shipped => "shipped",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    /// Whether the state machine allows moving from `self` to `next`.
    #[must_use]
    pub const fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Paid | Self::Cancelled)
                | (Self::Paid, Self::Shipped)
                | (Self::Shipped, Self::Completed)
        )
    }

    /// Customer-facing name of the status.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "待支付",
            Self::Paid => "已支付",
            Self::Shipped => "已发货",
            Self::Completed => "已完成",
            Self::Cancelled => "已取消",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Order Record
///
/// Amounts are fixed when the order is placed and never recomputed.
#[derive(Debug, Clone)]
pub struct OrderRecord {
    pub uuid: OrderUuid,
    pub user_uuid: UserUuid,
    pub order_no: String,
    pub address_uuid: AddressUuid,
    pub shipping_address: ShippingAddress,
    pub total_amount: Decimal,
    pub discount_amount: Decimal,
    pub shipping_fee: Decimal,
    pub actual_amount: Decimal,
    pub status: OrderStatus,
    pub remarks: Option<String>,
    pub paid_at: Option<Timestamp>,
    pub shipped_at: Option<Timestamp>,
    pub completed_at: Option<Timestamp>,
    pub cancelled_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub items: Vec<OrderItemRecord>,
}

/// Shipping address an order is delivered to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShippingAddress {
    pub receiver_name: String,
    pub receiver_phone: String,
    pub province: String,
    pub city: String,
    pub district: String,
    pub detail: String,
    pub postal_code: Option<String>,
}

/// Order Item Record
///
/// Snapshot of the product at the time the order was placed.
#[derive(Debug, Clone)]
pub struct OrderItemRecord {
    pub uuid: OrderItemUuid,
    pub order_uuid: OrderUuid,
    pub product_uuid: ProductUuid,
    pub product_name: String,
    pub product_image: String,
    pub price: Decimal,
    pub quantity: u32,
    pub subtotal: Decimal,
}

//! Payment Records

use std::{fmt, str::FromStr};

use jiff::Timestamp;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::orders::records::{OrderStatus, OrderUuid};

/// How the customer claims to have paid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    #[default]
    Alipay,
    Wechat,
    Card,
}

impl PaymentMethod {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Alipay => "alipay",
            Self::Wechat => "wechat",
            Self::Card => "card",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown payment method name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown payment method `{0}`")]
pub struct UnknownPaymentMethod(pub String);

impl FromStr for PaymentMethod {
    type Err = UnknownPaymentMethod;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "alipay" => Ok(Self::Alipay),
            "wechat" => Ok(Self::Wechat),
            "card" => Ok(Self::Card),
            other => Err(UnknownPaymentMethod(other.to_string())),
        }
    }
}

/// Payment identifier handed to the client before it pays. Not persisted.
#[derive(Debug, Clone)]
pub struct PaymentIntent {
    pub payment_no: String,
    pub order_uuid: OrderUuid,
    pub order_no: String,
    pub amount: Decimal,
    pub status: OrderStatus,
    pub created_at: Timestamp,
}

/// Outcome of a confirmed payment.
#[derive(Debug, Clone)]
pub struct PaymentReceipt {
    pub order_uuid: OrderUuid,
    pub order_no: String,
    pub amount: Decimal,
    pub status: OrderStatus,
    pub method: PaymentMethod,
    pub paid_at: Option<Timestamp>,
}

/// Payment view of an order.
#[derive(Debug, Clone)]
pub struct PaymentStatus {
    pub order_uuid: OrderUuid,
    pub order_no: String,
    pub status: OrderStatus,
    pub amount: Decimal,
    pub paid_at: Option<Timestamp>,
}

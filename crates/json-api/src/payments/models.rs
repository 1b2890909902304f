//! Payment Models

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::{
    orders::records::OrderStatus,
    payments::records::{PaymentIntent, PaymentMethod, PaymentReceipt, PaymentStatus},
};

/// Payment Intent Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PaymentIntentResponse {
    /// Payment number to hand to the (simulated) gateway
    pub payment_no: String,

    pub order_uuid: Uuid,

    pub order_no: String,

    /// Amount due, as a decimal string
    pub amount: String,

    #[salvo(schema(value_type = String))]
    pub status: OrderStatus,

    pub created_at: String,
}

impl From<PaymentIntent> for PaymentIntentResponse {
    fn from(intent: PaymentIntent) -> Self {
        Self {
            payment_no: intent.payment_no,
            order_uuid: intent.order_uuid.into_uuid(),
            order_no: intent.order_no,
            amount: intent.amount.to_string(),
            status: intent.status,
            created_at: intent.created_at.to_string(),
        }
    }
}

/// Payment Receipt Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PaymentReceiptResponse {
    pub order_uuid: Uuid,

    pub order_no: String,

    pub amount: String,

    #[salvo(schema(value_type = String))]
    pub status: OrderStatus,

    #[salvo(schema(value_type = String))]
    pub method: PaymentMethod,

    pub paid_at: Option<String>,
}

impl From<PaymentReceipt> for PaymentReceiptResponse {
    fn from(receipt: PaymentReceipt) -> Self {
        Self {
            order_uuid: receipt.order_uuid.into_uuid(),
            order_no: receipt.order_no,
            amount: receipt.amount.to_string(),
            status: receipt.status,
            method: receipt.method,
            paid_at: receipt.paid_at.as_ref().map(ToString::to_string),
        }
    }
}

/// Payment Status Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PaymentStatusResponse {
    pub order_uuid: Uuid,

    pub order_no: String,

    #[salvo(schema(value_type = String))]
    pub status: OrderStatus,

    pub amount: String,

    pub paid_at: Option<String>,
}

impl From<PaymentStatus> for PaymentStatusResponse {
    fn from(status: PaymentStatus) -> Self {
        Self {
            order_uuid: status.order_uuid.into_uuid(),
            order_no: status.order_no,
            status: status.status,
            amount: status.amount.to_string(),
            paid_at: status.paid_at.as_ref().map(ToString::to_string),
        }
    }
}

//! Confirm Payment Handler

use std::{fmt, sync::Arc};

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::payments::records::PaymentMethod;

use crate::{
    errors::ErrorCode,
    extensions::*,
    payments::{errors::into_status_error, models::PaymentReceiptResponse},
    state::State,
};

/// Confirm Payment Request
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub(crate) struct ConfirmPaymentRequest {
    /// `alipay`, `wechat` or `card`; defaults to `alipay`
    #[serde(default)]
    #[salvo(schema(value_type = Option<String>))]
    pub method: PaymentMethod,
}

fn invalid_body(source: impl fmt::Display) -> StatusError {
    StatusError::bad_request()
        .brief(format!("Invalid request body: {source}"))
        .detail(ErrorCode::Validation)
}

/// The body is optional. Without one, the default method is used.
async fn requested_method(req: &mut Request) -> Result<PaymentMethod, StatusError> {
    let payload = req.payload().await.map_err(invalid_body)?;

    if payload.iter().all(u8::is_ascii_whitespace) {
        return Ok(PaymentMethod::default());
    }

    serde_json::from_slice::<ConfirmPaymentRequest>(payload.as_ref())
        .map(|request| request.method)
        .map_err(invalid_body)
}

/// Confirm Payment Handler
///
/// Simulates a successful payment and moves the order to `paid`. Paying an
/// order twice is rejected. The body may be omitted, in which case the
/// payment is made with `alipay`.
#[endpoint(
    tags("payments"),
    summary = "Confirm Payment",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Order paid"),
        (status_code = StatusCode::BAD_REQUEST, description = "Order is not pending"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "payments.confirm",
    skip(order, req, depot),
    fields(
        user_uuid = tracing::field::Empty,
        order_uuid = tracing::field::Empty,
        method = tracing::field::Empty
    ),
    err
)]
pub(crate) async fn handler(
    order: PathParam<Uuid>,
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<PaymentReceiptResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;
    let order = order.into_inner();
    let method = requested_method(req).await?;

    let span = tracing::Span::current();

    span.record("user_uuid", tracing::field::display(user));
    span.record("order_uuid", tracing::field::display(order));
    span.record("method", method.as_str());

    let receipt = state
        .app
        .payments
        .confirm_payment(user, order.into(), method)
        .await
        .map_err(into_status_error)?;

    tracing::info!(order_uuid = %order, amount = %receipt.amount, "payment confirmed");

    Ok(Json(receipt.into()))
}

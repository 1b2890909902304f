//! Create Order Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::orders::data::NewOrder;

use crate::{
    extensions::*,
    orders::{errors::into_status_error, models::OrderResponse},
    state::State,
};

/// Create Order Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateOrderRequest {
    /// Shipping address; must belong to the caller
    pub address_uuid: Uuid,

    /// Cart lines to check out
    pub cart_item_uuids: Vec<Uuid>,

    #[serde(default)]
    pub remarks: Option<String>,
}

impl From<CreateOrderRequest> for NewOrder {
    fn from(request: CreateOrderRequest) -> Self {
        NewOrder {
            address_uuid: request.address_uuid.into(),
            cart_item_uuids: request.cart_item_uuids.into_iter().map(Into::into).collect(),
            remarks: request.remarks,
        }
    }
}

/// Create Order Handler
///
/// Converts the selected cart lines into a pending order.
#[endpoint(
    tags("orders"),
    summary = "Create Order",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Order created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid selection, address or insufficient stock"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "orders.create",
    skip(json, depot, res),
    fields(
        user_uuid = tracing::field::Empty,
        address_uuid = tracing::field::Empty,
        cart_items_count = tracing::field::Empty
    ),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<CreateOrderRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;
    let request = json.into_inner();

    let span = tracing::Span::current();

    span.record("user_uuid", tracing::field::display(user));
    span.record("address_uuid", tracing::field::display(request.address_uuid));
    span.record("cart_items_count", request.cart_item_uuids.len());

    let order = state
        .app
        .orders
        .create_order(user, request.into())
        .await
        .map_err(into_status_error)?;

    res.add_header(LOCATION, format!("/api/v1/orders/{}", order.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    tracing::info!(
        order_uuid = %order.uuid,
        order_no = %order.order_no,
        actual_amount = %order.actual_amount,
        "created order"
    );

    Ok(Json(order.into()))
}

//! Get Address Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    addresses::{errors::into_status_error, models::AddressResponse},
    extensions::*,
    state::State,
};

/// Get Address Handler
///
/// Addresses belonging to other users are reported as not found.
#[endpoint(
    tags("addresses"),
    summary = "Get Address",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Address"),
        (status_code = StatusCode::NOT_FOUND, description = "Address not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    address: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<AddressResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;

    let address = state
        .app
        .addresses
        .get_address(user, address.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(address.into()))
}

//! Create Address Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use storefront_app::domain::addresses::{data::NewAddress, records::AddressUuid};

use crate::{
    addresses::{errors::into_status_error, models::AddressResponse},
    errors::ErrorCode,
    extensions::*,
    state::State,
};

/// Create Address Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateAddressRequest {
    pub receiver_name: String,
    pub receiver_phone: String,
    pub province: String,
    pub city: String,
    pub district: String,
    pub detail: String,

    #[serde(default)]
    pub postal_code: Option<String>,

    /// Make this the default address, replacing the current one
    #[serde(default)]
    pub is_default: bool,
}

impl CreateAddressRequest {
    /// Name of the first required field that is blank.
    fn blank_field(&self) -> Option<&'static str> {
        [
            ("receiver_name", &self.receiver_name),
            ("receiver_phone", &self.receiver_phone),
            ("province", &self.province),
            ("city", &self.city),
            ("district", &self.district),
            ("detail", &self.detail),
        ]
        .into_iter()
        .find(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field)
    }
}

impl From<CreateAddressRequest> for NewAddress {
    fn from(request: CreateAddressRequest) -> Self {
        NewAddress {
            uuid: AddressUuid::new(),
            receiver_name: request.receiver_name,
            receiver_phone: request.receiver_phone,
            province: request.province,
            city: request.city,
            district: request.district,
            detail: request.detail,
            postal_code: request.postal_code,
            is_default: request.is_default,
        }
    }
}

/// Create Address Handler
#[endpoint(
    tags("addresses"),
    summary = "Create Address",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Address created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid address"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "addresses.create",
    skip(json, depot, res),
    fields(user_uuid = tracing::field::Empty, is_default = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<CreateAddressRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<AddressResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;
    let request = json.into_inner();

    if let Some(field) = request.blank_field() {
        return Err(StatusError::bad_request()
            .brief(format!("{field} must not be blank"))
            .detail(ErrorCode::Validation));
    }

    let span = tracing::Span::current();

    span.record("user_uuid", tracing::field::display(user));
    span.record("is_default", request.is_default);

    let address = state
        .app
        .addresses
        .create_address(user, request.into())
        .await
        .map_err(into_status_error)?;

    res.add_header(LOCATION, format!("/api/v1/addresses/{}", address.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    tracing::info!(address_uuid = %address.uuid, "created address");

    Ok(Json(address.into()))
}

//! Address Models

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::addresses::records::AddressRecord;

/// Address Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AddressResponse {
    pub uuid: Uuid,
    pub receiver_name: String,
    pub receiver_phone: String,
    pub province: String,
    pub city: String,
    pub district: String,
    pub detail: String,
    pub postal_code: Option<String>,

    /// Used when no address is chosen explicitly
    pub is_default: bool,

    pub created_at: String,
    pub updated_at: String,
}

impl From<AddressRecord> for AddressResponse {
    fn from(address: AddressRecord) -> Self {
        Self {
            uuid: address.uuid.into_uuid(),
            receiver_name: address.receiver_name,
            receiver_phone: address.receiver_phone,
            province: address.province,
            city: address.city,
            district: address.district,
            detail: address.detail,
            postal_code: address.postal_code,
            is_default: address.is_default,
            created_at: address.created_at.to_string(),
            updated_at: address.updated_at.to_string(),
        }
    }
}

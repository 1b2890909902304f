//! Errors

use salvo::http::StatusError;
use tracing::error;

use storefront_app::domain::addresses::AddressesServiceError;

use crate::errors::ErrorCode;

pub(crate) fn into_status_error(error: AddressesServiceError) -> StatusError {
    match error {
        AddressesServiceError::NotFound => StatusError::not_found()
            .brief("Address not found")
            .detail(ErrorCode::NotFound),
        AddressesServiceError::AlreadyExists => StatusError::conflict()
            .brief("Address already exists")
            .detail(ErrorCode::Conflict),
        AddressesServiceError::InvalidReference
        | AddressesServiceError::MissingRequiredData
        | AddressesServiceError::InvalidData => StatusError::bad_request()
            .brief("Invalid address")
            .detail(ErrorCode::Validation),
        AddressesServiceError::Sql(source) => {
            error!("address storage failure: {source}");

            StatusError::internal_server_error().detail(ErrorCode::Internal)
        }
    }
}

#[cfg(test)]
mod tests {
    use salvo::http::StatusCode;

    use crate::test_helpers::sqlx_error;

    use super::*;

    #[test]
    fn missing_address_is_404() {
        let error = into_status_error(AddressesServiceError::NotFound);

        assert_eq!(error.code, StatusCode::NOT_FOUND);
        assert_eq!(error.detail.as_deref(), Some("not_found"));
    }

    #[test]
    fn storage_failure_hides_details() {
        let error = into_status_error(AddressesServiceError::Sql(sqlx_error()));

        assert_eq!(error.code, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(error.detail.as_deref(), Some("internal"));
    }
}

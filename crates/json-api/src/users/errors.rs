//! Errors

use salvo::http::StatusError;
use tracing::error;

use storefront_app::domain::users::UsersServiceError;

use crate::errors::ErrorCode;

pub(crate) fn into_status_error(error: UsersServiceError) -> StatusError {
    match error {
        // A verified token whose owner has since been removed
        UsersServiceError::NotFound => StatusError::unauthorized()
            .brief("Unknown user")
            .detail(ErrorCode::Unauthorized),
        UsersServiceError::AlreadyExists => StatusError::conflict()
            .brief("User already exists")
            .detail(ErrorCode::Conflict),
        UsersServiceError::MissingRequiredData | UsersServiceError::InvalidData => {
            StatusError::bad_request()
                .brief("Invalid user")
                .detail(ErrorCode::Validation)
        }
        UsersServiceError::Sql(source) => {
            error!("user storage failure: {source}");

            StatusError::internal_server_error().detail(ErrorCode::Internal)
        }
    }
}

//! Errors

use salvo::http::StatusError;
use tracing::error;

use storefront_app::domain::payments::PaymentsServiceError;

use crate::errors::ErrorCode;

pub(crate) fn into_status_error(error: PaymentsServiceError) -> StatusError {
    match error {
        PaymentsServiceError::NotFound => StatusError::not_found()
            .brief("Order not found")
            .detail(ErrorCode::NotFound),
        PaymentsServiceError::InvalidState { status } => StatusError::bad_request()
            .brief(format!("Order is {status}; only pending orders can be paid"))
            .detail(ErrorCode::InvalidState),
        PaymentsServiceError::Sql(source) => {
            error!("payment storage failure: {source}");

            StatusError::internal_server_error().detail(ErrorCode::Internal)
        }
    }
}

//! Errors

use salvo::http::StatusError;
use tracing::error;

use storefront_app::domain::carts::CartsServiceError;

use crate::errors::ErrorCode;

pub(crate) fn into_status_error(error: CartsServiceError) -> StatusError {
    match error {
        CartsServiceError::InvalidQuantity => StatusError::bad_request()
            .brief("Quantity must be greater than 0")
            .detail(ErrorCode::Validation),
        CartsServiceError::InsufficientStock { available } => StatusError::bad_request()
            .brief(format!("Only {available} items available in stock"))
            .detail(ErrorCode::InsufficientStock),
        CartsServiceError::NotFound => StatusError::not_found()
            .brief("Cart item not found")
            .detail(ErrorCode::NotFound),
        CartsServiceError::ProductNotFound => StatusError::not_found()
            .brief("Product not found or not active")
            .detail(ErrorCode::NotFound),
        CartsServiceError::AlreadyExists => StatusError::conflict()
            .brief("Cart item already exists")
            .detail(ErrorCode::Conflict),
        CartsServiceError::InvalidReference
        | CartsServiceError::MissingRequiredData
        | CartsServiceError::InvalidData => StatusError::bad_request()
            .brief("Invalid cart payload")
            .detail(ErrorCode::Validation),
        CartsServiceError::Sql(source) => {
            error!("cart storage failure: {source}");

            StatusError::internal_server_error().detail(ErrorCode::Internal)
        }
    }
}

//! Errors

use salvo::http::StatusError;
use tracing::error;

use storefront_app::domain::products::ProductsServiceError;

use crate::errors::ErrorCode;

pub(crate) fn into_status_error(error: ProductsServiceError) -> StatusError {
    match error {
        ProductsServiceError::NotFound => StatusError::not_found()
            .brief("Product not found")
            .detail(ErrorCode::NotFound),
        ProductsServiceError::AlreadyExists => StatusError::conflict()
            .brief("Product already exists")
            .detail(ErrorCode::Conflict),
        ProductsServiceError::InvalidReference => StatusError::conflict()
            .brief("Product is referenced by existing orders")
            .detail(ErrorCode::Conflict),
        ProductsServiceError::MissingRequiredData
        | ProductsServiceError::InvalidData
        | ProductsServiceError::InvalidPrice
        | ProductsServiceError::InvalidStock(_) => StatusError::bad_request()
            .brief("Invalid product")
            .detail(ErrorCode::Validation),
        ProductsServiceError::Sql(source) => {
            error!("product storage failure: {source}");

            StatusError::internal_server_error().detail(ErrorCode::Internal)
        }
    }
}

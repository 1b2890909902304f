//! Errors

use salvo::http::StatusError;
use tracing::error;

use storefront_app::domain::orders::OrdersServiceError;

use crate::errors::ErrorCode;

fn invalid(brief: impl Into<String>) -> StatusError {
    StatusError::bad_request()
        .brief(brief)
        .detail(ErrorCode::Validation)
}

pub(crate) fn into_status_error(error: OrdersServiceError) -> StatusError {
    match error {
        OrdersServiceError::AddressNotFound => invalid("Address not found"),
        OrdersServiceError::AddressNotOwned => invalid("Invalid address"),
        OrdersServiceError::EmptySelection => invalid("No cart items selected"),
        OrdersServiceError::DuplicateCartItems => invalid("Cart items selected more than once"),
        OrdersServiceError::CartItemsNotFound(missing) => {
            let missing = missing
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ");

            invalid(format!("Some cart items are invalid: {missing}"))
        }
        OrdersServiceError::ProductUnavailable(product) => {
            invalid(format!("Product {product} is no longer available"))
        }
        OrdersServiceError::InsufficientStock { product, available } => StatusError::bad_request()
            .brief(format!(
                "Only {available} of product {product} available in stock"
            ))
            .detail(ErrorCode::InsufficientStock),
        OrdersServiceError::InvalidState { status } => StatusError::bad_request()
            .brief(format!("Order is {status}; only pending orders can be changed"))
            .detail(ErrorCode::InvalidState),
        OrdersServiceError::NotFound => StatusError::not_found()
            .brief("Order not found")
            .detail(ErrorCode::NotFound),
        OrdersServiceError::AlreadyExists => StatusError::conflict()
            .brief("Order already exists")
            .detail(ErrorCode::Conflict),
        OrdersServiceError::InvalidReference
        | OrdersServiceError::MissingRequiredData
        | OrdersServiceError::InvalidData => invalid("Invalid order payload"),
        OrdersServiceError::OrderNumberExhausted => {
            error!("order number generation exhausted its retries");

            StatusError::internal_server_error().detail(ErrorCode::Internal)
        }
        OrdersServiceError::Sql(source) => {
            error!("order storage failure: {source}");

            StatusError::internal_server_error().detail(ErrorCode::Internal)
        }
    }
}

#[cfg(test)]
mod tests {
    use salvo::http::StatusCode;
    use uuid::Uuid;

    use storefront_app::domain::{
        carts::records::CartItemUuid, orders::records::OrderStatus,
    };

    use super::*;

    #[test]
    fn missing_cart_items_are_listed() {
        let missing = CartItemUuid::from_uuid(Uuid::nil());

        let error = into_status_error(OrdersServiceError::CartItemsNotFound(vec![missing]));

        assert_eq!(error.code, StatusCode::BAD_REQUEST);
        assert!(error.brief.contains(&missing.to_string()));
        assert_eq!(error.detail.as_deref(), Some("validation_error"));
    }

    #[test]
    fn invalid_state_names_current_status() {
        let error = into_status_error(OrdersServiceError::InvalidState {
            status: OrderStatus::Paid,
        });

        assert_eq!(error.code, StatusCode::BAD_REQUEST);
        assert!(error.brief.starts_with("Order is paid"));
        assert_eq!(error.detail.as_deref(), Some("invalid_state"));
    }

    #[test]
    fn exhausted_order_numbers_are_internal() {
        let error = into_status_error(OrdersServiceError::OrderNumberExhausted);

        assert_eq!(error.code, StatusCode::INTERNAL_SERVER_ERROR);
    }
}

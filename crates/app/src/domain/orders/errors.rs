//! Orders service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::domain::{
    carts::records::CartItemUuid, orders::records::OrderStatus, products::records::ProductUuid,
};

#[derive(Debug, Error)]
pub enum OrdersServiceError {
    #[error("order already exists")]
    AlreadyExists,

    #[error("order not found")]
    NotFound,

    #[error("address not found")]
    AddressNotFound,

    #[error("invalid address")]
    AddressNotOwned,

    #[error("no cart items selected")]
    EmptySelection,

    #[error("cart items selected more than once")]
    DuplicateCartItems,

    #[error("some cart items are invalid")]
    CartItemsNotFound(Vec<CartItemUuid>),

    #[error("product {0} is no longer available")]
    ProductUnavailable(ProductUuid),

    #[error("only {available} of product {product} available in stock")]
    InsufficientStock { product: ProductUuid, available: u32 },

    #[error("order is {status}; only pending orders can be changed")]
    InvalidState { status: OrderStatus },

    #[error("could not allocate a unique order number")]
    OrderNumberExhausted,

    #[error("related resource not found")]
    InvalidReference,

    #[error("missing required data")]
    MissingRequiredData,

    #[error("invalid data")]
    InvalidData,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for OrdersServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyExists,
            Some(ErrorKind::ForeignKeyViolation) => Self::InvalidReference,
            Some(ErrorKind::NotNullViolation) => Self::MissingRequiredData,
            Some(ErrorKind::CheckViolation) => Self::InvalidData,
            Some(ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}

//! Product Records

use jiff::Timestamp;
use rust_decimal::Decimal;

use crate::uuids::TypedUuid;

/// Product UUID
pub type ProductUuid = TypedUuid<ProductRecord>;

/// Product Record
#[derive(Debug, Clone)]
pub struct ProductRecord {
    pub uuid: ProductUuid,
    pub name: String,
    pub main_image: String,
    pub price: Decimal,
    pub stock: u32,

    /// Inactive products cannot be added to carts or ordered.
    pub is_active: bool,

    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

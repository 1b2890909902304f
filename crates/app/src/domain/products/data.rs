//! Products Data

use rust_decimal::Decimal;

use crate::domain::products::records::ProductUuid;

/// New Product Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub uuid: ProductUuid,
    pub name: String,
    pub main_image: String,
    pub price: Decimal,
    pub stock: u32,
    pub is_active: bool,
}

/// Product Update Data
#[derive(Debug, Clone, PartialEq)]
pub struct ProductUpdate {
    pub name: String,
    pub main_image: String,
    pub price: Decimal,
    pub stock: u32,
    pub is_active: bool,
}

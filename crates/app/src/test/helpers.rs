//! Test Helpers

use rust_decimal::Decimal;

use crate::{
    domain::{
        addresses::{
            AddressesService,
            data::NewAddress,
            records::{AddressRecord, AddressUuid},
        },
        carts::{
            CartsService, CartsServiceError,
            data::NewCartItem,
            records::AddedCartItem,
        },
        products::{
            ProductsService,
            data::NewProduct,
            records::{ProductRecord, ProductUuid},
        },
        users::records::UserUuid,
    },
    test::TestContext,
};

pub(crate) fn new_product(name: &str, stock: u32) -> NewProduct {
    NewProduct {
        uuid: ProductUuid::new(),
        name: name.to_string(),
        main_image: format!("https://img.example.com/{}.jpg", name.to_lowercase()),
        price: Decimal::new(1000, 2),
        stock,
        is_active: true,
    }
}

pub(crate) fn new_address(is_default: bool) -> NewAddress {
    NewAddress {
        uuid: AddressUuid::new(),
        receiver_name: "Zhang San".to_string(),
        receiver_phone: "13800000000".to_string(),
        province: "Zhejiang".to_string(),
        city: "Hangzhou".to_string(),
        district: "Xihu".to_string(),
        detail: "1 Wensan Road".to_string(),
        postal_code: Some("310000".to_string()),
        is_default,
    }
}

pub(crate) async fn create_product(
    ctx: &TestContext,
    name: &str,
    price: Decimal,
    stock: u32,
) -> ProductRecord {
    ctx.products
        .create_product(NewProduct {
            price,
            ..new_product(name, stock)
        })
        .await
        .expect("Failed to create test product")
}

pub(crate) async fn create_address(ctx: &TestContext, user: UserUuid) -> AddressRecord {
    ctx.addresses
        .create_address(user, new_address(true))
        .await
        .expect("Failed to create test address")
}

pub(crate) async fn add_item(
    ctx: &TestContext,
    user: UserUuid,
    product: ProductUuid,
    quantity: i32,
) -> Result<AddedCartItem, CartsServiceError> {
    ctx.carts
        .add_item(
            user,
            NewCartItem {
                product_uuid: product,
                quantity,
            },
        )
        .await
}

pub(crate) async fn product_stock(ctx: &TestContext, product: ProductUuid) -> u32 {
    ctx.products
        .get_product(product)
        .await
        .expect("Failed to load test product")
        .stock
}

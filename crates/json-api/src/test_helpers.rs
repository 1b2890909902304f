//! Test helpers.

use std::sync::Arc;

use jiff::Timestamp;
use rust_decimal::Decimal;
use salvo::{affix_state::inject, prelude::*};
use uuid::Uuid;

use storefront_app::{
    auth::MockAuthService,
    context::AppContext,
    domain::{
        addresses::{
            MockAddressesService,
            records::{AddressRecord, AddressUuid},
        },
        carts::{
            MockCartsService,
            records::{CartItemRecord, CartItemUuid},
        },
        orders::{
            MockOrdersService,
            records::{
                OrderItemRecord, OrderItemUuid, OrderRecord, OrderStatus, OrderUuid,
                ShippingAddress,
            },
        },
        payments::MockPaymentsService,
        products::{
            MockProductsService,
            records::{ProductRecord, ProductUuid},
        },
        users::{MockUsersService, records::UserUuid},
    },
    money,
};

use crate::{extensions::*, state::State};

pub(crate) const TEST_USER_UUID: UserUuid = UserUuid::from_uuid(Uuid::nil());

#[salvo::handler]
pub(crate) async fn inject_user(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    depot.insert_user_uuid(TEST_USER_UUID);
    ctrl.call_next(req, depot, res).await;
}

/// A storage failure for exercising 500 paths.
pub(crate) fn sqlx_error() -> sqlx::Error {
    sqlx::Error::PoolTimedOut
}

fn strict_users_mock() -> MockUsersService {
    let mut users = MockUsersService::new();

    users.expect_create_user().never();
    users.expect_get_user().never();

    users
}

fn strict_addresses_mock() -> MockAddressesService {
    let mut addresses = MockAddressesService::new();

    addresses.expect_create_address().never();
    addresses.expect_get_address().never();
    addresses.expect_list_addresses().never();

    addresses
}

fn strict_products_mock() -> MockProductsService {
    let mut products = MockProductsService::new();

    products.expect_get_product().never();
    products.expect_create_product().never();
    products.expect_update_product().never();
    products.expect_delete_product().never();

    products
}

fn strict_carts_mock() -> MockCartsService {
    let mut carts = MockCartsService::new();

    carts.expect_get_cart().never();
    carts.expect_add_item().never();
    carts.expect_update_quantity().never();
    carts.expect_remove_item().never();
    carts.expect_clear_cart().never();

    carts
}

fn strict_orders_mock() -> MockOrdersService {
    let mut orders = MockOrdersService::new();

    orders.expect_create_order().never();
    orders.expect_list_orders().never();
    orders.expect_get_order().never();
    orders.expect_cancel_order().never();

    orders
}

fn strict_payments_mock() -> MockPaymentsService {
    let mut payments = MockPaymentsService::new();

    payments.expect_initiate_payment().never();
    payments.expect_confirm_payment().never();
    payments.expect_payment_status().never();

    payments
}

fn strict_auth_mock() -> MockAuthService {
    let mut auth = MockAuthService::new();

    auth.expect_authenticate_bearer().never();

    auth
}

/// Service mocks for a test; anything left unset rejects every call.
#[derive(Default)]
struct Mocks {
    users: Option<MockUsersService>,
    addresses: Option<MockAddressesService>,
    products: Option<MockProductsService>,
    carts: Option<MockCartsService>,
    orders: Option<MockOrdersService>,
    payments: Option<MockPaymentsService>,
    auth: Option<MockAuthService>,
}

impl Mocks {
    fn into_state(self) -> Arc<State> {
        State::from_app_context(AppContext {
            users: Arc::new(self.users.unwrap_or_else(strict_users_mock)),
            addresses: Arc::new(self.addresses.unwrap_or_else(strict_addresses_mock)),
            products: Arc::new(self.products.unwrap_or_else(strict_products_mock)),
            carts: Arc::new(self.carts.unwrap_or_else(strict_carts_mock)),
            orders: Arc::new(self.orders.unwrap_or_else(strict_orders_mock)),
            payments: Arc::new(self.payments.unwrap_or_else(strict_payments_mock)),
            auth: Arc::new(self.auth.unwrap_or_else(strict_auth_mock)),
        })
    }
}

pub(crate) fn state_with_auth(auth: MockAuthService) -> Arc<State> {
    Mocks {
        auth: Some(auth),
        ..Mocks::default()
    }
    .into_state()
}

fn authenticated_service(state: Arc<State>, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state))
            .hoop(inject_user)
            .push(route),
    )
}

pub(crate) fn users_service(users: MockUsersService, route: Router) -> Service {
    let state = Mocks {
        users: Some(users),
        ..Mocks::default()
    }
    .into_state();

    authenticated_service(state, route)
}

pub(crate) fn addresses_service(addresses: MockAddressesService, route: Router) -> Service {
    let state = Mocks {
        addresses: Some(addresses),
        ..Mocks::default()
    }
    .into_state();

    authenticated_service(state, route)
}

/// Catalog routes are public, so no user is injected.
pub(crate) fn products_service(products: MockProductsService, route: Router) -> Service {
    let state = Mocks {
        products: Some(products),
        ..Mocks::default()
    }
    .into_state();

    Service::new(Router::new().hoop(inject(state)).push(route))
}

pub(crate) fn carts_service(carts: MockCartsService, route: Router) -> Service {
    let state = Mocks {
        carts: Some(carts),
        ..Mocks::default()
    }
    .into_state();

    authenticated_service(state, route)
}

pub(crate) fn orders_service(orders: MockOrdersService, route: Router) -> Service {
    let state = Mocks {
        orders: Some(orders),
        ..Mocks::default()
    }
    .into_state();

    authenticated_service(state, route)
}

pub(crate) fn payments_service(payments: MockPaymentsService, route: Router) -> Service {
    let state = Mocks {
        payments: Some(payments),
        ..Mocks::default()
    }
    .into_state();

    authenticated_service(state, route)
}

pub(crate) fn make_address(uuid: AddressUuid, is_default: bool) -> AddressRecord {
    AddressRecord {
        uuid,
        user_uuid: TEST_USER_UUID,
        receiver_name: "Zhang San".to_string(),
        receiver_phone: "13800000000".to_string(),
        province: "Zhejiang".to_string(),
        city: "Hangzhou".to_string(),
        district: "Xihu".to_string(),
        detail: "1 Wensan Road".to_string(),
        postal_code: Some("310000".to_string()),
        is_default,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

/// Ten in stock at 19.99.
pub(crate) fn make_product(uuid: ProductUuid, is_active: bool) -> ProductRecord {
    ProductRecord {
        uuid,
        name: "Cold Brew".to_string(),
        main_image: "https://img.example.com/cold-brew.jpg".to_string(),
        price: Decimal::new(1999, 2),
        stock: 10,
        is_active,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_cart_item(uuid: CartItemUuid, price: Decimal, quantity: u32) -> CartItemRecord {
    CartItemRecord {
        uuid,
        product_uuid: ProductUuid::from_uuid(Uuid::nil()),
        product_name: "Cold Brew".to_string(),
        product_image: "https://img.example.com/cold-brew.jpg".to_string(),
        price,
        quantity,
        subtotal: money::line_subtotal(price, quantity),
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

/// An order with a single line of two items at 19.99.
pub(crate) fn make_order(uuid: OrderUuid, status: OrderStatus) -> OrderRecord {
    let price = Decimal::new(1999, 2);
    let subtotal = money::line_subtotal(price, 2);

    OrderRecord {
        uuid,
        user_uuid: TEST_USER_UUID,
        order_no: "ORD20261016120000K7Q2ZD".to_string(),
        address_uuid: AddressUuid::from_uuid(Uuid::nil()),
        shipping_address: ShippingAddress {
            receiver_name: "Zhang San".to_string(),
            receiver_phone: "13800000000".to_string(),
            province: "Zhejiang".to_string(),
            city: "Hangzhou".to_string(),
            district: "Xihu".to_string(),
            detail: "1 Wensan Road".to_string(),
            postal_code: Some("310000".to_string()),
        },
        total_amount: subtotal,
        discount_amount: money::quantize(Decimal::ZERO),
        shipping_fee: money::quantize(Decimal::ZERO),
        actual_amount: subtotal,
        status,
        remarks: None,
        paid_at: None,
        shipped_at: None,
        completed_at: None,
        cancelled_at: None,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
        items: vec![OrderItemRecord {
            uuid: OrderItemUuid::from_uuid(Uuid::nil()),
            order_uuid: uuid,
            product_uuid: ProductUuid::from_uuid(Uuid::nil()),
            product_name: "Cold Brew".to_string(),
            product_image: "https://img.example.com/cold-brew.jpg".to_string(),
            price,
            quantity: 2,
            subtotal,
        }],
    }
}

//! Orders Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use rust_decimal::Decimal;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar};
use uuid::Uuid;

use crate::{
    database::{count_param, try_get_count},
    domain::{
        addresses::records::AddressUuid,
        carts::records::CartItemUuid,
        orders::records::{
            OrderItemRecord, OrderItemUuid, OrderRecord, OrderStatus, OrderUuid, ShippingAddress,
        },
        products::records::ProductUuid,
        users::records::UserUuid,
    },
};

const FIND_ADDRESS_OWNER_SQL: &str = include_str!("sql/find_address_owner.sql");
const FIND_CART_ITEM_PRODUCTS_SQL: &str = include_str!("sql/find_cart_item_products.sql");
const LOCK_CART_ITEMS_SQL: &str = include_str!("sql/lock_cart_items.sql");
const LOCK_PRODUCTS_SQL: &str = include_str!("sql/lock_products.sql");
const CREATE_ORDER_SQL: &str = include_str!("sql/create_order.sql");
const CREATE_ORDER_ITEM_SQL: &str = include_str!("sql/create_order_item.sql");
const DECREMENT_PRODUCT_STOCK_SQL: &str = include_str!("sql/decrement_product_stock.sql");
const RESTORE_ORDER_STOCK_SQL: &str = include_str!("sql/restore_order_stock.sql");
const DELETE_CART_ITEMS_SQL: &str = include_str!("sql/delete_cart_items.sql");
const LIST_ORDERS_SQL: &str = include_str!("sql/list_orders.sql");
const GET_ORDER_SQL: &str = include_str!("sql/get_order.sql");
const LOCK_ORDER_SQL: &str = include_str!("sql/lock_order.sql");
const LIST_ORDER_PRODUCTS_SQL: &str = include_str!("sql/list_order_products.sql");
const LIST_ORDER_ITEMS_SQL: &str = include_str!("sql/list_order_items.sql");
const CANCEL_ORDER_SQL: &str = include_str!("sql/cancel_order.sql");

/// A selected cart line, locked for checkout.
#[derive(Debug, Clone, Copy)]
pub(crate) struct CheckoutLine {
    pub cart_item: CartItemUuid,
    pub product: ProductUuid,
    pub quantity: u32,
}

/// Current catalog data of a product, locked for checkout.
#[derive(Debug, Clone)]
pub(crate) struct ProductSnapshot {
    pub uuid: ProductUuid,
    pub name: String,
    pub main_image: String,
    pub price: Decimal,
    pub stock: u32,
    pub is_active: bool,
}

/// Order row to insert.
#[derive(Debug, Clone)]
pub(crate) struct OrderInsert<'a> {
    pub uuid: OrderUuid,
    pub order_no: &'a str,
    pub address: AddressUuid,
    pub total_amount: Decimal,
    pub discount_amount: Decimal,
    pub shipping_fee: Decimal,
    pub actual_amount: Decimal,
    pub remarks: Option<&'a str>,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PgOrdersRepository;

impl PgOrdersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn find_address_owner(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        address: AddressUuid,
    ) -> Result<Option<UserUuid>, sqlx::Error> {
        let owner: Option<Uuid> = query_scalar(FIND_ADDRESS_OWNER_SQL)
            .bind(address.into_uuid())
            .fetch_optional(&mut **tx)
            .await?;

        Ok(owner.map(UserUuid::from_uuid))
    }

    /// Products referenced by the user's cart lines among `items`, sorted,
    /// read without locking.
    pub(crate) async fn find_cart_item_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        items: &[Uuid],
    ) -> Result<Vec<Uuid>, sqlx::Error> {
        query_scalar(FIND_CART_ITEM_PRODUCTS_SQL)
            .bind(user.into_uuid())
            .bind(items)
            .fetch_all(&mut **tx)
            .await
    }

    /// Lock the user's cart lines among `items`. Lines that no longer exist,
    /// or belong to someone else, are absent from the result.
    pub(crate) async fn lock_cart_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        items: &[Uuid],
    ) -> Result<Vec<CheckoutLine>, sqlx::Error> {
        query_as::<Postgres, CheckoutLine>(LOCK_CART_ITEMS_SQL)
            .bind(user.into_uuid())
            .bind(items)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn lock_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        products: &[Uuid],
    ) -> Result<Vec<ProductSnapshot>, sqlx::Error> {
        query_as::<Postgres, ProductSnapshot>(LOCK_PRODUCTS_SQL)
            .bind(products)
            .fetch_all(&mut **tx)
            .await
    }

    /// Insert an order. Returns `None` when the order number is already taken.
    pub(crate) async fn create_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        order: &OrderInsert<'_>,
    ) -> Result<Option<OrderRecord>, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(CREATE_ORDER_SQL)
            .bind(order.uuid.into_uuid())
            .bind(user.into_uuid())
            .bind(order.order_no)
            .bind(order.address.into_uuid())
            .bind(order.total_amount)
            .bind(order.discount_amount)
            .bind(order.shipping_fee)
            .bind(order.actual_amount)
            .bind(order.remarks)
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn create_order_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        product: &ProductSnapshot,
        quantity: u32,
        subtotal: Decimal,
    ) -> Result<OrderItemRecord, sqlx::Error> {
        query_as::<Postgres, OrderItemRecord>(CREATE_ORDER_ITEM_SQL)
            .bind(OrderItemUuid::new().into_uuid())
            .bind(order.into_uuid())
            .bind(product.uuid.into_uuid())
            .bind(&product.name)
            .bind(&product.main_image)
            .bind(product.price)
            .bind(count_param(quantity)?)
            .bind(subtotal)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn decrement_product_stock(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
        quantity: u32,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DECREMENT_PRODUCT_STOCK_SQL)
            .bind(product.into_uuid())
            .bind(count_param(quantity)?)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn restore_order_stock(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(RESTORE_ORDER_STOCK_SQL)
            .bind(order.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn delete_cart_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        items: &[Uuid],
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_CART_ITEMS_SQL)
            .bind(user.into_uuid())
            .bind(items)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn list_orders(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<Vec<OrderRecord>, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(LIST_ORDERS_SQL)
            .bind(user.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        order: OrderUuid,
    ) -> Result<OrderRecord, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(GET_ORDER_SQL)
            .bind(order.into_uuid())
            .bind(user.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn lock_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        order: OrderUuid,
    ) -> Result<OrderRecord, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(LOCK_ORDER_SQL)
            .bind(order.into_uuid())
            .bind(user.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    /// Products on one of the user's orders, sorted.
    pub(crate) async fn list_order_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        order: OrderUuid,
    ) -> Result<Vec<Uuid>, sqlx::Error> {
        query_scalar(LIST_ORDER_PRODUCTS_SQL)
            .bind(order.into_uuid())
            .bind(user.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn list_order_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        orders: &[Uuid],
    ) -> Result<Vec<OrderItemRecord>, sqlx::Error> {
        query_as::<Postgres, OrderItemRecord>(LIST_ORDER_ITEMS_SQL)
            .bind(orders)
            .fetch_all(&mut **tx)
            .await
    }

    /// Move a pending order to `cancelled`. Returns `None` if it was no
    /// longer pending.
    pub(crate) async fn cancel_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        order: OrderUuid,
    ) -> Result<Option<OrderRecord>, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(CANCEL_ORDER_SQL)
            .bind(order.into_uuid())
            .bind(user.into_uuid())
            .fetch_optional(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for CheckoutLine {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            cart_item: CartItemUuid::from_uuid(row.try_get("uuid")?),
            product: ProductUuid::from_uuid(row.try_get("product_uuid")?),
            quantity: try_get_count(row, "quantity")?,
        })
    }
}

impl<'r> FromRow<'r, PgRow> for ProductSnapshot {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: ProductUuid::from_uuid(row.try_get("uuid")?),
            name: row.try_get("name")?,
            main_image: row.try_get("main_image")?,
            price: row.try_get("price")?,
            stock: try_get_count(row, "stock")?,
            is_active: row.try_get("is_active")?,
        })
    }
}

impl<'r> FromRow<'r, PgRow> for OrderRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: OrderUuid::from_uuid(row.try_get("uuid")?),
            user_uuid: UserUuid::from_uuid(row.try_get("user_uuid")?),
            order_no: row.try_get("order_no")?,
            address_uuid: AddressUuid::from_uuid(row.try_get("address_uuid")?),
            shipping_address: ShippingAddress {
                receiver_name: row.try_get("address_receiver_name")?,
                receiver_phone: row.try_get("address_receiver_phone")?,
                province: row.try_get("address_province")?,
                city: row.try_get("address_city")?,
                district: row.try_get("address_district")?,
                detail: row.try_get("address_detail")?,
                postal_code: row.try_get("address_postal_code")?,
            },
            total_amount: row.try_get("total_amount")?,
            discount_amount: row.try_get("discount_amount")?,
            shipping_fee: row.try_get("shipping_fee")?,
            actual_amount: row.try_get("actual_amount")?,
            status: row.try_get::<OrderStatus, _>("status")?,
            remarks: row.try_get("remarks")?,
            paid_at: row
                .try_get::<Option<SqlxTimestamp>, _>("paid_at")?
                .map(SqlxTimestamp::to_jiff),
            shipped_at: row
                .try_get::<Option<SqlxTimestamp>, _>("shipped_at")?
                .map(SqlxTimestamp::to_jiff),
            completed_at: row
                .try_get::<Option<SqlxTimestamp>, _>("completed_at")?
                .map(SqlxTimestamp::to_jiff),
            cancelled_at: row
                .try_get::<Option<SqlxTimestamp>, _>("cancelled_at")?
                .map(SqlxTimestamp::to_jiff),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
            items: Vec::new(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for OrderItemRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: OrderItemUuid::from_uuid(row.try_get("uuid")?),
            order_uuid: OrderUuid::from_uuid(row.try_get("order_uuid")?),
            product_uuid: ProductUuid::from_uuid(row.try_get("product_uuid")?),
            product_name: row.try_get("product_name")?,
            product_image: row.try_get("product_image")?,
            price: row.try_get("price")?,
            quantity: try_get_count(row, "quantity")?,
            subtotal: row.try_get("subtotal")?,
        })
    }
}

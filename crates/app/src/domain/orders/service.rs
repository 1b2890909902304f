//! Orders service.
//!
//! Checkout and cancellation lock product rows first, in uuid order, and only
//! then the cart lines or the order they touch. The cart service follows the
//! same order.

use std::{
    collections::{HashMap, HashSet},
    fmt,
    sync::Arc,
};

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use rust_decimal::Decimal;
use tracing::warn;
use uuid::Uuid;

use crate::{
    database::Db,
    domain::{
        carts::records::CartItemUuid,
        orders::{
            data::NewOrder,
            errors::OrdersServiceError,
            numbers,
            records::{OrderItemRecord, OrderRecord, OrderStatus, OrderUuid},
            repository::{CheckoutLine, OrderInsert, PgOrdersRepository, ProductSnapshot},
        },
        products::records::ProductUuid,
        users::records::UserUuid,
    },
    money,
};

/// How many order numbers are tried before giving up on an insert.
pub const ORDER_NO_ATTEMPTS: usize = 5;

type OrderNumberGenerator = Arc<dyn Fn() -> String + Send + Sync>;

#[derive(Clone)]
pub struct PgOrdersService {
    db: Db,
    repository: PgOrdersRepository,
    order_numbers: OrderNumberGenerator,
}

impl fmt::Debug for PgOrdersService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PgOrdersService")
            .field("db", &self.db)
            .field("repository", &self.repository)
            .finish_non_exhaustive()
    }
}

impl PgOrdersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self::with_order_numbers(db, || {
            numbers::order_no(Timestamp::now(), &mut rand::thread_rng())
        })
    }

    /// Use a custom order number source instead of the time-and-random default.
    #[must_use]
    pub fn with_order_numbers<F>(db: Db, order_numbers: F) -> Self
    where
        F: Fn() -> String + Send + Sync + 'static,
    {
        Self {
            db,
            repository: PgOrdersRepository::new(),
            order_numbers: Arc::new(order_numbers),
        }
    }

    async fn insert_order(
        &self,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        user: UserUuid,
        order: &NewOrder,
        total_amount: Decimal,
    ) -> Result<OrderRecord, OrdersServiceError> {
        let uuid = OrderUuid::new();

        for attempt in 1..=ORDER_NO_ATTEMPTS {
            let order_no = (self.order_numbers)();

            let insert = OrderInsert {
                uuid,
                order_no: &order_no,
                address: order.address_uuid,
                total_amount,
                discount_amount: Decimal::ZERO,
                shipping_fee: Decimal::ZERO,
                actual_amount: total_amount,
                remarks: order.remarks.as_deref(),
            };

            if let Some(created) = self.repository.create_order(tx, user, &insert).await? {
                return Ok(created);
            }

            warn!(order_no, attempt, "order number already taken");
        }

        Err(OrdersServiceError::OrderNumberExhausted)
    }
}

/// Reject empty and duplicated selections before touching the database.
fn checked_selection(items: &[CartItemUuid]) -> Result<Vec<Uuid>, OrdersServiceError> {
    if items.is_empty() {
        return Err(OrdersServiceError::EmptySelection);
    }

    let mut seen = HashSet::with_capacity(items.len());

    if !items.iter().all(|item| seen.insert(*item)) {
        return Err(OrdersServiceError::DuplicateCartItems);
    }

    Ok(items.iter().map(|item| item.into_uuid()).collect())
}

/// A checkout line priced against its locked product row.
struct PricedLine<'a> {
    line: CheckoutLine,
    product: &'a ProductSnapshot,
    subtotal: Decimal,
}

fn price_lines<'a>(
    lines: &[CheckoutLine],
    products: &'a HashMap<ProductUuid, ProductSnapshot>,
) -> Result<Vec<PricedLine<'a>>, OrdersServiceError> {
    lines
        .iter()
        .map(|line| {
            let product = products
                .get(&line.product)
                .filter(|product| product.is_active)
                .ok_or(OrdersServiceError::ProductUnavailable(line.product))?;

            if line.quantity > product.stock {
                return Err(OrdersServiceError::InsufficientStock {
                    product: product.uuid,
                    available: product.stock,
                });
            }

            Ok(PricedLine {
                line: *line,
                product,
                subtotal: money::line_subtotal(product.price, line.quantity),
            })
        })
        .collect()
}

fn attach_items(orders: &mut [OrderRecord], items: Vec<OrderItemRecord>) {
    let mut by_order: HashMap<OrderUuid, Vec<OrderItemRecord>> = HashMap::new();

    for item in items {
        by_order.entry(item.order_uuid).or_default().push(item);
    }

    for order in orders {
        order.items = by_order.remove(&order.uuid).unwrap_or_default();
    }
}

#[async_trait]
impl OrdersService for PgOrdersService {
    async fn create_order(
        &self,
        user: UserUuid,
        order: NewOrder,
    ) -> Result<OrderRecord, OrdersServiceError> {
        let selection = checked_selection(&order.cart_item_uuids)?;

        let mut tx = self.db.begin_user_transaction(user).await?;

        match self
            .repository
            .find_address_owner(&mut tx, order.address_uuid)
            .await?
        {
            None => return Err(OrdersServiceError::AddressNotFound),
            Some(owner) if owner != user => return Err(OrdersServiceError::AddressNotOwned),
            Some(_) => {}
        }

        let product_uuids = self
            .repository
            .find_cart_item_products(&mut tx, user, &selection)
            .await?;

        let products: HashMap<ProductUuid, ProductSnapshot> = self
            .repository
            .lock_products(&mut tx, &product_uuids)
            .await?
            .into_iter()
            .map(|product| (product.uuid, product))
            .collect();

        let lines = self
            .repository
            .lock_cart_items(&mut tx, user, &selection)
            .await?;

        if lines.len() != selection.len() {
            let missing = order
                .cart_item_uuids
                .iter()
                .filter(|uuid| !lines.iter().any(|line| line.cart_item == **uuid))
                .copied()
                .collect();

            return Err(OrdersServiceError::CartItemsNotFound(missing));
        }

        let priced = price_lines(&lines, &products)?;
        let total_amount = money::sum(priced.iter().map(|priced| priced.subtotal));

        let mut created = self
            .insert_order(&mut tx, user, &order, total_amount)
            .await?;

        for priced in &priced {
            let item = self
                .repository
                .create_order_item(
                    &mut tx,
                    created.uuid,
                    priced.product,
                    priced.line.quantity,
                    priced.subtotal,
                )
                .await?;

            created.items.push(item);

            let decremented = self
                .repository
                .decrement_product_stock(&mut tx, priced.product.uuid, priced.line.quantity)
                .await?;

            if decremented == 0 {
                return Err(OrdersServiceError::InsufficientStock {
                    product: priced.product.uuid,
                    available: priced.product.stock,
                });
            }
        }

        let deleted = self
            .repository
            .delete_cart_items(&mut tx, user, &selection)
            .await?;

        if usize::try_from(deleted).ok() != Some(selection.len()) {
            return Err(OrdersServiceError::CartItemsNotFound(Vec::new()));
        }

        tx.commit().await?;

        Ok(created)
    }

    async fn list_orders(&self, user: UserUuid) -> Result<Vec<OrderRecord>, OrdersServiceError> {
        let mut tx = self.db.begin_user_transaction(user).await?;

        let mut orders = self.repository.list_orders(&mut tx, user).await?;

        let order_uuids: Vec<Uuid> = orders.iter().map(|order| order.uuid.into_uuid()).collect();

        let items = self
            .repository
            .list_order_items(&mut tx, &order_uuids)
            .await?;

        tx.commit().await?;

        attach_items(&mut orders, items);

        Ok(orders)
    }

    async fn get_order(
        &self,
        user: UserUuid,
        order: OrderUuid,
    ) -> Result<OrderRecord, OrdersServiceError> {
        let mut tx = self.db.begin_user_transaction(user).await?;

        let mut record = self.repository.get_order(&mut tx, user, order).await?;

        record.items = self
            .repository
            .list_order_items(&mut tx, &[order.into_uuid()])
            .await?;

        tx.commit().await?;

        Ok(record)
    }

    async fn cancel_order(
        &self,
        user: UserUuid,
        order: OrderUuid,
    ) -> Result<OrderRecord, OrdersServiceError> {
        let mut tx = self.db.begin_user_transaction(user).await?;

        let product_uuids = self
            .repository
            .list_order_products(&mut tx, user, order)
            .await?;

        self.repository
            .lock_products(&mut tx, &product_uuids)
            .await?;

        let current = self.repository.lock_order(&mut tx, user, order).await?;

        if !current.status.can_transition_to(OrderStatus::Cancelled) {
            return Err(OrdersServiceError::InvalidState {
                status: current.status,
            });
        }

        let mut cancelled = self
            .repository
            .cancel_order(&mut tx, user, order)
            .await?
            .ok_or(OrdersServiceError::InvalidState {
                status: current.status,
            })?;

        self.repository.restore_order_stock(&mut tx, order).await?;

        cancelled.items = self
            .repository
            .list_order_items(&mut tx, &[order.into_uuid()])
            .await?;

        tx.commit().await?;

        Ok(cancelled)
    }
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Turn the selected cart lines into a pending order.
    ///
    /// Prices and product details are copied onto the order items, stock is
    /// reserved, and the consumed cart lines are removed. Either all of this
    /// happens or none of it does.
    async fn create_order(
        &self,
        user: UserUuid,
        order: NewOrder,
    ) -> Result<OrderRecord, OrdersServiceError>;

    /// The user's orders, newest first.
    async fn list_orders(&self, user: UserUuid) -> Result<Vec<OrderRecord>, OrdersServiceError>;

    /// Retrieve one of the user's orders with its items.
    async fn get_order(
        &self,
        user: UserUuid,
        order: OrderUuid,
    ) -> Result<OrderRecord, OrdersServiceError>;

    /// Cancel a pending order and return its reserved stock.
    async fn cancel_order(
        &self,
        user: UserUuid,
        order: OrderUuid,
    ) -> Result<OrderRecord, OrdersServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        domain::{
            addresses::records::AddressUuid,
            carts::{CartsService, CartsServiceError},
            payments::{PaymentsService, PaymentsServiceError, records::PaymentMethod},
            products::{ProductsService, ProductsServiceError, data::ProductUpdate},
        },
        test::{
            TestContext,
            helpers::{add_item, create_address, create_product, product_stock},
        },
    };

    use super::*;

    #[test]
    fn checked_selection_rejects_empty() {
        let result = checked_selection(&[]);

        assert!(
            matches!(result, Err(OrdersServiceError::EmptySelection)),
            "expected EmptySelection, got {result:?}"
        );
    }

    #[test]
    fn checked_selection_rejects_duplicates() {
        let item = CartItemUuid::new();

        let result = checked_selection(&[item, CartItemUuid::new(), item]);

        assert!(
            matches!(result, Err(OrdersServiceError::DuplicateCartItems)),
            "expected DuplicateCartItems, got {result:?}"
        );
    }

    #[tokio::test]
    async fn create_order_snapshots_items_and_totals() -> TestResult {
        let ctx = TestContext::new().await;
        let address = create_address(&ctx, ctx.user_uuid).await;
        let a = create_product(&ctx, "A", Decimal::new(1999, 2), 10).await;
        let b = create_product(&ctx, "B", Decimal::new(500, 2), 10).await;

        let line_a = add_item(&ctx, ctx.user_uuid, a.uuid, 2).await?;
        let line_b = add_item(&ctx, ctx.user_uuid, b.uuid, 1).await?;

        let order = ctx
            .orders
            .create_order(
                ctx.user_uuid,
                NewOrder {
                    address_uuid: address.uuid,
                    cart_item_uuids: vec![line_a.item.uuid, line_b.item.uuid],
                    remarks: Some("leave at the door".to_string()),
                },
            )
            .await?;

        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.total_amount.to_string(), "44.98");
        assert_eq!(order.actual_amount, order.total_amount);
        assert_eq!(order.discount_amount, Decimal::ZERO);
        assert_eq!(order.shipping_fee, Decimal::ZERO);
        assert_eq!(order.remarks.as_deref(), Some("leave at the door"));
        assert_eq!(order.address_uuid, address.uuid);
        assert_eq!(order.shipping_address.receiver_name, address.receiver_name);
        assert_eq!(order.shipping_address.city, "Hangzhou");
        assert!(order.order_no.starts_with(numbers::ORDER_NO_PREFIX));
        assert_eq!(order.items.len(), 2);

        let item_a = order
            .items
            .iter()
            .find(|item| item.product_uuid == a.uuid)
            .ok_or("missing item for product A")?;

        assert_eq!(item_a.product_name, "A");
        assert_eq!(item_a.price, Decimal::new(1999, 2));
        assert_eq!(item_a.quantity, 2);
        assert_eq!(item_a.subtotal, Decimal::new(3998, 2));

        Ok(())
    }

    #[tokio::test]
    async fn create_order_consumes_cart_lines_and_stock() -> TestResult {
        let ctx = TestContext::new().await;
        let address = create_address(&ctx, ctx.user_uuid).await;
        let bought = create_product(&ctx, "Bought", Decimal::ONE, 10).await;
        let kept = create_product(&ctx, "Kept", Decimal::ONE, 10).await;

        let line = add_item(&ctx, ctx.user_uuid, bought.uuid, 3).await?;
        add_item(&ctx, ctx.user_uuid, kept.uuid, 1).await?;

        ctx.orders
            .create_order(
                ctx.user_uuid,
                NewOrder {
                    address_uuid: address.uuid,
                    cart_item_uuids: vec![line.item.uuid],
                    remarks: None,
                },
            )
            .await?;

        let cart = ctx.carts.get_cart(ctx.user_uuid).await?;

        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.items.first().map(|item| item.product_uuid), Some(kept.uuid));
        assert_eq!(product_stock(&ctx, bought.uuid).await, 7);
        assert_eq!(product_stock(&ctx, kept.uuid).await, 10);

        Ok(())
    }

    #[tokio::test]
    async fn order_items_keep_price_after_product_changes() -> TestResult {
        let ctx = TestContext::new().await;
        let address = create_address(&ctx, ctx.user_uuid).await;
        let product = create_product(&ctx, "Original", Decimal::new(1000, 2), 10).await;
        let line = add_item(&ctx, ctx.user_uuid, product.uuid, 1).await?;

        let order = ctx
            .orders
            .create_order(
                ctx.user_uuid,
                NewOrder {
                    address_uuid: address.uuid,
                    cart_item_uuids: vec![line.item.uuid],
                    remarks: None,
                },
            )
            .await?;

        ctx.products
            .update_product(
                product.uuid,
                ProductUpdate {
                    name: "Renamed".to_string(),
                    main_image: "https://img.example/new.png".to_string(),
                    price: Decimal::new(9900, 2),
                    stock: 50,
                    is_active: true,
                },
            )
            .await?;

        let fetched = ctx.orders.get_order(ctx.user_uuid, order.uuid).await?;
        let item = fetched.items.first().ok_or("order should have one item")?;

        assert_eq!(item.product_name, "Original");
        assert_eq!(item.price, Decimal::new(1000, 2));
        assert_eq!(fetched.total_amount, Decimal::new(1000, 2));

        Ok(())
    }

    #[tokio::test]
    async fn ordered_product_cannot_be_deleted() -> TestResult {
        let ctx = TestContext::new().await;
        let address = create_address(&ctx, ctx.user_uuid).await;
        let product = create_product(&ctx, "Kept", Decimal::ONE, 10).await;
        let line = add_item(&ctx, ctx.user_uuid, product.uuid, 1).await?;

        ctx.orders
            .create_order(
                ctx.user_uuid,
                NewOrder {
                    address_uuid: address.uuid,
                    cart_item_uuids: vec![line.item.uuid],
                    remarks: None,
                },
            )
            .await?;

        let result = ctx.products.delete_product(product.uuid).await;

        assert!(
            matches!(result, Err(ProductsServiceError::InvalidReference)),
            "expected InvalidReference, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn create_order_unknown_address_returns_address_not_found() -> TestResult {
        let ctx = TestContext::new().await;
        let product = create_product(&ctx, "A", Decimal::ONE, 10).await;
        let line = add_item(&ctx, ctx.user_uuid, product.uuid, 1).await?;

        let result = ctx
            .orders
            .create_order(
                ctx.user_uuid,
                NewOrder {
                    address_uuid: AddressUuid::new(),
                    cart_item_uuids: vec![line.item.uuid],
                    remarks: None,
                },
            )
            .await;

        assert!(
            matches!(result, Err(OrdersServiceError::AddressNotFound)),
            "expected AddressNotFound, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn create_order_with_other_users_address_returns_address_not_owned() -> TestResult {
        let ctx = TestContext::new().await;
        let other = ctx.create_user("mallory").await;
        let address = create_address(&ctx, other).await;
        let product = create_product(&ctx, "A", Decimal::ONE, 10).await;
        let line = add_item(&ctx, ctx.user_uuid, product.uuid, 1).await?;

        let result = ctx
            .orders
            .create_order(
                ctx.user_uuid,
                NewOrder {
                    address_uuid: address.uuid,
                    cart_item_uuids: vec![line.item.uuid],
                    remarks: None,
                },
            )
            .await;

        assert!(
            matches!(result, Err(OrdersServiceError::AddressNotOwned)),
            "expected AddressNotOwned, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn create_order_with_unknown_cart_item_lists_missing_ids() -> TestResult {
        let ctx = TestContext::new().await;
        let address = create_address(&ctx, ctx.user_uuid).await;
        let product = create_product(&ctx, "A", Decimal::ONE, 10).await;
        let line = add_item(&ctx, ctx.user_uuid, product.uuid, 1).await?;
        let missing = CartItemUuid::new();

        let result = ctx
            .orders
            .create_order(
                ctx.user_uuid,
                NewOrder {
                    address_uuid: address.uuid,
                    cart_item_uuids: vec![line.item.uuid, missing],
                    remarks: None,
                },
            )
            .await;

        assert!(
            matches!(&result, Err(OrdersServiceError::CartItemsNotFound(ids)) if *ids == [missing]),
            "expected CartItemsNotFound listing the unknown id, got {result:?}"
        );

        assert_eq!(
            ctx.carts.get_cart(ctx.user_uuid).await?.items.len(),
            1,
            "failed checkout must leave the cart untouched"
        );

        Ok(())
    }

    #[tokio::test]
    async fn create_order_with_other_users_cart_item_is_rejected() -> TestResult {
        let ctx = TestContext::new().await;
        let other = ctx.create_user("mallory").await;
        let address = create_address(&ctx, ctx.user_uuid).await;
        let product = create_product(&ctx, "A", Decimal::ONE, 10).await;
        let foreign = add_item(&ctx, other, product.uuid, 1).await?;

        let result = ctx
            .orders
            .create_order(
                ctx.user_uuid,
                NewOrder {
                    address_uuid: address.uuid,
                    cart_item_uuids: vec![foreign.item.uuid],
                    remarks: None,
                },
            )
            .await;

        assert!(
            matches!(result, Err(OrdersServiceError::CartItemsNotFound(_))),
            "expected CartItemsNotFound, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn create_order_above_stock_rolls_back() -> TestResult {
        let ctx = TestContext::new().await;
        let address = create_address(&ctx, ctx.user_uuid).await;
        let product = create_product(&ctx, "Scarce", Decimal::ONE, 5).await;
        let line = add_item(&ctx, ctx.user_uuid, product.uuid, 5).await?;

        ctx.products
            .update_product(
                product.uuid,
                ProductUpdate {
                    name: product.name.clone(),
                    main_image: product.main_image.clone(),
                    price: product.price,
                    stock: 2,
                    is_active: true,
                },
            )
            .await?;

        let result = ctx
            .orders
            .create_order(
                ctx.user_uuid,
                NewOrder {
                    address_uuid: address.uuid,
                    cart_item_uuids: vec![line.item.uuid],
                    remarks: None,
                },
            )
            .await;

        assert!(
            matches!(
                result,
                Err(OrdersServiceError::InsufficientStock { available: 2, .. })
            ),
            "expected InsufficientStock, got {result:?}"
        );

        assert!(ctx.orders.list_orders(ctx.user_uuid).await?.is_empty());
        assert_eq!(ctx.carts.get_cart(ctx.user_uuid).await?.items.len(), 1);
        assert_eq!(product_stock(&ctx, product.uuid).await, 2);

        Ok(())
    }

    #[tokio::test]
    async fn create_order_with_inactive_product_returns_product_unavailable() -> TestResult {
        let ctx = TestContext::new().await;
        let address = create_address(&ctx, ctx.user_uuid).await;
        let product = create_product(&ctx, "Retired", Decimal::ONE, 5).await;
        let line = add_item(&ctx, ctx.user_uuid, product.uuid, 1).await?;

        ctx.products
            .update_product(
                product.uuid,
                ProductUpdate {
                    name: product.name.clone(),
                    main_image: product.main_image.clone(),
                    price: product.price,
                    stock: product.stock,
                    is_active: false,
                },
            )
            .await?;

        let result = ctx
            .orders
            .create_order(
                ctx.user_uuid,
                NewOrder {
                    address_uuid: address.uuid,
                    cart_item_uuids: vec![line.item.uuid],
                    remarks: None,
                },
            )
            .await;

        assert!(
            matches!(result, Err(OrdersServiceError::ProductUnavailable(uuid)) if uuid == product.uuid),
            "expected ProductUnavailable, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn exhausted_order_numbers_roll_back_checkout() -> TestResult {
        let ctx = TestContext::new().await;
        let orders =
            PgOrdersService::with_order_numbers(ctx.app_db.clone(), || "ORDFIXED".to_string());
        let address = create_address(&ctx, ctx.user_uuid).await;
        let a = create_product(&ctx, "A", Decimal::ONE, 5).await;
        let b = create_product(&ctx, "B", Decimal::ONE, 5).await;
        let first = add_item(&ctx, ctx.user_uuid, a.uuid, 1).await?;
        let second = add_item(&ctx, ctx.user_uuid, b.uuid, 1).await?;

        orders
            .create_order(
                ctx.user_uuid,
                NewOrder {
                    address_uuid: address.uuid,
                    cart_item_uuids: vec![first.item.uuid],
                    remarks: None,
                },
            )
            .await?;

        let result = orders
            .create_order(
                ctx.user_uuid,
                NewOrder {
                    address_uuid: address.uuid,
                    cart_item_uuids: vec![second.item.uuid],
                    remarks: None,
                },
            )
            .await;

        assert!(
            matches!(result, Err(OrdersServiceError::OrderNumberExhausted)),
            "expected OrderNumberExhausted, got {result:?}"
        );

        assert_eq!(ctx.orders.list_orders(ctx.user_uuid).await?.len(), 1);
        assert_eq!(ctx.carts.get_cart(ctx.user_uuid).await?.items.len(), 1);
        assert_eq!(product_stock(&ctx, b.uuid).await, 5);

        Ok(())
    }

    #[tokio::test]
    async fn concurrent_checkouts_of_same_line_create_one_order() -> TestResult {
        let ctx = TestContext::new().await;
        let address = create_address(&ctx, ctx.user_uuid).await;
        let product = create_product(&ctx, "Hot", Decimal::new(1500, 2), 10).await;
        let line = add_item(&ctx, ctx.user_uuid, product.uuid, 2).await?;

        let checkout = || {
            ctx.orders.create_order(
                ctx.user_uuid,
                NewOrder {
                    address_uuid: address.uuid,
                    cart_item_uuids: vec![line.item.uuid],
                    remarks: None,
                },
            )
        };

        let (first, second) = tokio::join!(checkout(), checkout());

        let succeeded = [first.is_ok(), second.is_ok()]
            .iter()
            .filter(|ok| **ok)
            .count();

        assert_eq!(succeeded, 1, "exactly one checkout must win: {first:?} / {second:?}");

        for result in [&first, &second] {
            if let Err(error) = result {
                assert!(
                    matches!(error, OrdersServiceError::CartItemsNotFound(_)),
                    "loser should see the line gone, got {error:?}"
                );
            }
        }

        let orders = ctx.orders.list_orders(ctx.user_uuid).await?;

        assert_eq!(orders.len(), 1);
        assert_eq!(orders.first().map(|order| order.items.len()), Some(1));
        assert_eq!(product_stock(&ctx, product.uuid).await, 8);

        Ok(())
    }

    #[tokio::test]
    async fn add_item_during_checkout_of_same_product_settles_both() -> TestResult {
        let ctx = TestContext::new().await;
        let address = create_address(&ctx, ctx.user_uuid).await;
        let product = create_product(&ctx, "Hot", Decimal::ONE, 10).await;
        let line = add_item(&ctx, ctx.user_uuid, product.uuid, 2).await?;

        let checkout = ctx.orders.create_order(
            ctx.user_uuid,
            NewOrder {
                address_uuid: address.uuid,
                cart_item_uuids: vec![line.item.uuid],
                remarks: None,
            },
        );

        let (order, added) = tokio::join!(
            checkout,
            add_item(&ctx, ctx.user_uuid, product.uuid, 1)
        );

        let order = order?;
        added?;

        let ordered = order
            .items
            .first()
            .map(|item| item.quantity)
            .ok_or("order should have one item")?;

        let in_cart: u32 = ctx
            .carts
            .get_cart(ctx.user_uuid)
            .await?
            .items
            .iter()
            .map(|item| item.quantity)
            .sum();

        // Either the increment lands before checkout (3 ordered, cart empty)
        // or after it (2 ordered, a fresh line of 1).
        assert_eq!(ordered + in_cart, 3);
        assert_eq!(product_stock(&ctx, product.uuid).await, 10 - ordered);

        Ok(())
    }

    #[tokio::test]
    async fn update_quantity_during_checkout_of_same_line_never_fails_with_storage_error()
    -> TestResult {
        let ctx = TestContext::new().await;
        let address = create_address(&ctx, ctx.user_uuid).await;
        let product = create_product(&ctx, "Hot", Decimal::ONE, 10).await;
        let line = add_item(&ctx, ctx.user_uuid, product.uuid, 2).await?;

        let checkout = ctx.orders.create_order(
            ctx.user_uuid,
            NewOrder {
                address_uuid: address.uuid,
                cart_item_uuids: vec![line.item.uuid],
                remarks: None,
            },
        );

        let (order, updated) = tokio::join!(
            checkout,
            ctx.carts.update_quantity(ctx.user_uuid, line.item.uuid, 4)
        );

        let order = order?;

        let ordered = order
            .items
            .first()
            .map(|item| item.quantity)
            .ok_or("order should have one item")?;

        match updated {
            Ok(_) => assert_eq!(ordered, 4, "update landed first"),
            Err(CartsServiceError::NotFound) => assert_eq!(ordered, 2, "checkout landed first"),
            Err(error) => return Err(format!("unexpected cart error: {error:?}").into()),
        }

        assert_eq!(product_stock(&ctx, product.uuid).await, 10 - ordered);

        Ok(())
    }

    #[tokio::test]
    async fn concurrent_cancels_of_orders_sharing_products_restore_all_stock() -> TestResult {
        let ctx = TestContext::new().await;
        let address = create_address(&ctx, ctx.user_uuid).await;
        let a = create_product(&ctx, "A", Decimal::ONE, 10).await;
        let b = create_product(&ctx, "B", Decimal::ONE, 10).await;

        let mut placed = Vec::new();

        for (first, second) in [(a.uuid, b.uuid), (b.uuid, a.uuid)] {
            let first = add_item(&ctx, ctx.user_uuid, first, 1).await?;
            let second = add_item(&ctx, ctx.user_uuid, second, 2).await?;

            let order = ctx
                .orders
                .create_order(
                    ctx.user_uuid,
                    NewOrder {
                        address_uuid: address.uuid,
                        cart_item_uuids: vec![first.item.uuid, second.item.uuid],
                        remarks: None,
                    },
                )
                .await?;

            placed.push(order.uuid);
        }

        assert_eq!(product_stock(&ctx, a.uuid).await, 7);
        assert_eq!(product_stock(&ctx, b.uuid).await, 7);

        let [first, second] = placed.as_slice() else {
            return Err("expected two orders".into());
        };

        let (first, second) = tokio::join!(
            ctx.orders.cancel_order(ctx.user_uuid, *first),
            ctx.orders.cancel_order(ctx.user_uuid, *second)
        );

        first?;
        second?;

        assert_eq!(product_stock(&ctx, a.uuid).await, 10);
        assert_eq!(product_stock(&ctx, b.uuid).await, 10);

        Ok(())
    }

    #[tokio::test]
    async fn checkout_then_payment_end_to_end() -> TestResult {
        let ctx = TestContext::new().await;
        let address = create_address(&ctx, ctx.user_uuid).await;
        let product = create_product(&ctx, "Kettle", Decimal::new(10000, 2), 5).await;

        let line = add_item(&ctx, ctx.user_uuid, product.uuid, 2).await?;

        let cart = ctx.carts.get_cart(ctx.user_uuid).await?;

        assert_eq!(cart.total_items, 2);
        assert_eq!(cart.total_amount.to_string(), "200.00");

        let order = ctx
            .orders
            .create_order(
                ctx.user_uuid,
                NewOrder {
                    address_uuid: address.uuid,
                    cart_item_uuids: vec![line.item.uuid],
                    remarks: None,
                },
            )
            .await?;

        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.actual_amount.to_string(), "200.00");
        assert!(ctx.carts.get_cart(ctx.user_uuid).await?.items.is_empty());
        assert_eq!(product_stock(&ctx, product.uuid).await, 3);

        let intent = ctx
            .payments
            .initiate_payment(ctx.user_uuid, order.uuid)
            .await?;

        assert_eq!(intent.amount, order.actual_amount);
        assert_eq!(intent.status, OrderStatus::Pending);

        let receipt = ctx
            .payments
            .confirm_payment(ctx.user_uuid, order.uuid, PaymentMethod::Alipay)
            .await?;

        assert_eq!(receipt.status, OrderStatus::Paid);
        assert!(receipt.paid_at.is_some());

        let status = ctx.payments.payment_status(ctx.user_uuid, order.uuid).await?;

        assert_eq!(status.status, OrderStatus::Paid);
        assert_eq!(status.paid_at, receipt.paid_at);

        let again = ctx
            .payments
            .confirm_payment(ctx.user_uuid, order.uuid, PaymentMethod::Alipay)
            .await;

        assert!(
            matches!(
                again,
                Err(PaymentsServiceError::InvalidState {
                    status: OrderStatus::Paid
                })
            ),
            "expected InvalidState, got {again:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn list_orders_is_newest_first_and_isolated() -> TestResult {
        let ctx = TestContext::new().await;
        let address = create_address(&ctx, ctx.user_uuid).await;
        let a = create_product(&ctx, "A", Decimal::ONE, 5).await;
        let b = create_product(&ctx, "B", Decimal::ONE, 5).await;

        let mut placed = Vec::new();

        for product in [a.uuid, b.uuid] {
            let line = add_item(&ctx, ctx.user_uuid, product, 1).await?;

            let order = ctx
                .orders
                .create_order(
                    ctx.user_uuid,
                    NewOrder {
                        address_uuid: address.uuid,
                        cart_item_uuids: vec![line.item.uuid],
                        remarks: None,
                    },
                )
                .await?;

            placed.push(order.uuid);
        }

        let listed: Vec<OrderUuid> = ctx
            .orders
            .list_orders(ctx.user_uuid)
            .await?
            .iter()
            .map(|order| order.uuid)
            .collect();

        placed.reverse();
        assert_eq!(listed, placed);

        let other = ctx.create_user("mallory").await;

        assert!(ctx.orders.list_orders(other).await?.is_empty());

        let newest = *listed.first().ok_or("no orders listed")?;
        let result = ctx.orders.get_order(other, newest).await;

        assert!(
            matches!(result, Err(OrdersServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn cancel_order_restores_stock_and_stamps_time() -> TestResult {
        let ctx = TestContext::new().await;
        let address = create_address(&ctx, ctx.user_uuid).await;
        let product = create_product(&ctx, "A", Decimal::ONE, 10).await;
        let line = add_item(&ctx, ctx.user_uuid, product.uuid, 4).await?;

        let order = ctx
            .orders
            .create_order(
                ctx.user_uuid,
                NewOrder {
                    address_uuid: address.uuid,
                    cart_item_uuids: vec![line.item.uuid],
                    remarks: None,
                },
            )
            .await?;

        assert_eq!(product_stock(&ctx, product.uuid).await, 6);

        let cancelled = ctx.orders.cancel_order(ctx.user_uuid, order.uuid).await?;

        assert_eq!(cancelled.status, OrderStatus::Cancelled);
        assert!(cancelled.cancelled_at.is_some());
        assert_eq!(cancelled.items.len(), 1);
        assert_eq!(cancelled.shipping_address.detail, address.detail);
        assert_eq!(product_stock(&ctx, product.uuid).await, 10);

        Ok(())
    }

    #[tokio::test]
    async fn cancel_order_twice_returns_invalid_state() -> TestResult {
        let ctx = TestContext::new().await;
        let address = create_address(&ctx, ctx.user_uuid).await;
        let product = create_product(&ctx, "A", Decimal::ONE, 10).await;
        let line = add_item(&ctx, ctx.user_uuid, product.uuid, 1).await?;

        let order = ctx
            .orders
            .create_order(
                ctx.user_uuid,
                NewOrder {
                    address_uuid: address.uuid,
                    cart_item_uuids: vec![line.item.uuid],
                    remarks: None,
                },
            )
            .await?;

        ctx.orders.cancel_order(ctx.user_uuid, order.uuid).await?;

        let result = ctx.orders.cancel_order(ctx.user_uuid, order.uuid).await;

        assert!(
            matches!(
                result,
                Err(OrdersServiceError::InvalidState {
                    status: OrderStatus::Cancelled
                })
            ),
            "expected InvalidState, got {result:?}"
        );
        assert_eq!(product_stock(&ctx, product.uuid).await, 10);

        Ok(())
    }

    #[tokio::test]
    async fn paid_order_cannot_be_cancelled() -> TestResult {
        let ctx = TestContext::new().await;
        let address = create_address(&ctx, ctx.user_uuid).await;
        let product = create_product(&ctx, "A", Decimal::ONE, 10).await;
        let line = add_item(&ctx, ctx.user_uuid, product.uuid, 1).await?;

        let order = ctx
            .orders
            .create_order(
                ctx.user_uuid,
                NewOrder {
                    address_uuid: address.uuid,
                    cart_item_uuids: vec![line.item.uuid],
                    remarks: None,
                },
            )
            .await?;

        ctx.payments
            .confirm_payment(ctx.user_uuid, order.uuid, PaymentMethod::Alipay)
            .await?;

        let result = ctx.orders.cancel_order(ctx.user_uuid, order.uuid).await;

        assert!(
            matches!(
                result,
                Err(OrdersServiceError::InvalidState {
                    status: OrderStatus::Paid
                })
            ),
            "expected InvalidState, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn cancel_unknown_order_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx.orders.cancel_order(ctx.user_uuid, OrderUuid::new()).await;

        assert!(
            matches!(result, Err(OrdersServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }
}

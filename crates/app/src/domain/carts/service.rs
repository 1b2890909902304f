//! Carts service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::{
        carts::{
            data::NewCartItem,
            errors::CartsServiceError,
            records::{AddedCartItem, Cart, CartItemRecord, CartItemUuid},
            repository::PgCartItemsRepository,
        },
        users::records::UserUuid,
    },
};

#[derive(Debug, Clone)]
pub struct PgCartsService {
    db: Db,
    repository: PgCartItemsRepository,
}

impl PgCartsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgCartItemsRepository::new(),
        }
    }
}

fn checked_quantity(quantity: i32) -> Result<u32, CartsServiceError> {
    u32::try_from(quantity)
        .ok()
        .filter(|quantity| *quantity >= 1)
        .ok_or(CartsServiceError::InvalidQuantity)
}

#[async_trait]
impl CartsService for PgCartsService {
    async fn get_cart(&self, user: UserUuid) -> Result<Cart, CartsServiceError> {
        let mut tx = self.db.begin_user_transaction(user).await?;

        let items = self.repository.list_cart_items(&mut tx, user).await?;

        tx.commit().await?;

        Ok(Cart::from_items(items))
    }

    async fn add_item(
        &self,
        user: UserUuid,
        item: NewCartItem,
    ) -> Result<AddedCartItem, CartsServiceError> {
        let requested = checked_quantity(item.quantity)?;

        let mut tx = self.db.begin_user_transaction(user).await?;

        let product = self
            .repository
            .lock_product_stock(&mut tx, item.product_uuid)
            .await?
            .filter(|product| product.is_active)
            .ok_or(CartsServiceError::ProductNotFound)?;

        if requested > product.stock {
            return Err(CartsServiceError::InsufficientStock {
                available: product.stock,
            });
        }

        let upserted = self
            .repository
            .upsert_cart_item(&mut tx, user, item.product_uuid, item.quantity)
            .await?;

        // Dropping `tx` here rolls the increment back.
        if upserted.quantity > product.stock {
            return Err(CartsServiceError::InsufficientStock {
                available: product.stock,
            });
        }

        let record = self
            .repository
            .get_cart_item(&mut tx, user, upserted.uuid)
            .await?;

        tx.commit().await?;

        Ok(AddedCartItem {
            item: record,
            created: upserted.created,
        })
    }

    async fn update_quantity(
        &self,
        user: UserUuid,
        item: CartItemUuid,
        quantity: i32,
    ) -> Result<CartItemRecord, CartsServiceError> {
        let requested = checked_quantity(quantity)?;

        let mut tx = self.db.begin_user_transaction(user).await?;

        let product_uuid = self
            .repository
            .find_cart_item_product(&mut tx, user, item)
            .await?
            .ok_or(CartsServiceError::NotFound)?;

        // Product before cart line, the same order checkout locks in.
        let product = self
            .repository
            .lock_product_stock(&mut tx, product_uuid)
            .await?
            .ok_or(CartsServiceError::ProductNotFound)?;

        self.repository
            .lock_cart_item(&mut tx, user, item)
            .await?
            .ok_or(CartsServiceError::NotFound)?;

        if requested > product.stock {
            return Err(CartsServiceError::InsufficientStock {
                available: product.stock,
            });
        }

        self.repository
            .update_cart_item_quantity(&mut tx, user, item, quantity)
            .await?;

        let record = self.repository.get_cart_item(&mut tx, user, item).await?;

        tx.commit().await?;

        Ok(record)
    }

    async fn remove_item(
        &self,
        user: UserUuid,
        item: CartItemUuid,
    ) -> Result<bool, CartsServiceError> {
        let mut tx = self.db.begin_user_transaction(user).await?;

        let rows_affected = self.repository.delete_cart_item(&mut tx, user, item).await?;

        tx.commit().await?;

        Ok(rows_affected > 0)
    }

    async fn clear_cart(&self, user: UserUuid) -> Result<u64, CartsServiceError> {
        let mut tx = self.db.begin_user_transaction(user).await?;

        let rows_affected = self.repository.clear_cart(&mut tx, user).await?;

        tx.commit().await?;

        Ok(rows_affected)
    }
}

#[automock]
#[async_trait]
pub trait CartsService: Send + Sync {
    /// Retrieve the user's cart with totals.
    async fn get_cart(&self, user: UserUuid) -> Result<Cart, CartsServiceError>;

    /// Add a product to the cart, or increment the quantity of the existing line.
    async fn add_item(
        &self,
        user: UserUuid,
        item: NewCartItem,
    ) -> Result<AddedCartItem, CartsServiceError>;

    /// Set the quantity of a cart line, checked against current stock.
    async fn update_quantity(
        &self,
        user: UserUuid,
        item: CartItemUuid,
        quantity: i32,
    ) -> Result<CartItemRecord, CartsServiceError>;

    /// Remove a cart line. Returns whether anything was removed.
    async fn remove_item(&self, user: UserUuid, item: CartItemUuid)
    -> Result<bool, CartsServiceError>;

    /// Remove every line from the cart, returning how many were removed.
    async fn clear_cart(&self, user: UserUuid) -> Result<u64, CartsServiceError>;
}

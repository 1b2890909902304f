//! Products service.

use async_trait::async_trait;
use mockall::automock;
use rust_decimal::Decimal;

use crate::{
    database::Db,
    domain::products::{
        data::{NewProduct, ProductUpdate},
        errors::ProductsServiceError,
        records::{ProductRecord, ProductUuid},
        repository::PgProductsRepository,
    },
    money,
};

#[derive(Debug, Clone)]
pub struct PgProductsService {
    db: Db,
    repository: PgProductsRepository,
}

impl PgProductsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgProductsRepository::new(),
        }
    }
}

fn checked_price(price: Decimal) -> Result<Decimal, ProductsServiceError> {
    if price < Decimal::ZERO {
        return Err(ProductsServiceError::InvalidPrice);
    }

    Ok(money::quantize(price))
}

#[async_trait]
impl ProductsService for PgProductsService {
    async fn get_product(&self, product: ProductUuid) -> Result<ProductRecord, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let product = self.repository.get_product(&mut tx, product).await?;

        tx.commit().await?;

        Ok(product)
    }

    async fn create_product(
        &self,
        mut product: NewProduct,
    ) -> Result<ProductRecord, ProductsServiceError> {
        product.price = checked_price(product.price)?;

        let stock = i32::try_from(product.stock)?;

        let mut tx = self.db.begin().await?;

        let created = self
            .repository
            .create_product(&mut tx, product, stock)
            .await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn update_product(
        &self,
        product: ProductUuid,
        mut update: ProductUpdate,
    ) -> Result<ProductRecord, ProductsServiceError> {
        update.price = checked_price(update.price)?;

        let stock = i32::try_from(update.stock)?;

        let mut tx = self.db.begin().await?;

        let updated = self
            .repository
            .update_product(&mut tx, product, update, stock)
            .await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn delete_product(&self, product: ProductUuid) -> Result<(), ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self.repository.delete_product(&mut tx, product).await?;

        if rows_affected == 0 {
            return Err(ProductsServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait ProductsService: Send + Sync {
    /// Retrieve a single product.
    async fn get_product(&self, product: ProductUuid) -> Result<ProductRecord, ProductsServiceError>;

    /// Creates a new product. The price is stored with two decimal places.
    async fn create_product(&self, product: NewProduct)
    -> Result<ProductRecord, ProductsServiceError>;

    /// Replaces a product's catalog fields.
    ///
    /// Existing order items keep the name, image and price they were placed with.
    async fn update_product(
        &self,
        product: ProductUuid,
        update: ProductUpdate,
    ) -> Result<ProductRecord, ProductsServiceError>;

    /// Deletes a product. Fails with `InvalidReference` while orders reference it.
    async fn delete_product(&self, product: ProductUuid) -> Result<(), ProductsServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::test::{TestContext, helpers::new_product};

    use super::*;

    #[tokio::test]
    async fn create_product_stores_price_with_two_places() -> TestResult {
        let ctx = TestContext::new().await;

        let product = ctx
            .products
            .create_product(NewProduct {
                price: Decimal::new(1999, 2),
                ..new_product("Widget", 5)
            })
            .await?;

        assert_eq!(product.name, "Widget");
        assert_eq!(product.price.to_string(), "19.99");
        assert_eq!(product.stock, 5);
        assert!(product.is_active);

        Ok(())
    }

    #[tokio::test]
    async fn create_product_negative_price_returns_invalid_price() {
        let ctx = TestContext::new().await;

        let result = ctx
            .products
            .create_product(NewProduct {
                price: Decimal::new(-1, 2),
                ..new_product("Broken", 1)
            })
            .await;

        assert!(
            matches!(result, Err(ProductsServiceError::InvalidPrice)),
            "expected InvalidPrice, got {result:?}"
        );
    }

    #[tokio::test]
    async fn create_product_stock_out_of_range_returns_invalid_stock() {
        let ctx = TestContext::new().await;

        let result = ctx.products.create_product(new_product("Huge", u32::MAX)).await;

        assert!(
            matches!(result, Err(ProductsServiceError::InvalidStock(_))),
            "expected InvalidStock, got {result:?}"
        );
    }

    #[tokio::test]
    async fn get_product_unknown_uuid_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx.products.get_product(ProductUuid::new()).await;

        assert!(
            matches!(result, Err(ProductsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn update_product_reflects_new_price_and_stock() -> TestResult {
        let ctx = TestContext::new().await;

        let product = ctx.products.create_product(new_product("Lamp", 3)).await?;

        let updated = ctx
            .products
            .update_product(
                product.uuid,
                ProductUpdate {
                    name: "Desk Lamp".to_string(),
                    main_image: product.main_image.clone(),
                    price: Decimal::new(2450, 2),
                    stock: 7,
                    is_active: false,
                },
            )
            .await?;

        assert_eq!(updated.uuid, product.uuid);
        assert_eq!(updated.name, "Desk Lamp");
        assert_eq!(updated.price, Decimal::new(2450, 2));
        assert_eq!(updated.stock, 7);
        assert!(!updated.is_active);

        Ok(())
    }

    #[tokio::test]
    async fn delete_product_makes_it_not_found() -> TestResult {
        let ctx = TestContext::new().await;

        let product = ctx.products.create_product(new_product("Mug", 1)).await?;

        ctx.products.delete_product(product.uuid).await?;

        let result = ctx.products.get_product(product.uuid).await;

        assert!(
            matches!(result, Err(ProductsServiceError::NotFound)),
            "expected NotFound after deletion, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn delete_product_unknown_uuid_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx.products.delete_product(ProductUuid::new()).await;

        assert!(
            matches!(result, Err(ProductsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }
}

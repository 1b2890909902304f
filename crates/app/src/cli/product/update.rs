use clap::Args;
use rust_decimal::Decimal;
use storefront_app::{
    database::{self, Db},
    domain::products::{
        PgProductsService, ProductsService,
        data::ProductUpdate,
        records::{ProductRecord, ProductUuid},
    },
};
use uuid::Uuid;

/// Fields left out keep their current value.
#[derive(Debug, Args)]
pub(crate) struct UpdateProductArgs {
    /// Product to update
    #[arg(long)]
    product_uuid: Uuid,

    #[arg(long)]
    name: Option<String>,

    #[arg(long)]
    main_image: Option<String>,

    #[arg(long)]
    price: Option<Decimal>,

    #[arg(long)]
    stock: Option<u32>,

    /// Show or hide the product in the catalog
    #[arg(long)]
    active: Option<bool>,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

impl UpdateProductArgs {
    fn apply(self, current: ProductRecord) -> ProductUpdate {
        ProductUpdate {
            name: self.name.unwrap_or(current.name),
            main_image: self.main_image.unwrap_or(current.main_image),
            price: self.price.unwrap_or(current.price),
            stock: self.stock.unwrap_or(current.stock),
            is_active: self.active.unwrap_or(current.is_active),
        }
    }
}

pub(crate) async fn run(args: UpdateProductArgs) -> Result<(), String> {
    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let service = PgProductsService::new(Db::new(pool));
    let uuid = ProductUuid::from_uuid(args.product_uuid);

    let current = service
        .get_product(uuid)
        .await
        .map_err(|error| format!("failed to load product: {error}"))?;

    let product = service
        .update_product(uuid, args.apply(current))
        .await
        .map_err(|error| format!("failed to update product: {error}"))?;

    println!("product_uuid: {}", product.uuid);
    println!("name: {}", product.name);
    println!("price: {}", product.price);
    println!("stock: {}", product.stock);
    println!("is_active: {}", product.is_active);

    Ok(())
}

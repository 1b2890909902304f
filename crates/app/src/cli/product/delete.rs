use clap::Args;
use storefront_app::{
    database::{self, Db},
    domain::products::{PgProductsService, ProductsService, records::ProductUuid},
};
use uuid::Uuid;

#[derive(Debug, Args)]
pub(crate) struct DeleteProductArgs {
    /// Product to delete; fails while orders reference it
    #[arg(long)]
    product_uuid: Uuid,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

pub(crate) async fn run(args: DeleteProductArgs) -> Result<(), String> {
    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let service = PgProductsService::new(Db::new(pool));

    service
        .delete_product(ProductUuid::from_uuid(args.product_uuid))
        .await
        .map_err(|error| format!("failed to delete product: {error}"))?;

    println!("deleted product {}", args.product_uuid);

    Ok(())
}

use clap::Args;
use rust_decimal::Decimal;
use storefront_app::{
    database::{self, Db},
    domain::products::{PgProductsService, ProductsService, data::NewProduct, records::ProductUuid},
};
use uuid::Uuid;

#[derive(Debug, Args)]
pub(crate) struct CreateProductArgs {
    /// Display name
    #[arg(long)]
    name: String,

    /// Main image URL
    #[arg(long)]
    main_image: String,

    /// Unit price, e.g. 19.99
    #[arg(long)]
    price: Decimal,

    /// Units available for sale
    #[arg(long, default_value_t = 0)]
    stock: u32,

    /// Create the product hidden from the catalog
    #[arg(long)]
    inactive: bool,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// Optional product UUID; generated when omitted
    #[arg(long)]
    product_uuid: Option<Uuid>,
}

impl From<CreateProductArgs> for NewProduct {
    fn from(args: CreateProductArgs) -> Self {
        NewProduct {
            uuid: args
                .product_uuid
                .map_or_else(ProductUuid::new, ProductUuid::from_uuid),
            name: args.name,
            main_image: args.main_image,
            price: args.price,
            stock: args.stock,
            is_active: !args.inactive,
        }
    }
}

pub(crate) async fn run(args: CreateProductArgs) -> Result<(), String> {
    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let service = PgProductsService::new(Db::new(pool));

    let product = service
        .create_product(args.into())
        .await
        .map_err(|error| format!("failed to create product: {error}"))?;

    println!("product_uuid: {}", product.uuid);
    println!("name: {}", product.name);
    println!("price: {}", product.price);
    println!("stock: {}", product.stock);
    println!("is_active: {}", product.is_active);

    Ok(())
}

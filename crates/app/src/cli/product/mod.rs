use clap::{Args, Subcommand};

mod create;
mod delete;
mod update;

#[derive(Debug, Args)]
pub(crate) struct ProductCommand {
    #[command(subcommand)]
    command: ProductSubcommand,
}

#[derive(Debug, Subcommand)]
enum ProductSubcommand {
    Create(create::CreateProductArgs),
    Update(update::UpdateProductArgs),
    Delete(delete::DeleteProductArgs),
}

pub(crate) async fn run(command: ProductCommand) -> Result<(), String> {
    match command.command {
        ProductSubcommand::Create(args) => create::run(args).await,
        ProductSubcommand::Update(args) => update::run(args).await,
        ProductSubcommand::Delete(args) => delete::run(args).await,
    }
}

use clap::{Parser, Subcommand};

use cart_forms_cli::config::ClientConfig;

mod cart;

#[derive(Debug, Parser)]
#[command(name = "cart-forms", about = "Cart form client", long_about = None)]
pub(crate) struct Cli {
    #[command(flatten)]
    pub(crate) config: ClientConfig,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Set the quantity of a cart line, as the update form does
    Update(cart::UpdateArgs),

    /// Remove a cart line, as the remove form does
    Remove(cart::RemoveArgs),

    /// Add a product to the cart
    Add(cart::AddArgs),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::Update(args) => cart::update(&self.config, args).await,
            Commands::Remove(args) => cart::remove(&self.config, args).await,
            Commands::Add(args) => cart::add(&self.config, args).await,
        }
    }
}

//! Cart Forms CLI

use std::process;

use clap::Parser;

use cart_forms_cli::observability;

use crate::cli::Cli;

mod cli;

#[tokio::main(flavor = "current_thread")]
pub async fn main() {
    let _env = dotenvy::dotenv();

    let cli = Cli::parse();

    if let Err(error) = observability::init(&cli.config.log_level) {
        eprintln!("failed to initialise logging: {error}");
        process::exit(1);
    }

    if let Err(error) = cli.run().await {
        eprintln!("{error}");
        process::exit(1);
    }
}

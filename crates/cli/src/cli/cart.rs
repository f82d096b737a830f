use clap::Args;

use cart_forms::{
    interceptor::{CartFormInterceptor, SubmitOutcome},
    routes::{CartAction, ProductId},
};
use cart_forms_cli::{
    config::ClientConfig,
    http::HttpTransport,
    terminal::{LoggingNavigator, TerminalNotifier},
};

#[derive(Debug, Args)]
pub(crate) struct UpdateArgs {
    /// Product identifier of the cart line
    product_id: String,

    /// New quantity, as typed into the quantity input
    quantity: String,
}

#[derive(Debug, Args)]
pub(crate) struct RemoveArgs {
    /// Product identifier of the cart line
    product_id: String,
}

#[derive(Debug, Args)]
pub(crate) struct AddArgs {
    /// Product identifier to add
    product_id: String,

    /// Quantity to add
    #[arg(default_value = "1")]
    quantity: String,
}

pub(crate) async fn update(config: &ClientConfig, args: UpdateArgs) -> Result<(), String> {
    submit(
        config,
        CartAction::Update(ProductId::from(args.product_id)),
        Some(&args.quantity),
    )
    .await
}

pub(crate) async fn remove(config: &ClientConfig, args: RemoveArgs) -> Result<(), String> {
    submit(
        config,
        CartAction::Remove(ProductId::from(args.product_id)),
        None,
    )
    .await
}

pub(crate) async fn add(config: &ClientConfig, args: AddArgs) -> Result<(), String> {
    submit(
        config,
        CartAction::Add(ProductId::from(args.product_id)),
        Some(&args.quantity),
    )
    .await
}

async fn submit(
    config: &ClientConfig,
    action: CartAction,
    quantity: Option<&str>,
) -> Result<(), String> {
    let interceptor = CartFormInterceptor::with_config(
        HttpTransport::new(config.base_url.clone()),
        LoggingNavigator,
        TerminalNotifier,
        config.interceptor_config(),
    );

    match interceptor.handle_submit(Some(&action), quantity).await {
        SubmitOutcome::Accepted(response) => {
            println!("{action}: {}", response.message.as_deref().unwrap_or("ok"));

            if let Some(count) = response.cart_count {
                println!("cart_count: {count}");
            }

            Ok(())
        }
        SubmitOutcome::Rejected(_) => Err(format!("{action}: refused by server")),
        SubmitOutcome::Failed(error) => Err(format!("{action}: {error}")),
        SubmitOutcome::Blocked(error) => Err(format!("{action}: {error}")),
        SubmitOutcome::Ignored => Err(format!("{action}: already in flight")),
    }
}

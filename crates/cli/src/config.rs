//! Client configuration

use cart_forms::{
    interceptor::{InterceptorConfig, ResubmitPolicy},
    quantity::QuantityPolicy,
};
use clap::{Args, ValueEnum};
use reqwest::Url;

/// Handling of quantities that are not whole counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum QuantityPolicyArg {
    /// Send the coerced value and let the server decide
    #[default]
    Forward,

    /// Refuse to send anything
    Block,
}

impl From<QuantityPolicyArg> for QuantityPolicy {
    fn from(arg: QuantityPolicyArg) -> Self {
        match arg {
            QuantityPolicyArg::Forward => Self::Forward,
            QuantityPolicyArg::Block => Self::Block,
        }
    }
}

/// Shop client configuration
#[derive(Debug, Clone, Args)]
pub struct ClientConfig {
    /// Shop base URL; cart paths are resolved against it
    #[arg(long, env = "CART_BASE_URL", default_value = "http://localhost:5000")]
    pub base_url: Url,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,

    /// Handling of quantities that are not whole counts
    #[arg(long, env = "CART_QUANTITY_POLICY", value_enum, default_value_t)]
    pub quantity_policy: QuantityPolicyArg,
}

impl ClientConfig {
    /// Interceptor settings for a one-shot command.
    ///
    /// A command sends a single request, so there is nothing to guard against.
    pub fn interceptor_config(&self) -> InterceptorConfig {
        InterceptorConfig {
            quantity_policy: self.quantity_policy.into(),
            resubmit: ResubmitPolicy::Allow,
        }
    }
}

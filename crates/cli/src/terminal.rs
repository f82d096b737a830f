//! Terminal stand-ins for the page capabilities.

use tracing::info;

use cart_forms::capabilities::{Navigator, Notifier};

/// Prints alerts to stderr.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn alert(&self, message: &str) {
        #[expect(
            clippy::print_stderr,
            reason = "alerts are how the server's refusal reaches the user"
        )]
        {
            eprintln!("{message}");
        }
    }
}

/// Logs reload requests; there is no page to refresh.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingNavigator;

impl Navigator for LoggingNavigator {
    fn reload(&self) {
        info!("request settled; a page would reload now");
    }
}

//! Reload and alert through the browser window.

use cart_forms::capabilities::{Navigator, Notifier};
use tracing::error;
use web_sys::Window;

#[derive(Debug, Clone)]
pub(crate) struct BrowserWindow {
    window: Window,
}

impl BrowserWindow {
    pub(crate) fn new(window: Window) -> Self {
        Self { window }
    }
}

impl Navigator for BrowserWindow {
    fn reload(&self) {
        if let Err(error) = self.window.location().reload() {
            error!("failed to reload page: {error:?}");
        }
    }
}

impl Notifier for BrowserWindow {
    fn alert(&self, message: &str) {
        if let Err(error) = self.window.alert_with_message(message) {
            error!("failed to show alert: {error:?}");
        }
    }
}

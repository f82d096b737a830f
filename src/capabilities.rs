//! Page capabilities the interceptor needs from its host.

/// Reloads the current page.
pub trait Navigator {
    /// Request a full reload.
    fn reload(&self);
}

/// Shows blocking messages to the user.
pub trait Notifier {
    /// Show `message` and wait for acknowledgement.
    fn alert(&self, message: &str);
}

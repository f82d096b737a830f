//! Binding the interceptor to a page.
//!
//! The page is abstract so the same binding runs against a browser document or
//! an in-memory stand-in.

use std::{future::Future, pin::Pin, rc::Rc};

use tracing::{debug, warn};

use crate::{
    capabilities::{Navigator, Notifier},
    interceptor::{CartFormInterceptor, SubmitOutcome},
    routes::{CartAction, FormKind, PRODUCT_ID_ATTRIBUTE, ProductId, QUANTITY_INPUT_SELECTOR},
    transport::CartTransport,
};

/// Work left to do after a submit event has been handled synchronously.
pub type SubmitFuture = Pin<Box<dyn Future<Output = SubmitOutcome>>>;

/// Callback run for each submit event on a bound form.
pub type SubmitListener = Box<dyn Fn(&dyn SubmitEvent) -> SubmitFuture>;

/// A form submission event.
pub trait SubmitEvent {
    /// Stop the browser from performing the form's own submission.
    fn prevent_default(&self);
}

/// A cart form on the page.
pub trait CartForm: Clone + 'static {
    /// Returns the value of attribute `name`, if present.
    fn attribute(&self, name: &str) -> Option<String>;

    /// Returns the current value of the first descendant input matching
    /// `selector`, if there is one.
    fn input_value(&self, selector: &str) -> Option<String>;

    /// Register `listener` for the form's submit events.
    ///
    /// The listener suppresses native submission before returning; the host
    /// drives the returned future to completion.
    fn on_submit(&self, listener: SubmitListener);
}

/// A page that can be searched for cart forms.
pub trait CartPage {
    /// Form handle type.
    type Form: CartForm;

    /// Returns every form matching `selector`, in document order.
    fn query_forms(&self, selector: &str) -> Vec<Self::Form>;
}

/// Bind `interceptor` to every update and remove form on `page`.
///
/// Product identifiers are read once here. Returns the number of forms bound.
pub fn initialize<P, T, N, A>(page: &P, interceptor: &Rc<CartFormInterceptor<T, N, A>>) -> usize
where
    P: CartPage,
    T: CartTransport + 'static,
    N: Navigator + 'static,
    A: Notifier + 'static,
{
    let mut bound = 0_usize;

    for kind in FormKind::ALL {
        for form in page.query_forms(kind.selector()) {
            let action = form
                .attribute(PRODUCT_ID_ATTRIBUTE)
                .map(|id| kind.action(ProductId::from(id)));

            if action.is_none() {
                warn!(
                    selector = kind.selector(),
                    "binding cart form without {PRODUCT_ID_ATTRIBUTE}"
                );
            }

            bind(form, action, Rc::clone(interceptor));

            bound = bound.saturating_add(1);
        }
    }

    debug!(bound, "bound cart forms");

    bound
}

fn bind<F, T, N, A>(
    form: F,
    action: Option<CartAction>,
    interceptor: Rc<CartFormInterceptor<T, N, A>>,
) where
    F: CartForm,
    T: CartTransport + 'static,
    N: Navigator + 'static,
    A: Notifier + 'static,
{
    let source = form.clone();

    form.on_submit(Box::new(move |event: &dyn SubmitEvent| -> SubmitFuture {
        event.prevent_default();

        let quantity = source.input_value(QUANTITY_INPUT_SELECTOR);
        let interceptor = Rc::clone(&interceptor);
        let action = action.clone();

        Box::pin(async move {
            interceptor
                .handle_submit(action.as_ref(), quantity.as_deref())
                .await
        })
    }));
}

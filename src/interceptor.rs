//! Cart form interceptor.
//!
//! Turns one form submission into one JSON request, shows the server's failure
//! message when there is one, then reloads the page so it reflects the real
//! cart state whatever happened on the wire.

use std::{cell::RefCell, collections::HashSet};

use thiserror::Error;
use tracing::{debug, error, warn};

use crate::{
    capabilities::{Navigator, Notifier},
    payload::{CartRequest, CartResponse},
    quantity::{Quantity, QuantityError, QuantityPolicy},
    routes::CartAction,
    transport::{CartTransport, TransportError},
};

/// Whether an action may be submitted again while its request is in flight.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ResubmitPolicy {
    /// Every submission sends its own request.
    Allow,

    /// Submissions of an action already in flight are ignored.
    #[default]
    Suppress,
}

/// Interceptor settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InterceptorConfig {
    /// Handling of quantity text that is not a whole count.
    pub quantity_policy: QuantityPolicy,

    /// Handling of repeated submissions.
    pub resubmit: ResubmitPolicy,
}

/// Errors that end a submission after it was accepted for sending.
#[derive(Debug, Error)]
pub enum SubmitError {
    /// The form carried no product identifier.
    #[error("cart form has no data-product-id attribute")]
    MissingProductId,

    /// The request body could not be encoded.
    #[error("failed to encode request body: {0}")]
    Encode(#[source] serde_json::Error),

    /// The request could not be sent or its reply could not be read.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The reply was not a cart response.
    #[error("failed to decode response body: {0}")]
    Decode(#[source] serde_json::Error),
}

/// How a submission ended.
#[derive(Debug)]
pub enum SubmitOutcome {
    /// The server applied the change.
    Accepted(CartResponse),

    /// The server refused the change and its message was shown.
    Rejected(CartResponse),

    /// The request failed; the error was logged.
    Failed(SubmitError),

    /// The quantity was invalid and nothing was sent.
    Blocked(QuantityError),

    /// The same action was already in flight and nothing was sent.
    Ignored,
}

impl SubmitOutcome {
    /// Returns `true` when the submission ended with a page reload.
    pub fn reloaded(&self) -> bool {
        matches!(self, Self::Accepted(_) | Self::Rejected(_) | Self::Failed(_))
    }
}

/// Marks an action as in flight until dropped.
struct InFlight<'a> {
    actions: Option<&'a RefCell<HashSet<CartAction>>>,
    action: CartAction,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if let Some(actions) = self.actions {
            actions.borrow_mut().remove(&self.action);
        }
    }
}

/// Handles cart form submissions.
#[derive(Debug)]
pub struct CartFormInterceptor<T, N, A> {
    transport: T,
    navigator: N,
    notifier: A,
    config: InterceptorConfig,
    in_flight: RefCell<HashSet<CartAction>>,
}

impl<T, N, A> CartFormInterceptor<T, N, A>
where
    T: CartTransport,
    N: Navigator,
    A: Notifier,
{
    /// Create an interceptor with the default configuration.
    pub fn new(transport: T, navigator: N, notifier: A) -> Self {
        Self::with_config(transport, navigator, notifier, InterceptorConfig::default())
    }

    /// Create an interceptor with the given configuration.
    pub fn with_config(transport: T, navigator: N, notifier: A, config: InterceptorConfig) -> Self {
        Self {
            transport,
            navigator,
            notifier,
            config,
            in_flight: RefCell::new(HashSet::new()),
        }
    }

    /// Returns the active configuration.
    pub fn config(&self) -> InterceptorConfig {
        self.config
    }

    /// Handle one submission of a form bound to `action`.
    ///
    /// `raw_quantity` is the text of the form's quantity input, or `None` when
    /// the form has no such input. The page is reloaded once the request
    /// settles, whether it succeeded, was refused or failed.
    pub async fn handle_submit(
        &self,
        action: Option<&CartAction>,
        raw_quantity: Option<&str>,
    ) -> SubmitOutcome {
        let Some(action) = action else {
            let error = SubmitError::MissingProductId;

            error!("{error}");
            self.navigator.reload();

            return SubmitOutcome::Failed(error);
        };

        let quantity = match raw_quantity
            .map(|raw| Quantity::read(raw, self.config.quantity_policy))
            .transpose()
        {
            Ok(quantity) => quantity.unwrap_or_default(),
            Err(error) => {
                warn!(%action, "not submitting cart form: {error}");
                self.notifier.alert(&error.to_string());

                return SubmitOutcome::Blocked(error);
            }
        };

        let Some(_in_flight) = self.begin(action) else {
            debug!(%action, "ignoring resubmission while request is in flight");

            return SubmitOutcome::Ignored;
        };

        let request = CartRequest::new(action.clone(), quantity);

        let outcome = match self.exchange(&request).await {
            Ok(response) => {
                if let Some(message) = response.failure_message() {
                    self.notifier.alert(message);
                }

                if response.success {
                    SubmitOutcome::Accepted(response)
                } else {
                    SubmitOutcome::Rejected(response)
                }
            }
            Err(error) => {
                error!(%action, "cart request failed: {error}");

                SubmitOutcome::Failed(error)
            }
        };

        self.navigator.reload();

        outcome
    }

    async fn exchange(&self, request: &CartRequest) -> Result<CartResponse, SubmitError> {
        let body = request.body().map_err(SubmitError::Encode)?;

        debug!(action = %request.action, %body, "sending cart request");

        let reply = self.transport.send(request, body).await?;

        CartResponse::parse(&reply).map_err(SubmitError::Decode)
    }

    fn begin(&self, action: &CartAction) -> Option<InFlight<'_>> {
        match self.config.resubmit {
            ResubmitPolicy::Allow => Some(InFlight {
                actions: None,
                action: action.clone(),
            }),
            ResubmitPolicy::Suppress => {
                if !self.in_flight.borrow_mut().insert(action.clone()) {
                    return None;
                }

                Some(InFlight {
                    actions: Some(&self.in_flight),
                    action: action.clone(),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;
    use tokio::sync::oneshot;
    use tracing_test::traced_test;

    use crate::{
        payload::DEFAULT_FAILURE_MESSAGE,
        routes::ProductId,
        test::{GatedTransport, Recorder, replying},
        transport::MockCartTransport,
    };

    use super::*;

    fn update(id: &str) -> CartAction {
        CartAction::Update(ProductId::new(id))
    }

    #[tokio::test]
    async fn accepted_update_reloads_without_alert() {
        let recorder = Recorder::default();
        let mut transport = MockCartTransport::new();

        transport
            .expect_send()
            .once()
            .withf(|request, body| {
                request.path() == "/cart/update/5" && body == r#"{"quantity":3}"#
            })
            .return_once(|_, _| Ok(r#"{"success": true, "cart_count": 3}"#.to_string()));

        let interceptor = CartFormInterceptor::new(transport, recorder.clone(), recorder.clone());

        let outcome = interceptor.handle_submit(Some(&update("5")), Some("3")).await;

        assert!(
            matches!(outcome, SubmitOutcome::Accepted(ref response) if response.cart_count == Some(3)),
            "expected Accepted, got {outcome:?}"
        );
        assert_eq!(recorder.reloads(), 1);
        assert!(recorder.alerts().is_empty());
    }

    #[tokio::test]
    async fn rejected_update_alerts_server_message() {
        let recorder = Recorder::default();
        let transport = replying(r#"{"success": false, "message": "Out of stock"}"#);

        let interceptor = CartFormInterceptor::new(transport, recorder.clone(), recorder.clone());

        let outcome = interceptor.handle_submit(Some(&update("5")), Some("9")).await;

        assert!(
            matches!(outcome, SubmitOutcome::Rejected(_)),
            "expected Rejected, got {outcome:?}"
        );
        assert_eq!(recorder.alerts(), vec!["Out of stock".to_string()]);
        assert_eq!(recorder.reloads(), 1);
    }

    #[tokio::test]
    async fn rejected_update_without_message_alerts_default() {
        let recorder = Recorder::default();
        let transport = replying(r#"{"success": false}"#);

        let interceptor = CartFormInterceptor::new(transport, recorder.clone(), recorder.clone());

        interceptor.handle_submit(Some(&update("5")), Some("1")).await;

        assert_eq!(recorder.alerts(), vec![DEFAULT_FAILURE_MESSAGE.to_string()]);
        assert_eq!(recorder.reloads(), 1);
    }

    #[tokio::test]
    #[traced_test]
    async fn transport_failure_reloads_without_alert() {
        let recorder = Recorder::default();
        let mut transport = MockCartTransport::new();

        transport
            .expect_send()
            .once()
            .return_once(|_, _| Err(TransportError::Request("connection refused".to_string())));

        let interceptor = CartFormInterceptor::new(transport, recorder.clone(), recorder.clone());

        let outcome = interceptor.handle_submit(Some(&update("5")), Some("2")).await;

        assert!(
            matches!(outcome, SubmitOutcome::Failed(SubmitError::Transport(_))),
            "expected transport failure, got {outcome:?}"
        );
        assert!(logs_contain("cart request failed: request failed: connection refused"));
        assert!(recorder.alerts().is_empty());
        assert_eq!(recorder.reloads(), 1);
    }

    #[tokio::test]
    #[traced_test]
    async fn unexpected_body_is_a_decode_failure() {
        let recorder = Recorder::default();
        let transport = replying("<html>Internal Server Error</html>");

        let interceptor = CartFormInterceptor::new(transport, recorder.clone(), recorder.clone());

        let outcome = interceptor.handle_submit(Some(&update("5")), Some("2")).await;

        assert!(
            matches!(outcome, SubmitOutcome::Failed(SubmitError::Decode(_))),
            "expected decode failure, got {outcome:?}"
        );
        assert!(logs_contain("cart request failed: failed to decode response body"));
        assert!(recorder.alerts().is_empty());
        assert_eq!(recorder.reloads(), 1);
    }

    #[tokio::test]
    async fn missing_quantity_input_sends_zero() {
        let recorder = Recorder::default();
        let mut transport = MockCartTransport::new();

        transport
            .expect_send()
            .once()
            .withf(|request, body| {
                request.path() == "/cart/remove/5" && body == r#"{"quantity":0}"#
            })
            .return_once(|_, _| Ok(r#"{"success": true}"#.to_string()));

        let interceptor = CartFormInterceptor::new(transport, recorder.clone(), recorder.clone());

        let action = CartAction::Remove(ProductId::new("5"));
        let outcome = interceptor.handle_submit(Some(&action), None).await;

        assert!(outcome.reloaded());
    }

    #[tokio::test]
    async fn non_numeric_quantity_is_forwarded_by_default() {
        let recorder = Recorder::default();
        let mut transport = MockCartTransport::new();

        transport
            .expect_send()
            .once()
            .withf(|_, body| body == r#"{"quantity":null}"#)
            .return_once(|_, _| Ok(r#"{"success": false, "message": "Invalid quantity."}"#.to_string()));

        let interceptor = CartFormInterceptor::new(transport, recorder.clone(), recorder.clone());

        interceptor.handle_submit(Some(&update("5")), Some("abc")).await;

        assert_eq!(recorder.alerts(), vec!["Invalid quantity.".to_string()]);
        assert_eq!(recorder.reloads(), 1);
    }

    #[tokio::test]
    async fn non_numeric_quantity_is_blocked_when_configured() {
        let recorder = Recorder::default();
        let mut transport = MockCartTransport::new();

        transport.expect_send().never();

        let interceptor = CartFormInterceptor::with_config(
            transport,
            recorder.clone(),
            recorder.clone(),
            InterceptorConfig {
                quantity_policy: QuantityPolicy::Block,
                ..InterceptorConfig::default()
            },
        );

        let outcome = interceptor.handle_submit(Some(&update("5")), Some("abc")).await;

        assert!(
            matches!(outcome, SubmitOutcome::Blocked(QuantityError::NotANumber(_))),
            "expected Blocked, got {outcome:?}"
        );
        assert_eq!(recorder.alerts().len(), 1);
        assert_eq!(recorder.reloads(), 0);
    }

    #[tokio::test]
    #[traced_test]
    async fn missing_product_reloads_without_request() {
        let recorder = Recorder::default();
        let mut transport = MockCartTransport::new();

        transport.expect_send().never();

        let interceptor = CartFormInterceptor::new(transport, recorder.clone(), recorder.clone());

        let outcome = interceptor.handle_submit(None, Some("1")).await;

        assert!(
            matches!(outcome, SubmitOutcome::Failed(SubmitError::MissingProductId)),
            "expected MissingProductId, got {outcome:?}"
        );
        assert!(logs_contain("cart form has no data-product-id attribute"));
        assert_eq!(recorder.reloads(), 1);
    }

    #[tokio::test]
    async fn resubmission_is_ignored_while_in_flight() -> TestResult {
        let recorder = Recorder::default();
        let (reply, pending) = oneshot::channel();
        let transport = GatedTransport::new(pending);

        let interceptor = CartFormInterceptor::new(transport, recorder.clone(), recorder.clone());
        let action = update("5");

        let mut first = Box::pin(interceptor.handle_submit(Some(&action), Some("2")));

        let settled = tokio::select! {
            biased;
            outcome = &mut first => Some(outcome),
            () = tokio::task::yield_now() => None,
        };

        assert!(settled.is_none(), "first submission should wait for its reply");

        let second = interceptor.handle_submit(Some(&action), Some("2")).await;

        assert!(
            matches!(second, SubmitOutcome::Ignored),
            "expected Ignored, got {second:?}"
        );
        assert_eq!(recorder.reloads(), 0);

        reply.send(r#"{"success": true}"#.to_string())?;

        let first = first.await;

        assert!(
            matches!(first, SubmitOutcome::Accepted(_)),
            "expected Accepted, got {first:?}"
        );
        assert_eq!(recorder.reloads(), 1);

        let third = interceptor.handle_submit(Some(&action), Some("2")).await;

        assert!(
            !matches!(third, SubmitOutcome::Ignored),
            "in-flight marker should be released"
        );

        Ok(())
    }

    #[test]
    fn allow_policy_never_marks_actions_in_flight() {
        let recorder = Recorder::default();
        let interceptor = CartFormInterceptor::with_config(
            MockCartTransport::new(),
            recorder.clone(),
            recorder,
            InterceptorConfig {
                resubmit: ResubmitPolicy::Allow,
                ..InterceptorConfig::default()
            },
        );
        let action = update("5");

        let first = interceptor.begin(&action);
        let second = interceptor.begin(&action);

        assert!(first.is_some() && second.is_some());
    }

    #[test]
    fn suppress_policy_releases_on_drop() {
        let recorder = Recorder::default();
        let interceptor =
            CartFormInterceptor::new(MockCartTransport::new(), recorder.clone(), recorder);
        let action = update("5");

        let first = interceptor.begin(&action);

        assert!(first.is_some());
        assert!(interceptor.begin(&action).is_none());
        assert!(interceptor.begin(&update("6")).is_some());

        drop(first);

        assert!(interceptor.begin(&action).is_some());
    }
}

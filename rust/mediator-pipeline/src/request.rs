use crate::{Capabilities, Fault, ResultEnvelope};
use std::fmt::Debug;
use tokio_util::sync::CancellationToken;

/// What the inner chain hands back to a behavior: an envelope, or a fault
/// still looking for a containment boundary.
pub type Outcome<R> = Result<ResultEnvelope<<R as Request>::Output>, Fault>;

/// A typed operation input.
///
/// The associated [`Request::CAPABILITIES`] tell the pipeline which optional
/// behaviors apply to this request type.
pub trait Request: Debug + Send + Sync + 'static {
    /// Payload type of a successful envelope.
    type Output: Send + 'static;

    /// Capability tags for this request type.
    const CAPABILITIES: Capabilities = Capabilities::NONE;

    /// Name used in logs.
    fn name() -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// The terminal step that actually answers a request.
///
/// Handlers should observe `cancellation` at their own suspension points; the
/// chain additionally races the handler against the token.
#[async_trait::async_trait]
pub trait Handler<R: Request>: Send + Sync {
    /// Produce the outcome for `request`.
    async fn handle(&self, request: &R, cancellation: &CancellationToken) -> Outcome<R>;
}

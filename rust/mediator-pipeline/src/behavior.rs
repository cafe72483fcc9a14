use crate::{Capabilities, Fault, Handler, Outcome, Request};
use futures_util::future::BoxFuture;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

mod containment;
pub use containment::*;

mod logging;
pub use logging::*;

mod validation;
pub use validation::*;

/// One cross-cutting concern wrapped around request handling.
///
/// Implementations must keep per-invocation state (timers, collected
/// errors, ...) in locals of [`Behavior::invoke`]. A single instance serves
/// every request of its type, concurrently.
#[async_trait::async_trait]
pub trait Behavior<R: Request>: Send + Sync {
    /// Whether this behavior belongs in the chain of a request type with the
    /// given capabilities. Behaviors that return `false` are left out of the
    /// chain entirely, not run as no-ops.
    fn applies_to(&self, capabilities: Capabilities) -> bool {
        let _ = capabilities;
        true
    }

    /// Handle `request`, usually by running `next` somewhere inside.
    async fn invoke(
        &self,
        request: &R,
        cancellation: &CancellationToken,
        next: Next<'_, R>,
    ) -> Outcome<R>;
}

/// The remainder of the chain after the current behavior.
///
/// Consumed by [`Next::run`], so each behavior can run the rest of the chain
/// at most once.
pub struct Next<'a, R: Request> {
    behaviors: &'a [Arc<dyn Behavior<R>>],
    handler: &'a dyn Handler<R>,
    request: &'a R,
    cancellation: &'a CancellationToken,
}

impl<'a, R: Request> Next<'a, R> {
    pub(crate) fn new(
        behaviors: &'a [Arc<dyn Behavior<R>>],
        handler: &'a dyn Handler<R>,
        request: &'a R,
        cancellation: &'a CancellationToken,
    ) -> Self {
        Self {
            behaviors,
            handler,
            request,
            cancellation,
        }
    }

    /// Run the rest of the chain.
    ///
    /// Checks the cancellation token before entering the next layer and races
    /// the terminal handler against it.
    pub fn run(self) -> BoxFuture<'a, Outcome<R>> {
        let Self {
            behaviors,
            handler,
            request,
            cancellation,
        } = self;

        Box::pin(async move {
            if cancellation.is_cancelled() {
                return Err(Fault::Cancelled);
            }

            match behaviors.split_first() {
                Some((behavior, rest)) => {
                    let next = Next::new(rest, handler, request, cancellation);
                    behavior.invoke(request, cancellation, next).await
                }
                None => {
                    tokio::select! {
                        biased;
                        _ = cancellation.cancelled() => Err(Fault::Cancelled),
                        outcome = handler.handle(request, cancellation) => outcome,
                    }
                }
            }
        })
    }
}

use crate::{Behavior, Next, Outcome, Request};
use std::time::Instant;
use tokio_util::sync::CancellationToken;

/// Logs the start and completion of every request together with the elapsed
/// time. Never alters the outcome.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingBehavior;

#[async_trait::async_trait]
impl<R: Request> Behavior<R> for LoggingBehavior {
    async fn invoke(
        &self,
        _request: &R,
        _cancellation: &CancellationToken,
        next: Next<'_, R>,
    ) -> Outcome<R> {
        let request = R::name();
        let response = std::any::type_name::<R::Output>();
        tracing::info!(request, response, "Handling request");

        let started = Instant::now();
        let outcome = next.run().await;
        let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

        match &outcome {
            Ok(envelope) => tracing::info!(
                request,
                response,
                elapsed_ms,
                success = envelope.is_success(),
                "Handled request"
            ),
            Err(fault) => tracing::warn!(
                request,
                response,
                elapsed_ms,
                code = fault.code(),
                "Request did not complete: {fault}"
            ),
        }

        outcome
    }
}

#[cfg(test)]
mod tests {
    use crate::fixtures::{Echo, EchoHandler, FailingHandler, MissingHandler};
    use crate::codes;
    use crate::{LoggingBehavior, Pipeline};
    use pretty_assertions::assert_eq;
    use tokio_util::sync::CancellationToken;

    #[tokio::test]
    async fn it_does_not_change_the_envelope() {
        let cancellation = CancellationToken::new();
        let request = Echo::new("hello");

        let bare = Pipeline::builder(EchoHandler).build();
        let logged = Pipeline::builder(EchoHandler).with(LoggingBehavior).build();

        assert_eq!(
            logged.execute(&request, &cancellation).await.ok(),
            bare.execute(&request, &cancellation).await.ok()
        );
    }

    #[tokio::test]
    async fn it_does_not_change_an_error_envelope() {
        let cancellation = CancellationToken::new();
        let request = Echo::new("42");

        let bare = Pipeline::builder(MissingHandler).build();
        let logged = Pipeline::builder(MissingHandler).with(LoggingBehavior).build();

        let envelope = logged.execute(&request, &cancellation).await.ok();
        assert_eq!(
            envelope.as_ref().and_then(|envelope| envelope.code()),
            Some(codes::NOT_FOUND)
        );
        assert_eq!(envelope, bare.execute(&request, &cancellation).await.ok());
    }

    #[tokio::test]
    async fn it_passes_faults_through() {
        let cancellation = CancellationToken::new();
        let pipeline = Pipeline::builder(FailingHandler).with(LoggingBehavior).build();

        let fault = pipeline
            .execute(&Echo::new("boom"), &cancellation)
            .await
            .err();

        assert_eq!(fault.map(|fault| fault.to_string()), Some("boom".to_string()));
    }
}

use crate::{Behavior, Fault, Next, Outcome, Request};
use futures_util::FutureExt;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use tokio_util::sync::CancellationToken;

/// The fault boundary of the chain.
///
/// Errors and panics raised by anything nested inside are logged with the
/// originating request type and converted into an error envelope (see
/// [`Fault::into_envelope`]). Successful outcomes pass through unchanged.
///
/// Rejected and cancelled requests are expected outcomes and are logged below
/// `error`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExceptionContainmentBehavior;

#[async_trait::async_trait]
impl<R: Request> Behavior<R> for ExceptionContainmentBehavior {
    async fn invoke(
        &self,
        _request: &R,
        _cancellation: &CancellationToken,
        next: Next<'_, R>,
    ) -> Outcome<R> {
        let fault = match AssertUnwindSafe(next.run()).catch_unwind().await {
            Ok(Ok(envelope)) => return Ok(envelope),
            Ok(Err(fault)) => fault,
            Err(payload) => Fault::Panic(panic_message(payload.as_ref())),
        };

        let request = R::name();
        let code = fault.code();
        match &fault {
            Fault::Validation(_) => {
                tracing::debug!(request, code, "Request {request} failed validation: {fault}")
            }
            Fault::Cancelled => tracing::info!(request, code, "Request {request} was cancelled"),
            Fault::Unhandled(_) | Fault::Panic(_) => {
                tracing::error!(request, code, "Unhandled fault for request {request}: {fault}")
            }
        }

        Ok(fault.into_envelope())
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "panic with a non-string payload".to_string()
    }
}

#[cfg(test)]
mod tests {
    use crate::fixtures::{
        CountingHandler, Echo, EchoHandler, FailingHandler, PanickingHandler, StallingHandler,
        Tagged,
    };
    use crate::{
        ExceptionContainmentBehavior, Pipeline, Rules, UNHANDLED_MESSAGE, ValidationBehavior,
        codes,
    };
    use std::time::Duration;
    use pretty_assertions::assert_eq;
    use testresult::TestResult;
    use tokio_util::sync::CancellationToken;

    #[tokio::test]
    async fn it_turns_handler_errors_into_envelopes() -> TestResult {
        let pipeline = Pipeline::builder(FailingHandler)
            .with(ExceptionContainmentBehavior)
            .build();

        let envelope = pipeline
            .execute(&Echo::new("disk full"), &CancellationToken::new())
            .await?;

        assert!(!envelope.is_success());
        assert_eq!(envelope.message(), Some(UNHANDLED_MESSAGE));
        assert_eq!(envelope.errors(), ["disk full"]);
        assert_eq!(envelope.code(), Some(codes::UNHANDLED));
        Ok(())
    }

    #[tokio::test]
    async fn it_turns_panics_into_envelopes() -> TestResult {
        let pipeline = Pipeline::builder(PanickingHandler)
            .with(ExceptionContainmentBehavior)
            .build();

        let envelope = pipeline
            .execute(&Echo::new("kaboom"), &CancellationToken::new())
            .await?;

        assert_eq!(envelope.errors(), ["kaboom"]);
        assert_eq!(envelope.code(), Some(codes::UNHANDLED));
        assert_eq!(envelope.status_code(), 500);
        Ok(())
    }

    #[tokio::test]
    async fn it_answers_rejected_requests_with_every_message() -> TestResult {
        let rules = Rules::new()
            .ensure("text", "Text is required.", |r: &Tagged| !r.text.is_empty())
            .ensure("text", "Text must be long.", |r: &Tagged| r.text.len() > 3)
            .shared();
        let pipeline = Pipeline::builder(CountingHandler::default())
            .with(ExceptionContainmentBehavior)
            .with(ValidationBehavior::new([rules]))
            .build();

        let envelope = pipeline
            .execute(&Tagged::new(""), &CancellationToken::new())
            .await?;

        assert_eq!(envelope.code(), Some(codes::VALIDATION));
        assert_eq!(envelope.status_code(), 400);
        assert_eq!(envelope.errors(), ["Text is required.", "Text must be long."]);
        Ok(())
    }

    #[tokio::test]
    async fn it_answers_cancelled_requests() -> TestResult {
        let pipeline = Pipeline::builder(StallingHandler)
            .with(ExceptionContainmentBehavior)
            .build();
        let cancellation = CancellationToken::new();
        let trigger = cancellation.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            trigger.cancel();
        });

        let envelope = pipeline.execute(&Echo::new("slow"), &cancellation).await?;

        assert_eq!(envelope.code(), Some(codes::CANCELLED));
        Ok(())
    }

    #[tokio::test]
    async fn it_passes_success_through() -> TestResult {
        let pipeline = Pipeline::builder(EchoHandler)
            .with(ExceptionContainmentBehavior)
            .build();

        let envelope = pipeline
            .execute(&Echo::new("fine"), &CancellationToken::new())
            .await?;

        assert!(envelope.is_success());
        assert_eq!(envelope.data().map(String::as_str), Some("fine"));
        Ok(())
    }
}

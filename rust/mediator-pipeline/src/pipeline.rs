use crate::{
    Behavior, ExceptionContainmentBehavior, Handler, LoggingBehavior, Next, Outcome, Request,
    ResultEnvelope, ValidationBehavior, Validator,
};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// A handler for `R` wrapped in its chain of behaviors.
///
/// The chain is fixed at [`PipelineBuilder::build`] and shared between
/// clones, so one pipeline can serve many concurrent invocations.
pub struct Pipeline<R: Request> {
    behaviors: Arc<[Arc<dyn Behavior<R>>]>,
    handler: Arc<dyn Handler<R>>,
}

impl<R: Request> Clone for Pipeline<R> {
    fn clone(&self) -> Self {
        Self {
            behaviors: self.behaviors.clone(),
            handler: self.handler.clone(),
        }
    }
}

impl<R: Request> std::fmt::Debug for Pipeline<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("request", &R::name())
            .field("behaviors", &self.behaviors.len())
            .finish()
    }
}

impl<R: Request> Pipeline<R> {
    /// Start a pipeline around `handler`.
    pub fn builder<H>(handler: H) -> PipelineBuilder<R>
    where
        H: Handler<R> + 'static,
    {
        PipelineBuilder {
            behaviors: Vec::new(),
            handler: Arc::new(handler),
        }
    }

    /// Number of behaviors in the chain of `R`.
    pub fn len(&self) -> usize {
        self.behaviors.len()
    }

    /// Whether the handler runs without any behavior around it.
    pub fn is_empty(&self) -> bool {
        self.behaviors.is_empty()
    }

    /// Run `request` through the chain and hand back the outcome as is.
    pub async fn execute(&self, request: &R, cancellation: &CancellationToken) -> Outcome<R> {
        Next::new(&self.behaviors, self.handler.as_ref(), request, cancellation)
            .run()
            .await
    }

    /// Run `request` through the chain.
    ///
    /// Always yields an envelope. A fault that escapes the chain (only
    /// possible when no containment behavior is installed) is converted the
    /// same way [`ExceptionContainmentBehavior`] would.
    pub async fn send(&self, request: R, cancellation: &CancellationToken) -> ResultEnvelope<R::Output> {
        match self.execute(&request, cancellation).await {
            Ok(envelope) => envelope,
            Err(fault) => {
                tracing::error!(
                    request = R::name(),
                    code = fault.code(),
                    "Fault escaped the pipeline: {fault}"
                );
                fault.into_envelope()
            }
        }
    }
}

/// Assembles a [`Pipeline`]. Behaviors run in the order they are added, the
/// first one outermost.
pub struct PipelineBuilder<R: Request> {
    behaviors: Vec<Arc<dyn Behavior<R>>>,
    handler: Arc<dyn Handler<R>>,
}

impl<R: Request> PipelineBuilder<R> {
    /// Append `behavior` to the chain.
    pub fn with<B>(self, behavior: B) -> Self
    where
        B: Behavior<R> + 'static,
    {
        self.with_shared(Arc::new(behavior))
    }

    /// Append an already shared behavior to the chain.
    pub fn with_shared(mut self, behavior: Arc<dyn Behavior<R>>) -> Self {
        self.behaviors.push(behavior);
        self
    }

    /// Append logging, exception containment and validation, in that order.
    pub fn with_standard_behaviors(
        self,
        validators: impl IntoIterator<Item = Arc<dyn Validator<R>>>,
    ) -> Self {
        self.with(LoggingBehavior)
            .with(ExceptionContainmentBehavior)
            .with(ValidationBehavior::new(validators))
    }

    /// Fix the chain, leaving out behaviors that do not apply to the
    /// capabilities of `R`.
    pub fn build(self) -> Pipeline<R> {
        let behaviors: Vec<_> = self
            .behaviors
            .into_iter()
            .filter(|behavior| behavior.applies_to(R::CAPABILITIES))
            .collect();

        Pipeline {
            behaviors: behaviors.into(),
            handler: self.handler,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::fixtures::{
        CountingHandler, Echo, EchoHandler, PanickingHandler, Recorder, StallingHandler, Tagged,
    };
    use crate::{CANCELLED_MESSAGE, Pipeline, UNHANDLED_MESSAGE, codes};
    use pretty_assertions::assert_eq;
    use std::time::Duration;
    use testresult::TestResult;
    use tokio_util::sync::CancellationToken;

    #[tokio::test]
    async fn it_runs_behaviors_outermost_first() {
        let recorder = Recorder::default();
        let pipeline = Pipeline::builder(EchoHandler)
            .with(recorder.layer("outer"))
            .with(recorder.layer("inner"))
            .build();

        let envelope = pipeline.send(Echo::new("x"), &CancellationToken::new()).await;

        assert!(envelope.is_success());
        assert_eq!(
            recorder.events(),
            vec!["enter outer", "enter inner", "leave inner", "leave outer"]
        );
    }

    #[tokio::test]
    async fn it_leaves_validation_out_for_untagged_requests() {
        let pipeline = Pipeline::builder(EchoHandler)
            .with_standard_behaviors([])
            .build();
        assert_eq!(pipeline.len(), 2);

        let pipeline = Pipeline::builder(CountingHandler::default())
            .with_standard_behaviors([])
            .build();
        assert_eq!(pipeline.len(), 3);
    }

    #[tokio::test]
    async fn it_always_answers_with_an_envelope() {
        let pipeline = Pipeline::builder(PanickingHandler)
            .with_standard_behaviors([])
            .build();

        let envelope = pipeline.send(Echo::new("boom"), &CancellationToken::new()).await;

        assert!(!envelope.is_success());
        assert_eq!(envelope.message(), Some(UNHANDLED_MESSAGE));
        assert_eq!(envelope.code(), Some(codes::UNHANDLED));
    }

    #[tokio::test]
    async fn it_reports_cancellation_before_the_chain_starts() {
        let handler = CountingHandler::default();
        let pipeline = Pipeline::builder(handler.clone())
            .with_standard_behaviors([])
            .build();

        let cancellation = CancellationToken::new();
        cancellation.cancel();
        let envelope = pipeline.send(Tagged::new("late"), &cancellation).await;

        assert_eq!(envelope.code(), Some(codes::CANCELLED));
        assert_eq!(envelope.message(), Some(CANCELLED_MESSAGE));
        assert_eq!(handler.calls(), 0);
    }

    #[tokio::test]
    async fn it_abandons_a_handler_when_cancelled() -> TestResult {
        let pipeline = Pipeline::builder(StallingHandler)
            .with_standard_behaviors([])
            .build();
        let cancellation = CancellationToken::new();

        let pending = tokio::spawn({
            let pipeline = pipeline.clone();
            let cancellation = cancellation.clone();
            async move { pipeline.send(Echo::new("slow"), &cancellation).await }
        });

        tokio::time::sleep(Duration::from_millis(10)).await;
        cancellation.cancel();

        let envelope = tokio::time::timeout(Duration::from_secs(5), pending).await??;
        assert_eq!(envelope.code(), Some(codes::CANCELLED));
        assert_eq!(envelope.status_code(), 499);
        Ok(())
    }

    #[tokio::test]
    async fn it_converts_escaped_faults_without_containment() {
        let pipeline = Pipeline::builder(crate::fixtures::FailingHandler).build();
        assert!(pipeline.is_empty());

        let envelope = pipeline.send(Echo::new("nope"), &CancellationToken::new()).await;
        assert_eq!(envelope.errors(), ["nope"]);
        assert_eq!(envelope.code(), Some(codes::UNHANDLED));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn it_serves_concurrent_invocations() -> TestResult {
        let handler = CountingHandler::default();
        let pipeline = Pipeline::builder(handler.clone())
            .with_standard_behaviors([])
            .build();

        let tasks: Vec<_> = (0..32)
            .map(|n| {
                let pipeline = pipeline.clone();
                tokio::spawn(async move {
                    pipeline
                        .send(Tagged::new(format!("req-{n}")), &CancellationToken::new())
                        .await
                })
            })
            .collect();

        for (n, task) in tasks.into_iter().enumerate() {
            let envelope = task.await?;
            assert_eq!(envelope.into_data(), Some(format!("req-{n}")));
        }
        assert_eq!(handler.calls(), 32);
        Ok(())
    }
}

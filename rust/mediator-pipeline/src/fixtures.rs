use crate::{
    Behavior, Capabilities, Capability, Fault, Handler, Next, Outcome, Request, ResultEnvelope,
    Validator, Violation,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio_util::sync::CancellationToken;

/// A request without capabilities.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Echo {
    pub text: String,
}

impl Echo {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl Request for Echo {
    type Output = String;
}

/// A request tagged for validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tagged {
    pub text: String,
}

impl Tagged {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl Request for Tagged {
    type Output = String;
    const CAPABILITIES: Capabilities = Capabilities::of(Capability::Validation);
}

pub struct EchoHandler;

#[async_trait::async_trait]
impl Handler<Echo> for EchoHandler {
    async fn handle(&self, request: &Echo, _: &CancellationToken) -> Outcome<Echo> {
        Ok(ResultEnvelope::success(request.text.clone(), "Echoed."))
    }
}

pub struct FailingHandler;

#[async_trait::async_trait]
impl Handler<Echo> for FailingHandler {
    async fn handle(&self, request: &Echo, _: &CancellationToken) -> Outcome<Echo> {
        Err(Fault::unhandled(request.text.clone()))
    }
}

pub struct PanickingHandler;

#[async_trait::async_trait]
impl Handler<Echo> for PanickingHandler {
    async fn handle(&self, request: &Echo, _: &CancellationToken) -> Outcome<Echo> {
        panic!("{}", request.text)
    }
}

/// Never finishes on its own.
pub struct StallingHandler;

#[async_trait::async_trait]
impl Handler<Echo> for StallingHandler {
    async fn handle(&self, _: &Echo, _: &CancellationToken) -> Outcome<Echo> {
        std::future::pending().await
    }
}

/// Answers every [`Echo`] with not found.
pub struct MissingHandler;

#[async_trait::async_trait]
impl Handler<Echo> for MissingHandler {
    async fn handle(&self, request: &Echo, _: &CancellationToken) -> Outcome<Echo> {
        Ok(ResultEnvelope::not_found(format!("No entry for {}", request.text)))
    }
}

/// A validator that never reports.
pub struct StallingValidator;

#[async_trait::async_trait]
impl Validator<Tagged> for StallingValidator {
    async fn validate(&self, _: &Tagged, _: &CancellationToken) -> Vec<Violation> {
        std::future::pending().await
    }
}

/// Echoes [`Tagged`] requests and counts how often it ran.
#[derive(Clone, Default)]
pub struct CountingHandler {
    calls: Arc<AtomicUsize>,
}

impl CountingHandler {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl Handler<Tagged> for CountingHandler {
    async fn handle(&self, request: &Tagged, _: &CancellationToken) -> Outcome<Tagged> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(ResultEnvelope::success(request.text.clone(), "Counted."))
    }
}

/// Shared log of behavior entry and exit.
#[derive(Clone, Default)]
pub struct Recorder {
    events: Arc<Mutex<Vec<String>>>,
}

impl Recorder {
    pub fn layer(&self, name: &'static str) -> RecordingBehavior {
        RecordingBehavior {
            name,
            recorder: self.clone(),
        }
    }

    pub fn events(&self) -> Vec<String> {
        self.events.lock().map(|events| events.clone()).unwrap_or_default()
    }

    fn record(&self, event: String) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}

pub struct RecordingBehavior {
    name: &'static str,
    recorder: Recorder,
}

#[async_trait::async_trait]
impl<R: Request> Behavior<R> for RecordingBehavior {
    async fn invoke(
        &self,
        _request: &R,
        _cancellation: &CancellationToken,
        next: Next<'_, R>,
    ) -> Outcome<R> {
        self.recorder.record(format!("enter {}", self.name));
        let outcome = next.run().await;
        self.recorder.record(format!("leave {}", self.name));
        outcome
    }
}

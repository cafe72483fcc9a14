use crate::{
    Behavior, Capabilities, Capability, Fault, Next, Outcome, Request, ValidationFailure,
    Violation,
};
use futures_util::future::join_all;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Checks a request before it reaches its handler.
#[async_trait::async_trait]
pub trait Validator<R: Request>: Send + Sync {
    /// Every problem found with `request`; empty when it is acceptable.
    async fn validate(&self, request: &R, cancellation: &CancellationToken) -> Vec<Violation>;
}

/// Runs every registered validator and short circuits with a
/// [`ValidationFailure`] when any of them reports a violation.
///
/// Validators run concurrently and are abandoned as soon as the request is
/// cancelled.
///
/// Only joins the chain of request types declaring
/// [`Capability::Validation`]. With no validators registered it passes the
/// request straight through.
pub struct ValidationBehavior<R: Request> {
    validators: Vec<Arc<dyn Validator<R>>>,
}

impl<R: Request> ValidationBehavior<R> {
    /// Create the behavior over `validators`.
    pub fn new(validators: impl IntoIterator<Item = Arc<dyn Validator<R>>>) -> Self {
        Self {
            validators: validators.into_iter().collect(),
        }
    }
}

impl<R: Request> Default for ValidationBehavior<R> {
    fn default() -> Self {
        Self {
            validators: Vec::new(),
        }
    }
}

#[async_trait::async_trait]
impl<R: Request> Behavior<R> for ValidationBehavior<R> {
    fn applies_to(&self, capabilities: Capabilities) -> bool {
        capabilities.contains(Capability::Validation)
    }

    async fn invoke(
        &self,
        request: &R,
        cancellation: &CancellationToken,
        next: Next<'_, R>,
    ) -> Outcome<R> {
        if self.validators.is_empty() {
            return next.run().await;
        }

        let validations = join_all(
            self.validators
                .iter()
                .map(|validator| validator.validate(request, cancellation)),
        );
        let violations: Vec<Violation> = tokio::select! {
            biased;
            _ = cancellation.cancelled() => return Err(Fault::Cancelled),
            reports = validations => reports.into_iter().flatten().collect(),
        };

        if violations.is_empty() {
            next.run().await
        } else {
            tracing::debug!(
                request = R::name(),
                violations = violations.len(),
                "Request rejected by validation"
            );
            Err(ValidationFailure::new(violations).into())
        }
    }
}

type Predicate<R> = Box<dyn Fn(&R) -> bool + Send + Sync>;

struct Rule<R> {
    field: String,
    message: String,
    holds: Predicate<R>,
}

/// A [`Validator`] assembled from field rules.
///
/// ```rust
/// # use mediator_pipeline::{Request, Rules};
/// # #[derive(Debug)]
/// # struct Rename { name: String }
/// # impl Request for Rename { type Output = (); }
/// let rules = Rules::new()
///     .ensure("name", "Name is required.", |r: &Rename| !r.name.is_empty())
///     .ensure("name", "Name must not exceed 100 characters.", |r: &Rename| {
///         r.name.chars().count() <= 100
///     });
/// assert_eq!(rules.len(), 2);
/// ```
pub struct Rules<R> {
    rules: Vec<Rule<R>>,
}

impl<R: Request> Rules<R> {
    /// An empty rule set.
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Add a rule: `message` is reported against `field` whenever `holds`
    /// returns `false`.
    pub fn ensure<F>(mut self, field: impl Into<String>, message: impl Into<String>, holds: F) -> Self
    where
        F: Fn(&R) -> bool + Send + Sync + 'static,
    {
        self.rules.push(Rule {
            field: field.into(),
            message: message.into(),
            holds: Box::new(holds),
        });
        self
    }

    /// Number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether no rules are registered.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Violations of `request`, in rule order.
    pub fn check(&self, request: &R) -> Vec<Violation> {
        self.rules
            .iter()
            .filter(|rule| !(rule.holds)(request))
            .map(|rule| Violation::new(rule.field.as_str(), rule.message.as_str()))
            .collect()
    }

    /// Share as a validator for [`ValidationBehavior`].
    pub fn shared(self) -> Arc<dyn Validator<R>> {
        Arc::new(self)
    }
}

impl<R: Request> Default for Rules<R> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl<R: Request> Validator<R> for Rules<R> {
    async fn validate(&self, request: &R, _cancellation: &CancellationToken) -> Vec<Violation> {
        self.check(request)
    }
}

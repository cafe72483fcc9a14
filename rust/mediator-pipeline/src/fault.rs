use crate::{ResultEnvelope, codes};
use std::fmt::{Debug, Display, Formatter};

/// Message on envelopes produced from an unhandled fault.
pub const UNHANDLED_MESSAGE: &str = "An error occurred while executing the request";
/// Message on envelopes produced from a validation failure.
pub const VALIDATION_MESSAGE: &str = "The request is invalid";
/// Message on envelopes produced from a cancelled invocation.
pub const CANCELLED_MESSAGE: &str = "The request was cancelled";

/// A single rejected field.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Violation {
    /// The offending field.
    pub field: String,
    /// What is wrong with it.
    pub message: String,
}

impl Violation {
    /// Create a violation.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl Display for Violation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Every violation reported by every validator for one request.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Validation failed with {} error(s)", .violations.len())]
pub struct ValidationFailure {
    violations: Vec<Violation>,
}

impl ValidationFailure {
    /// Create a failure from a non-empty set of violations.
    pub fn new(violations: impl IntoIterator<Item = Violation>) -> Self {
        Self {
            violations: violations.into_iter().collect(),
        }
    }

    /// The individual violations.
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// The violation messages in reporting order.
    pub fn messages(&self) -> impl Iterator<Item = &str> {
        self.violations.iter().map(|violation| violation.message.as_str())
    }
}

/// Anything that stops the chain from producing an envelope on its own.
///
/// Faults travel up the chain as `Err` until a containment boundary turns
/// them into an error [`ResultEnvelope`].
#[derive(Debug, thiserror::Error)]
pub enum Fault {
    /// Validators rejected the request.
    #[error(transparent)]
    Validation(#[from] ValidationFailure),

    /// The cancellation token fired before the chain completed.
    #[error("The operation was cancelled")]
    Cancelled,

    /// Any other error raised by a behavior or handler.
    #[error(transparent)]
    Unhandled(#[from] anyhow::Error),

    /// A behavior or handler panicked.
    #[error("{0}")]
    Panic(String),
}

impl Fault {
    /// An unhandled fault carrying `message`.
    pub fn unhandled<M>(message: M) -> Self
    where
        M: Display + Debug + Send + Sync + 'static,
    {
        Self::Unhandled(anyhow::Error::msg(message))
    }

    /// Envelope code for this fault.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => codes::VALIDATION,
            Self::Cancelled => codes::CANCELLED,
            Self::Unhandled(_) | Self::Panic(_) => codes::UNHANDLED,
        }
    }

    /// Convert into the error envelope the caller sees.
    ///
    /// Validation failures list every violation message (status 400).
    /// Everything else carries a fixed message and the fault description as
    /// its only error (status 499 when cancelled, 500 otherwise).
    pub fn into_envelope<T>(self) -> ResultEnvelope<T> {
        let code = self.code();
        let description = self.to_string();
        match self {
            Self::Validation(failure) => {
                ResultEnvelope::error(VALIDATION_MESSAGE, failure.messages(), code)
                    .with_status_code(400)
            }
            Self::Cancelled => {
                ResultEnvelope::error(CANCELLED_MESSAGE, [description], code)
                    .with_status_code(499)
            }
            Self::Unhandled(_) | Self::Panic(_) => {
                ResultEnvelope::error(UNHANDLED_MESSAGE, [description], code).with_status_code(500)
            }
        }
    }
}

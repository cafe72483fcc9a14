//! Typed request pipeline.
//!
//! Every operation is a [`Request`] answered by exactly one [`Handler`]. A
//! [`Pipeline`] wraps that handler in an ordered chain of [`Behavior`]s, each
//! implementing one cross-cutting concern, and always hands back a
//! [`ResultEnvelope`]:
//!
//! ```text
//! send(request)
//!   └── LoggingBehavior               start / finish / elapsed
//!         └── ExceptionContainment    faults → error envelope
//!               └── ValidationBehavior   (only for Capability::Validation)
//!                     └── Handler
//! ```
//!
//! A behavior receives the request, the cancellation token and a [`Next`]
//! continuation standing for the rest of the chain. It may short circuit
//! without running `next`, run it and inspect the outcome, or run it inside a
//! fault boundary.
//!
//! # Example
//!
//! ```rust
//! use async_trait::async_trait;
//! use mediator_pipeline::{
//!     Capabilities, Capability, Handler, Outcome, Pipeline, Request, ResultEnvelope, Rules,
//! };
//! use tokio_util::sync::CancellationToken;
//!
//! #[derive(Debug)]
//! struct Greet {
//!     name: String,
//! }
//!
//! impl Request for Greet {
//!     type Output = String;
//!     const CAPABILITIES: Capabilities = Capabilities::of(Capability::Validation);
//! }
//!
//! struct Greeter;
//!
//! #[async_trait]
//! impl Handler<Greet> for Greeter {
//!     async fn handle(&self, request: &Greet, _: &CancellationToken) -> Outcome<Greet> {
//!         Ok(ResultEnvelope::success(format!("Hello, {}", request.name), "Greeted."))
//!     }
//! }
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let pipeline = Pipeline::builder(Greeter)
//!     .with_standard_behaviors([Rules::new()
//!         .ensure("name", "Name is required.", |r: &Greet| !r.name.is_empty())
//!         .shared()])
//!     .build();
//!
//! let cancellation = CancellationToken::new();
//! let ok = pipeline.send(Greet { name: "Ada".into() }, &cancellation).await;
//! assert_eq!(ok.data().map(String::as_str), Some("Hello, Ada"));
//!
//! let invalid = pipeline.send(Greet { name: String::new() }, &cancellation).await;
//! assert!(!invalid.is_success());
//! assert_eq!(invalid.errors(), ["Name is required."]);
//! # }
//! ```

mod envelope;
pub use envelope::*;

mod capability;
pub use capability::*;

mod fault;
pub use fault::*;

mod request;
pub use request::*;

mod behavior;
pub use behavior::*;

mod pipeline;
pub use pipeline::*;

#[cfg(test)]
pub(crate) mod fixtures;

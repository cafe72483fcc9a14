//! Authenticated, policy guarded access to request pipelines.
//!
//! The [`Gateway`] is the single seam a transport layer calls into. For every
//! call it:
//!
//! 1. decodes the presented credential into a principal
//!    ([`TokenIssuer`](mediator_credentials::TokenIssuer)),
//! 2. evaluates the operation's policy against that principal
//!    ([`PolicyEngine`](mediator_policy::PolicyEngine)),
//! 3. runs the request through its [`Pipeline`](mediator_pipeline::Pipeline).
//!
//! Steps 1 and 2 answer failures with an [`AccessError`] envelope of their
//! own; the pipeline is never entered for a refused caller.
//!
//! ```rust
//! use mediator_credentials::CredentialSettings;
//! use mediator_operator::{Gateway, GetProductById, ProductPipelines};
//! use tokio_util::sync::CancellationToken;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let gateway = Gateway::from_settings(CredentialSettings::from_json(
//!     r#"{
//!         "JwtSettings": {
//!             "Key": "an-example-signing-key-of-32-bytes!",
//!             "Issuer": "mediator",
//!             "Audience": "mediator-clients",
//!             "DurationInMinutes": 60
//!         }
//!     }"#,
//! )?)?;
//! let products = ProductPipelines::new();
//! let credential = gateway.login("demo", "demo")?;
//!
//! let envelope = gateway
//!     .send(
//!         Some(credential.as_str()),
//!         &products.get_by_id,
//!         GetProductById { id: 3 },
//!         &CancellationToken::new(),
//!     )
//!     .await;
//!
//! assert_eq!(envelope.data().map(|product| product.name.as_str()), Some("Product 3"));
//! # Ok(())
//! # }
//! ```

mod error;
pub use error::*;

mod gateway;
pub use gateway::*;

pub mod products;
pub use products::*;

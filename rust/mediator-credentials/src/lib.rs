//! Credential issuance and verification.
//!
//! A [`TokenIssuer`] mints compact HS256 JSON Web Tokens
//! (`header.payload.signature`, via `jsonwebtoken`) that carry a caller's subject,
//! roles and permissions, and turns a presented token back into a
//! [`Principal`](mediator_claims::Principal).
//!
//! Decoding is all or nothing: the signature, issuer, audience and expiry are
//! checked before a single claim is read, and any failure yields an
//! [`AuthError`] rather than a partially populated principal.
//!
//! ```rust
//! use mediator_credentials::{CredentialSettings, TokenIssuer};
//!
//! let issuer = TokenIssuer::new(CredentialSettings {
//!     key: "an-example-signing-key-of-32-bytes!".into(),
//!     issuer: "mediator".into(),
//!     audience: "mediator-clients".into(),
//!     duration_in_minutes: 60,
//! })
//! .unwrap();
//!
//! let credential = issuer
//!     .issue("demo", ["Admin", "User"], ["read_products"])
//!     .unwrap();
//! let principal = issuer.decode(credential.as_str()).unwrap();
//!
//! assert_eq!(principal.subject(), "demo");
//! assert!(principal.has_role("Admin"));
//! assert!(principal.has_permission("read_products"));
//! ```
//!
//! # Wire format
//!
//! Issued payloads use these literal field names, which external consumers
//! rely on. Presented tokens may also carry `role`, `permission` or `aud` as
//! a single string, and may omit `jti` and `name`.
//!
//! | Field | Meaning |
//! |---|---|
//! | `sub` | subject |
//! | `jti` | unique token id (ULID) |
//! | `name` | display name (the subject) |
//! | `iat` / `exp` | issued at / expiry, seconds since the epoch |
//! | `iss` / `aud` | issuer / audience |
//! | `role` | array of role names |
//! | `permission` | array of permission names |

mod error;
pub use error::*;

mod settings;
pub use settings::*;

mod token;

mod issuer;
pub use issuer::*;

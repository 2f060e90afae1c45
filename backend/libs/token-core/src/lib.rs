//! Stateless subject tokens for Nova gRPC services
//!
//! Issues HS256 JWT credentials binding a numeric user id to an expiry, and
//! recovers that id from the `authorization: Token <credential>` metadata of
//! inbound calls.
//!
//! ## Core Components
//!
//! - **TokenIssuer**: signs `{user_id, exp}` claim sets (72h window, 24h short-lived variant)
//! - **TokenValidator**: carrier lookup, structural parse, HMAC pinning, signature,
//!   claim mapping and expiry, in that order
//! - **AuthError**: one variant per failure cause, with a gRPC status mapping
//! - **TokenSettings**: secret and window from the environment
//!
//! ## Usage
//!
//! ```rust
//! use chrono::Utc;
//! use token_core::{SigningSecret, TokenIssuer, TokenValidator};
//! use tonic::metadata::MetadataMap;
//!
//! let secret = SigningSecret::new("a-long-random-shared-secret");
//! let issuer = TokenIssuer::new(secret.clone());
//! let validator = TokenValidator::new(secret);
//!
//! let now = Utc::now();
//! let token = issuer.issue(1234, now)?;
//!
//! let mut metadata = MetadataMap::new();
//! metadata.insert("authorization", format!("Token {}", token).parse().unwrap());
//!
//! assert_eq!(validator.authenticate(&metadata, now)?, 1234);
//! # Ok::<(), token_core::AuthError>(())
//! ```
//!
//! ## Security Guarantees
//!
//! - Only HMAC header algorithms reach signature verification
//! - No global key state; secrets are injected and zeroized on drop
//! - Deterministic issuance: identical inputs yield identical credentials

mod claims;
mod error;
mod issuer;
mod metadata;
mod secret;
mod settings;
mod validator;

pub use claims::{ClaimSet, SHORT_VALIDITY, STANDARD_VALIDITY};
pub use error::{AuthError, Result};
pub use issuer::TokenIssuer;
pub use metadata::{extract_credential, MetadataCarrier, AUTHORIZATION_KEY, TOKEN_SCHEME_PREFIX};
pub use secret::{classify_secret_strength, SecretStrength, SigningSecret};
pub use settings::{TokenSettings, SECRET_ENV, VALIDITY_HOURS_ENV};
pub use validator::TokenValidator;

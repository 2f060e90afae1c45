//! Error taxonomy for token issuance and validation
//!
//! Every failure is a distinct variant so interceptors and tests branch on the
//! variant (or its [`AuthError::code`]), never on message text.

use thiserror::Error;
use tonic::{Code, Status};

pub type Result<T> = std::result::Result<T, AuthError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// Signing secret missing or empty, or settings could not be parsed.
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Missing credential")]
    MissingCredential,

    #[error("Malformed token")]
    MalformedToken,

    #[error("Unsupported signing method: {0}")]
    UnsupportedSigningMethod(String),

    #[error("Invalid token signature")]
    InvalidSignature,

    #[error("Cannot map token to claims")]
    ClaimMapping,

    #[error("Token expired")]
    ExpiredToken,

    #[error("Token encoding failed: {0}")]
    Encoding(String),
}

impl AuthError {
    /// Stable identifier for logs and metrics labels
    pub fn code(&self) -> &'static str {
        match self {
            AuthError::Configuration(_) => "configuration_error",
            AuthError::MissingCredential => "missing_credential",
            AuthError::MalformedToken => "malformed_token",
            AuthError::UnsupportedSigningMethod(_) => "unsupported_signing_method",
            AuthError::InvalidSignature => "invalid_signature",
            AuthError::ClaimMapping => "claim_mapping",
            AuthError::ExpiredToken => "token_expired",
            AuthError::Encoding(_) => "encoding_error",
        }
    }

    /// True for failures that point at the deployment rather than the caller
    pub fn is_configuration(&self) -> bool {
        matches!(self, AuthError::Configuration(_) | AuthError::Encoding(_))
    }

    /// Convert to gRPC Status for wire protocol
    ///
    /// Structural, method, signature and claim failures share one message so a
    /// caller cannot learn which check rejected a forged token.
    pub fn to_status(&self) -> Status {
        match self {
            AuthError::MissingCredential => {
                Status::new(Code::Unauthenticated, "missing credential")
            }
            AuthError::MalformedToken
            | AuthError::UnsupportedSigningMethod(_)
            | AuthError::InvalidSignature
            | AuthError::ClaimMapping => Status::new(Code::Unauthenticated, "invalid token"),
            AuthError::ExpiredToken => Status::new(Code::Unauthenticated, "token expired"),
            AuthError::Configuration(_) | AuthError::Encoding(_) => {
                // Don't leak internal details in production
                Status::new(Code::Internal, "Internal server error")
            }
        }
    }
}

impl From<AuthError> for Status {
    fn from(err: AuthError) -> Self {
        err.to_status()
    }
}

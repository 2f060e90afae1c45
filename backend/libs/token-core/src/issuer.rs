//! Credential issuance
//!
//! Credentials are HS256 JWTs over a [`ClaimSet`]. Output is a pure function
//! of subject, instant, window and secret: no `iat`, no `jti`, no nonce, so
//! identical inputs always produce identical strings.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use tracing::debug;

use crate::claims::{ClaimSet, SHORT_VALIDITY, STANDARD_VALIDITY};
use crate::error::{AuthError, Result};
use crate::secret::SigningSecret;

/// Issuance algorithm
const ISSUE_ALGORITHM: Algorithm = Algorithm::HS256;

/// Signs claim sets into credentials
///
/// Cheap to clone; clones share the secret.
#[derive(Debug, Clone)]
pub struct TokenIssuer {
    secret: SigningSecret,
    validity: Duration,
}

impl TokenIssuer {
    /// Issuer using the 72 hour [`STANDARD_VALIDITY`] window
    pub fn new(secret: SigningSecret) -> Self {
        Self {
            secret,
            validity: STANDARD_VALIDITY,
        }
    }

    /// Override the window used by [`issue`](Self::issue)
    ///
    /// Non-positive windows fall back to [`STANDARD_VALIDITY`]. Fractional
    /// seconds round up, since `exp` has whole-second resolution and must land
    /// after the issuance instant.
    pub fn with_validity(mut self, validity: Duration) -> Self {
        self.validity = if validity > Duration::zero() {
            round_up_to_seconds(validity)
        } else {
            STANDARD_VALIDITY
        };
        self
    }

    pub fn validity(&self) -> Duration {
        self.validity
    }

    /// Issue a credential for `subject` valid for the configured window
    ///
    /// ## Errors
    ///
    /// - [`AuthError::Configuration`] if the signing secret is empty
    pub fn issue(&self, subject: u64, now: DateTime<Utc>) -> Result<String> {
        self.issue_for(subject, now, self.validity)
    }

    /// Issue a credential valid for the 24 hour [`SHORT_VALIDITY`] window
    pub fn issue_short_lived(&self, subject: u64, now: DateTime<Utc>) -> Result<String> {
        self.issue_for(subject, now, SHORT_VALIDITY)
    }

    /// [`issue`](Self::issue) at the current wall-clock instant
    pub fn issue_now(&self, subject: u64) -> Result<String> {
        self.issue(subject, Utc::now())
    }

    fn issue_for(&self, subject: u64, now: DateTime<Utc>, validity: Duration) -> Result<String> {
        let key = self.secret.key_bytes()?;
        let claims = ClaimSet::new(subject, now, validity);

        let token = encode(
            &Header::new(ISSUE_ALGORITHM),
            &claims,
            &EncodingKey::from_secret(key),
        )
        .map_err(|e| AuthError::Encoding(e.to_string()))?;

        debug!(
            subject = claims.subject,
            expires_at = claims.expires_at,
            "Issued credential"
        );

        Ok(token)
    }
}

fn round_up_to_seconds(validity: Duration) -> Duration {
    let whole = Duration::seconds(validity.num_seconds());
    if whole < validity {
        whole + Duration::seconds(1)
    } else {
        whole
    }
}

//! Credential validation and subject extraction
//!
//! Checks run in a fixed order and stop at the first failure:
//!
//! 1. `authorization` present in the call metadata ([`AuthError::MissingCredential`])
//! 2. value starts with `Token ` ([`AuthError::MissingCredential`])
//! 3. three base64url segments with a JSON header ([`AuthError::MalformedToken`])
//! 4. header `alg` is HS256/HS384/HS512 ([`AuthError::UnsupportedSigningMethod`]),
//!    the remaining header fields are well typed ([`AuthError::MalformedToken`]),
//!    then the HMAC matches ([`AuthError::InvalidSignature`])
//! 5. payload decodes into a [`ClaimSet`] ([`AuthError::ClaimMapping`])
//! 6. `exp` is strictly after now ([`AuthError::ExpiredToken`])
//!
//! Pinning the header algorithm to the HMAC family before verifying keeps a
//! token that declares `none` or an asymmetric algorithm from ever reaching
//! signature verification.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use chrono::{DateTime, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, decode_header, Algorithm, DecodingKey, Validation};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::claims::ClaimSet;
use crate::error::{AuthError, Result};
use crate::metadata::{extract_credential, MetadataCarrier};
use crate::secret::SigningSecret;

/// Accepted header algorithms
const HMAC_ALGORITHMS: [Algorithm; 3] = [Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];

#[derive(Deserialize)]
struct EnvelopeHeader {
    alg: String,
}

/// Recovers the subject from inbound credentials
///
/// Cheap to clone; clones share the secret.
#[derive(Debug, Clone)]
pub struct TokenValidator {
    secret: SigningSecret,
}

impl TokenValidator {
    pub fn new(secret: SigningSecret) -> Self {
        Self { secret }
    }

    /// Authenticate a call from its metadata
    ///
    /// ## Returns
    ///
    /// The subject identifier carried by a valid, unexpired credential
    ///
    /// ## Errors
    ///
    /// One [`AuthError`] variant per failed check; see the module docs for the
    /// order. [`AuthError::Configuration`] if the signing secret is empty.
    pub fn authenticate<C: MetadataCarrier + ?Sized>(
        &self,
        carrier: &C,
        now: DateTime<Utc>,
    ) -> Result<u64> {
        let claims = extract_credential(carrier)
            .and_then(|raw| self.verify(raw, now))
            .map_err(log_rejection)?;

        debug!(subject = claims.subject, "Credential validated");

        Ok(claims.subject)
    }

    /// [`authenticate`](Self::authenticate) at the current wall-clock instant
    pub fn authenticate_now<C: MetadataCarrier + ?Sized>(&self, carrier: &C) -> Result<u64> {
        self.authenticate(carrier, Utc::now())
    }

    /// Validate a bare credential (no `Token ` prefix) and return its claims
    pub fn validate_token(&self, raw: &str, now: DateTime<Utc>) -> Result<ClaimSet> {
        self.verify(raw, now).map_err(log_rejection)
    }

    fn verify(&self, raw: &str, now: DateTime<Utc>) -> Result<ClaimSet> {
        let key = self.secret.key_bytes()?;

        let algorithm = declared_algorithm(raw)?;
        if !HMAC_ALGORITHMS.contains(&algorithm) {
            return Err(AuthError::UnsupportedSigningMethod(format!("{:?}", algorithm)));
        }

        // Wrongly typed registered header fields (`typ`, `kid`, ...) are a
        // structural failure, never a claim mapping one
        decode_header(raw).map_err(|_| AuthError::MalformedToken)?;

        // Expiry is checked below against the caller's instant, not the
        // library's clock
        let mut validation = Validation::new(algorithm);
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.required_spec_claims.clear();

        let claims = decode::<ClaimSet>(raw, &DecodingKey::from_secret(key), &validation)
            .map_err(|e| classify_decode_error(e.kind()))?
            .claims;

        if claims.is_expired_at(now) {
            return Err(AuthError::ExpiredToken);
        }

        Ok(claims)
    }
}

/// Structural parse: three decodable segments and the header's `alg`
fn declared_algorithm(raw: &str) -> Result<Algorithm> {
    let segments: Vec<&str> = raw.split('.').collect();
    if segments.len() != 3 {
        return Err(AuthError::MalformedToken);
    }

    let decoded = segments
        .iter()
        .map(|segment| URL_SAFE_NO_PAD.decode(segment))
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|_| AuthError::MalformedToken)?;

    let header: EnvelopeHeader =
        serde_json::from_slice(&decoded[0]).map_err(|_| AuthError::MalformedToken)?;

    header
        .alg
        .parse::<Algorithm>()
        .map_err(|_| AuthError::UnsupportedSigningMethod(header.alg))
}

fn classify_decode_error(kind: &ErrorKind) -> AuthError {
    match kind {
        ErrorKind::InvalidSignature => AuthError::InvalidSignature,
        ErrorKind::InvalidAlgorithm
        | ErrorKind::InvalidAlgorithmName
        | ErrorKind::MissingAlgorithm => {
            AuthError::UnsupportedSigningMethod("algorithm rejected by decoder".to_string())
        }
        ErrorKind::Json(_) => AuthError::ClaimMapping,
        _ => AuthError::MalformedToken,
    }
}

fn log_rejection(err: AuthError) -> AuthError {
    if err.is_configuration() {
        warn!(error_code = err.code(), error = %err, "Token validation misconfigured");
    } else {
        warn!(error_code = err.code(), "Credential rejected");
    }
    err
}

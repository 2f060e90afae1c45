//! Credential carrier lookup
//!
//! Clients send `authorization: Token <credential>`. Key lookup is
//! case-insensitive; the `Token ` prefix is matched exactly (capital `T`, one
//! ASCII space) and the remainder is returned untrimmed.

use std::collections::HashMap;

use tonic::metadata::MetadataMap;

use crate::error::{AuthError, Result};

/// Metadata key holding the credential
pub const AUTHORIZATION_KEY: &str = "authorization";

/// Scheme prefix in front of the credential
pub const TOKEN_SCHEME_PREFIX: &str = "Token ";

/// Per-call key/value metadata the validator reads from
///
/// Implementations return `None` when the key is absent or its value is not
/// representable as text.
pub trait MetadataCarrier {
    fn metadata_value(&self, key: &str) -> Option<&str>;
}

impl MetadataCarrier for MetadataMap {
    fn metadata_value(&self, key: &str) -> Option<&str> {
        // MetadataMap keys are stored lowercase
        self.get(key.to_ascii_lowercase().as_str())
            .and_then(|value| value.to_str().ok())
    }
}

impl<S: std::hash::BuildHasher> MetadataCarrier for HashMap<String, String, S> {
    fn metadata_value(&self, key: &str) -> Option<&str> {
        self.get(key)
            .or_else(|| {
                self.iter()
                    .find(|(name, _)| name.eq_ignore_ascii_case(key))
                    .map(|(_, value)| value)
            })
            .map(String::as_str)
    }
}

/// A call with no metadata at all
impl<C: MetadataCarrier> MetadataCarrier for Option<C> {
    fn metadata_value(&self, key: &str) -> Option<&str> {
        self.as_ref().and_then(|carrier| carrier.metadata_value(key))
    }
}

impl<C: MetadataCarrier + ?Sized> MetadataCarrier for &C {
    fn metadata_value(&self, key: &str) -> Option<&str> {
        (**self).metadata_value(key)
    }
}

/// Read the raw credential from a carrier
///
/// Fails with [`AuthError::MissingCredential`] when the key is absent or the
/// value does not start with `Token `.
pub fn extract_credential<C: MetadataCarrier + ?Sized>(carrier: &C) -> Result<&str> {
    let value = carrier
        .metadata_value(AUTHORIZATION_KEY)
        .ok_or(AuthError::MissingCredential)?;

    value
        .strip_prefix(TOKEN_SCHEME_PREFIX)
        .ok_or(AuthError::MissingCredential)
}

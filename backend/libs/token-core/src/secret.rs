//! Signing secret storage and strength classification
//!
//! The secret is injected into [`TokenIssuer`](crate::TokenIssuer) and
//! [`TokenValidator`](crate::TokenValidator) at construction and shared behind
//! an `Arc`. Bytes are wiped when the last handle drops.

use std::fmt;
use std::sync::Arc;

use zeroize::Zeroizing;

use crate::error::{AuthError, Result};

const MIN_SECRET_LENGTH: usize = 32; // 256 bits minimum
const RECOMMENDED_SECRET_LENGTH: usize = 64; // 512 bits recommended

/// Shared HMAC key
///
/// An empty secret can be constructed; issuance and validation refuse to use it
/// and return [`AuthError::Configuration`].
#[derive(Clone)]
pub struct SigningSecret {
    bytes: Arc<Zeroizing<Vec<u8>>>,
}

impl SigningSecret {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: Arc::new(Zeroizing::new(bytes.into())),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Key bytes, or a configuration error when empty
    pub(crate) fn key_bytes(&self) -> Result<&[u8]> {
        if self.bytes.is_empty() {
            return Err(AuthError::Configuration(
                "signing secret is empty".to_string(),
            ));
        }
        Ok(self.bytes.as_slice())
    }

    pub fn strength(&self) -> SecretStrength {
        classify_secret_strength(&self.bytes)
    }
}

impl fmt::Debug for SigningSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningSecret")
            .field("len", &self.bytes.len())
            .finish_non_exhaustive()
    }
}

/// Secret strength classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecretStrength {
    Weak,
    Acceptable,
    Strong,
}

/// Classify an HMAC secret
///
/// **Criteria**:
/// - Minimum 32 bytes (256 bits)
/// - Recommended 64 bytes (512 bits)
/// - Shannon entropy >= 4.0 bits/byte
/// - No runs of 4 repeated or 4 ascending bytes
pub fn classify_secret_strength(bytes: &[u8]) -> SecretStrength {
    if bytes.len() < MIN_SECRET_LENGTH {
        return SecretStrength::Weak;
    }

    let entropy = shannon_entropy(bytes);
    if entropy < 4.0 || has_obvious_patterns(bytes) {
        return SecretStrength::Weak;
    }

    if bytes.len() >= RECOMMENDED_SECRET_LENGTH && entropy >= 5.0 {
        SecretStrength::Strong
    } else {
        SecretStrength::Acceptable
    }
}

/// Bits per byte (0-8 scale)
fn shannon_entropy(data: &[u8]) -> f64 {
    let mut freq = [0u32; 256];
    let len = data.len() as f64;

    for &byte in data {
        freq[byte as usize] += 1;
    }

    freq.iter()
        .filter(|&&count| count > 0)
        .map(|&count| {
            let p = count as f64 / len;
            -p * p.log2()
        })
        .sum()
}

fn has_obvious_patterns(data: &[u8]) -> bool {
    let mut repeated = 1;
    let mut ascending = 1;

    for window in data.windows(2) {
        repeated = if window[0] == window[1] { repeated + 1 } else { 1 };
        ascending = if window[1] as i16 - window[0] as i16 == 1 {
            ascending + 1
        } else {
            1
        };

        if repeated >= 4 || ascending >= 4 {
            return true;
        }
    }

    false
}

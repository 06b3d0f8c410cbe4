//! Credential storage and verification

use std::fmt;

/// Stored login secret
///
/// The raw value never appears in `Debug` output and is skipped during
/// serialization of any containing type.
#[derive(Clone)]
pub struct Credential(String);

impl Credential {
    /// Wrap a raw secret
    pub fn new(secret: impl Into<String>) -> Self {
        Credential(secret.into())
    }

    /// The raw secret, for verifier implementations
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}

/// Strategy for checking an offered password against a stored credential
pub trait CredentialVerifier: Send + Sync {
    /// Whether `offered` matches `stored`
    fn verify(&self, stored: &Credential, offered: &str) -> bool;
}

/// Plain equality check, the scheme the tool ships with
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaintextVerifier;

impl CredentialVerifier for PlaintextVerifier {
    fn verify(&self, stored: &Credential, offered: &str) -> bool {
        stored.expose() == offered
    }
}

use serde::{Deserialize, Serialize};

use super::config::PinningDefaults;

/// Where to load one trust anchor's raw bytes from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PinSource {
    pub host_identifier: String,
    pub resource_name: String,
    #[serde(default = "default_resource_kind")]
    pub resource_kind: String,
}

fn default_resource_kind() -> String {
    PinningDefaults::RESOURCE_KIND.to_string()
}

impl PinSource {
    pub fn new(
        host_identifier: impl Into<String>,
        resource_name: impl Into<String>,
        resource_kind: impl Into<String>,
    ) -> Self {
        Self {
            host_identifier: host_identifier.into(),
            resource_name: resource_name.into(),
            resource_kind: resource_kind.into(),
        }
    }

    /// A bundled DER certificate (`<name>.cer`), the common case.
    pub fn certificate(host_identifier: impl Into<String>, resource_name: impl Into<String>) -> Self {
        Self::new(host_identifier, resource_name, PinningDefaults::RESOURCE_KIND)
    }
}

/// Pre-configured ground truth for pinning comparisons.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TrustAnchor {
    /// DER bytes of a pinned certificate.
    RawCertificate(Vec<u8>),
    /// DER SubjectPublicKeyInfo of a pinned key.
    PublicKey(Vec<u8>),
}

impl TrustAnchor {
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            TrustAnchor::RawCertificate(b) | TrustAnchor::PublicKey(b) => b,
        }
    }
}

/// One certificate from the peer's offered chain, as raw DER.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresentedCertificate(Vec<u8>);

impl PresentedCertificate {
    pub fn new(der: Vec<u8>) -> Self {
        Self(der)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl From<Vec<u8>> for PresentedCertificate {
    fn from(der: Vec<u8>) -> Self {
        Self(der)
    }
}

/// Canonical exportable form of a certificate's public key
/// (DER SubjectPublicKeyInfo).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ExtractedPublicKey(Vec<u8>);

impl ExtractedPublicKey {
    pub fn new(spki_der: Vec<u8>) -> Self {
        Self(spki_der)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }
}

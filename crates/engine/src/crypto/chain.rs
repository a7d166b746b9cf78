//! Handshake trust objects and chain extraction.
//!
//! The engine never names a TLS library type. Each transport integration
//! wraps its handshake state in a [`ServerTrust`] and hands it to a strategy.

use crate::domain::error::{PinError, PinResult};
use crate::domain::types::{ExtractedPublicKey, PresentedCertificate};

use super::public_key::{extract_public_key, parse_certificate};

/// The peer's side of one in-progress TLS handshake.
pub trait ServerTrust {
    /// What an accepted handshake hands back to the transport.
    type Credential;

    /// DER certificates offered by the peer, leaf first.
    /// `Err(NoTrustEvaluation)` when the handshake carries no chain at all.
    fn certificate_chain(&self) -> PinResult<Vec<Vec<u8>>>;

    /// Canonical public key of one certificate under a basic X.509 policy.
    fn evaluate_policy(&self, certificate: &[u8]) -> Option<ExtractedPublicKey> {
        extract_public_key(certificate)
    }

    fn into_credential(self) -> Self::Credential;
}

/// Ordered leaf-first chain, or empty when the chain is missing or any
/// certificate in it does not parse.
pub fn extract_chain<T: ServerTrust + ?Sized>(trust: &T) -> Vec<PresentedCertificate> {
    let raw = match trust.certificate_chain() {
        Ok(raw) => raw,
        Err(e) => {
            tracing::warn!(error = %e, "treating handshake chain as empty");
            return Vec::new();
        }
    };

    for (position, der) in raw.iter().enumerate() {
        if let Err(e) = parse_certificate(der) {
            tracing::warn!(position, error = %e, "unparseable certificate in presented chain");
            return Vec::new();
        }
    }

    raw.into_iter().map(PresentedCertificate::new).collect()
}

/// A handshake described by plain DER bytes, as delivered over FFI or from
/// a captured session. The accepted credential is the trust object itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerServerTrust {
    chain: Option<Vec<Vec<u8>>>,
}

impl DerServerTrust {
    pub fn new(chain: Vec<Vec<u8>>) -> Self {
        Self { chain: Some(chain) }
    }

    /// A challenge that arrived without any server trust attached.
    pub fn without_evaluation() -> Self {
        Self { chain: None }
    }

    pub fn chain(&self) -> Option<&[Vec<u8>]> {
        self.chain.as_deref()
    }
}

impl From<Option<Vec<Vec<u8>>>> for DerServerTrust {
    fn from(chain: Option<Vec<Vec<u8>>>) -> Self {
        Self { chain }
    }
}

impl ServerTrust for DerServerTrust {
    type Credential = DerServerTrust;

    fn certificate_chain(&self) -> PinResult<Vec<Vec<u8>>> {
        self.chain.clone().ok_or(PinError::NoTrustEvaluation)
    }

    fn into_credential(self) -> Self::Credential {
        self
    }
}

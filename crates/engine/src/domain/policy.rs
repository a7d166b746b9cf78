// crates/engine/src/domain/policy.rs
use crate::crypto::chain::{extract_chain, ServerTrust};
use crate::crypto::public_key::extract_public_key;
use crate::domain::resource_loader::ResourceLoader;
use crate::domain::store::PinStore;
use crate::domain::types::{
    ExtractedPublicKey, PinSource, PinningMode, PresentedCertificate, TrustDecision,
};

/// Compare a presented chain against a store using the crate's own X.509 key
/// extraction.
pub fn evaluate(chain: &[PresentedCertificate], store: &PinStore, policy: PinningMode) -> TrustDecision {
    evaluate_with(chain, store, policy, extract_public_key)
}

/// Compare a presented chain against a store.
///
/// `Certificate` looks only at the leaf: intermediates and roots never match.
/// `PublicKey` walks the whole chain and accepts on the first certificate
/// whose key is pinned. Both reject an empty chain or an empty store.
pub fn evaluate_with<F>(
    chain: &[PresentedCertificate],
    store: &PinStore,
    policy: PinningMode,
    mut derive_key: F,
) -> TrustDecision
where
    F: FnMut(&[u8]) -> Option<ExtractedPublicKey>,
{
    if chain.is_empty() || store.is_empty() {
        return TrustDecision::Reject;
    }

    let matched = match policy {
        PinningMode::Certificate => chain
            .first()
            .is_some_and(|leaf| store.contains_certificate(leaf.as_bytes())),
        PinningMode::PublicKey => chain.iter().enumerate().any(|(position, cert)| {
            match derive_key(cert.as_bytes()) {
                Some(key) => store.contains_public_key(key.as_bytes()),
                None => {
                    tracing::debug!(position, "no public key for presented certificate");
                    false
                }
            }
        }),
    };

    TrustDecision::from_match(matched)
}

/// A pinning policy bound to its anchors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PinningStrategy {
    CertificateEquality(PinStore),
    KeyEquality(PinStore),
}

impl PinningStrategy {
    /// Load anchors for `mode` and wrap them in the matching strategy.
    pub fn build(mode: PinningMode, sources: &[PinSource], loader: &dyn ResourceLoader) -> Self {
        let store = PinStore::build(mode, sources, loader);
        match mode {
            PinningMode::Certificate => PinningStrategy::CertificateEquality(store),
            PinningMode::PublicKey => PinningStrategy::KeyEquality(store),
        }
    }

    pub fn mode(&self) -> PinningMode {
        match self {
            PinningStrategy::CertificateEquality(_) => PinningMode::Certificate,
            PinningStrategy::KeyEquality(_) => PinningMode::PublicKey,
        }
    }

    pub fn store(&self) -> &PinStore {
        match self {
            PinningStrategy::CertificateEquality(store) | PinningStrategy::KeyEquality(store) => store,
        }
    }

    pub fn evaluate_chain(&self, chain: &[PresentedCertificate]) -> TrustDecision {
        evaluate(chain, self.store(), self.mode())
    }

    /// Decide one handshake. Keys are derived through the handshake's own
    /// policy evaluation; an accepted handshake hands back its credential.
    pub fn evaluate_handshake<H: ServerTrust>(&self, handshake: H) -> TrustDecision<H::Credential> {
        let chain = extract_chain(&handshake);
        let decision = evaluate_with(&chain, self.store(), self.mode(), |der| {
            handshake.evaluate_policy(der)
        });

        match decision {
            TrustDecision::Accept(()) => {
                tracing::debug!(mode = ?self.mode(), chain_len = chain.len(), "handshake matches pinned material");
                TrustDecision::Accept(handshake.into_credential())
            }
            TrustDecision::Reject => {
                tracing::warn!(mode = ?self.mode(), chain_len = chain.len(), "handshake does not match pinned material");
                TrustDecision::Reject
            }
        }
    }
}

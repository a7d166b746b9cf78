// crates/engine/src/lib.rs

//! Public facade for the pinning engine.
//! Builds immutable pin stores from bundled material and decides, per TLS
//! handshake, whether the peer's chain matches a pinned certificate or key.

pub mod adapters;
pub mod crypto;
pub mod domain;

use domain::error::PinResult;
use domain::resource_loader::ResourceLoader;
use domain::types::{PinSource, PinningConfig, PinningMode};

/// Strategy pinning whole leaf certificates.
pub fn certificate_pinning(sources: &[PinSource], loader: &dyn ResourceLoader) -> PinningStrategy {
    PinningStrategy::build(PinningMode::Certificate, sources, loader)
}

/// Strategy pinning public keys anywhere in the presented chain.
pub fn key_pinning(sources: &[PinSource], loader: &dyn ResourceLoader) -> PinningStrategy {
    PinningStrategy::build(PinningMode::PublicKey, sources, loader)
}

/// Host-scoped manager from a JSON configuration document.
pub fn trust_manager_from_json(json: &str, loader: &dyn ResourceLoader) -> PinResult<ServerTrustManager> {
    let config = PinningConfig::from_json(json)?;
    ServerTrustManager::from_config(&config, loader)
}

// Re-exports for convenience
pub use adapters::{DirectoryLoader, MemoryLoader};
#[cfg(feature = "rustls")]
pub use adapters::{pinned_client_config, PinnedServerCertVerifier};
pub use crypto::chain::{extract_chain, DerServerTrust, ServerTrust};
pub use crypto::public_key::extract_public_key;
pub use domain::error::PinError;
pub use domain::manager::{HostEvaluation, ServerTrustManager};
pub use domain::policy::{evaluate, PinningStrategy};
pub use domain::sink::TrustDecisionSink;
pub use domain::store::PinStore;
pub use domain::types::{
    ExtractedPublicKey, HostPinConfig, PinningDefaults, PresentedCertificate, TrustAnchor, TrustDecision,
};

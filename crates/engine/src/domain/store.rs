// crates/engine/src/domain/store.rs
use crate::crypto::public_key::{certificate_der, parse_certificate, try_extract_public_key};
use crate::domain::error::PinResult;
use crate::domain::resource_loader::ResourceLoader;
use crate::domain::types::{PinSource, PinningMode, TrustAnchor};

/// Immutable set of trust anchors for one pinning strategy.
///
/// Built once before any handshake and then only read, so a single store can
/// be shared across concurrent evaluations without locking. Sources that fail
/// to load or parse are logged and left out; an empty store trusts nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PinStore {
    anchors: Vec<TrustAnchor>,
    hosts: Vec<String>,
}

impl PinStore {
    pub fn build(mode: PinningMode, sources: &[PinSource], loader: &dyn ResourceLoader) -> Self {
        let mut store = PinStore::default();

        for source in sources {
            if !store.hosts.contains(&source.host_identifier) {
                store.hosts.push(source.host_identifier.clone());
            }
            match load_anchor(mode, source, loader) {
                Ok(anchor) => store.insert(anchor),
                Err(e) => tracing::warn!(
                    host = %source.host_identifier,
                    resource = %source.resource_name,
                    kind = %source.resource_kind,
                    error = %e,
                    "dropping trust anchor"
                ),
            }
        }

        if store.is_empty() {
            tracing::warn!(?mode, hosts = ?store.hosts, "pin store is empty; every handshake will be rejected");
        } else {
            tracing::info!(?mode, anchors = store.len(), hosts = ?store.hosts, "pin store ready");
        }
        store
    }

    /// Store over anchors already in memory.
    pub fn from_anchors(anchors: impl IntoIterator<Item = TrustAnchor>) -> Self {
        let mut store = PinStore::default();
        for anchor in anchors {
            store.insert(anchor);
        }
        store
    }

    fn insert(&mut self, anchor: TrustAnchor) {
        if !self.anchors.contains(&anchor) {
            self.anchors.push(anchor);
        }
    }

    pub fn anchors(&self) -> &[TrustAnchor] {
        &self.anchors
    }

    pub fn hosts(&self) -> &[String] {
        &self.hosts
    }

    pub fn len(&self) -> usize {
        self.anchors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.anchors.is_empty()
    }

    pub fn contains_certificate(&self, der: &[u8]) -> bool {
        self.anchors
            .iter()
            .any(|a| matches!(a, TrustAnchor::RawCertificate(c) if c.as_slice() == der))
    }

    pub fn contains_public_key(&self, spki: &[u8]) -> bool {
        self.anchors
            .iter()
            .any(|a| matches!(a, TrustAnchor::PublicKey(k) if k.as_slice() == spki))
    }
}

fn load_anchor(
    mode: PinningMode,
    source: &PinSource,
    loader: &dyn ResourceLoader,
) -> PinResult<TrustAnchor> {
    let bytes = loader.load_bytes(
        &source.host_identifier,
        &source.resource_name,
        &source.resource_kind,
    )?;
    let der = certificate_der(&bytes)?;
    match mode {
        PinningMode::Certificate => {
            parse_certificate(&der)?;
            Ok(TrustAnchor::RawCertificate(der))
        }
        PinningMode::PublicKey => {
            let key = try_extract_public_key(&der)?;
            Ok(TrustAnchor::PublicKey(key.into_bytes()))
        }
    }
}

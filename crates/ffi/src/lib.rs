use std::sync::Arc;

use pinning_engine::domain::error::PinError;
use pinning_engine::domain::types as dt;
use pinning_engine::{
    DerServerTrust, DirectoryLoader, HostEvaluation, PinningStrategy, ServerTrustManager,
    TrustDecisionSink,
};

#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum FfiError {
    #[error("{message}")]
    Generic { message: String },
}

impl From<PinError> for FfiError {
    fn from(e: PinError) -> Self {
        FfiError::Generic {
            message: e.to_string(),
        }
    }
}

// ===== FFI types mirroring the public Rust API (FFI-friendly) =====

#[derive(uniffi::Enum, Debug, Clone, Copy)]
pub enum FfiPinningMode { Certificate, PublicKey }

impl From<FfiPinningMode> for dt::PinningMode {
    fn from(v: FfiPinningMode) -> Self {
        match v { FfiPinningMode::Certificate => dt::PinningMode::Certificate, FfiPinningMode::PublicKey => dt::PinningMode::PublicKey }
    }
}

impl From<dt::PinningMode> for FfiPinningMode {
    fn from(v: dt::PinningMode) -> Self {
        match v { dt::PinningMode::Certificate => FfiPinningMode::Certificate, dt::PinningMode::PublicKey => FfiPinningMode::PublicKey }
    }
}

#[derive(uniffi::Record, Debug, Clone)]
pub struct FfiPinSource {
    pub host_identifier: String,
    pub resource_name: String,
    pub resource_kind: String,
}

impl From<FfiPinSource> for dt::PinSource {
    fn from(v: FfiPinSource) -> Self {
        dt::PinSource::new(v.host_identifier, v.resource_name, v.resource_kind)
    }
}

/// Mirrors `URLSession.AuthChallengeDisposition`. `UseCredential` means the
/// host should continue with the server trust it was handed.
#[derive(uniffi::Enum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiChallengeDisposition { UseCredential, CancelAuthenticationChallenge, PerformDefaultHandling }

struct ChallengeSink;

impl TrustDecisionSink for ChallengeSink {
    type Credential = DerServerTrust;
    type Outcome = FfiChallengeDisposition;

    fn accept(&self, _credential: DerServerTrust) -> FfiChallengeDisposition {
        FfiChallengeDisposition::UseCredential
    }

    fn reject(&self) -> FfiChallengeDisposition {
        FfiChallengeDisposition::CancelAuthenticationChallenge
    }
}

// ===== Objects =====

#[derive(uniffi::Object, Debug)]
pub struct FfiPinningStrategy {
    inner: PinningStrategy,
}

#[uniffi::export]
impl FfiPinningStrategy {
    /// Load pin material from `<directory>/<resource_name>.<resource_kind>`.
    #[uniffi::constructor]
    pub fn from_directory(mode: FfiPinningMode, sources: Vec<FfiPinSource>, directory: String) -> Arc<Self> {
        let sources: Vec<dt::PinSource> = sources.into_iter().map(Into::into).collect();
        let loader = DirectoryLoader::new(directory);
        Arc::new(Self { inner: PinningStrategy::build(mode.into(), &sources, &loader) })
    }

    pub fn mode(&self) -> FfiPinningMode {
        self.inner.mode().into()
    }

    pub fn anchor_count(&self) -> u64 {
        self.inner.store().len() as u64
    }

    /// Evaluate a DER chain (leaf first). `None` means the challenge carried
    /// no server trust.
    pub fn evaluate_chain(&self, chain: Option<Vec<Vec<u8>>>) -> FfiChallengeDisposition {
        ChallengeSink.apply(self.inner.evaluate_handshake(DerServerTrust::from(chain)))
    }
}

#[derive(uniffi::Object, Debug)]
pub struct FfiServerTrustManager {
    inner: ServerTrustManager,
}

#[uniffi::export]
impl FfiServerTrustManager {
    #[uniffi::constructor]
    pub fn from_json(config_json: String, directory: String) -> Result<Arc<Self>, FfiError> {
        let loader = DirectoryLoader::new(directory);
        let inner = pinning_engine::trust_manager_from_json(&config_json, &loader)?;
        Ok(Arc::new(Self { inner }))
    }

    pub fn is_pinned(&self, host: String) -> bool {
        self.inner.strategy_for(&host).is_some()
    }

    pub fn evaluate(&self, host: String, chain: Option<Vec<Vec<u8>>>) -> FfiChallengeDisposition {
        match self.inner.evaluate_handshake(&host, DerServerTrust::from(chain)) {
            HostEvaluation::Decided(decision) => ChallengeSink.apply(decision),
            HostEvaluation::DefaultHandling(_) => FfiChallengeDisposition::PerformDefaultHandling,
        }
    }
}

uniffi::setup_scaffolding!();

// crates/engine/src/domain/error.rs
use thiserror::Error;

/// Failures inside the pinning path. Everything raised while loading pin
/// material or reading a handshake is logged and absorbed into a rejection;
/// only configuration parsing hands these back to the caller.
#[derive(Debug, Error)]
pub enum PinError {
  #[error("pin resource not found: {name}.{kind}")]
  ResourceNotFound { name: String, kind: String },

  #[error(transparent)]
  ResourceLoad(#[from] std::io::Error),

  #[error("certificate parse failure: {0}")]
  CertificateParse(String),

  #[error(transparent)]
  OpenSsl(#[from] openssl::error::ErrorStack),

  #[error("handshake carries no trust evaluation")]
  NoTrustEvaluation,

  #[error("configuration: {0}")]
  Config(String),

  #[error(transparent)]
  Json(#[from] serde_json::Error),

  #[error("no pinning evaluator for host: {0}")]
  NoEvaluator(String),

  #[cfg(feature = "rustls")]
  #[error(transparent)]
  Tls(#[from] rustls::Error),
}

pub type PinResult<T> = Result<T, PinError>;

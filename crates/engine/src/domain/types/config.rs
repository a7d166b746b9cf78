use serde::{Deserialize, Serialize};
use url::Host;

use crate::domain::error::{PinError, PinResult};

use super::core::PinningMode;
use super::source::PinSource;

/// Centralized defaults for pinning configuration.
pub struct PinningDefaults;

impl PinningDefaults {
    pub const RESOURCE_KIND: &'static str = "cer"; // bundled DER certificate
    pub const MODE: PinningMode = PinningMode::Certificate;
    pub const ALL_HOSTS_MUST_BE_EVALUATED: bool = false; // unpinned hosts keep default handling
}

/// Pinning setup for a single host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostPinConfig {
    pub host: String,
    #[serde(default = "default_mode")]
    pub mode: PinningMode,
    pub sources: Vec<PinSource>,
}

fn default_mode() -> PinningMode {
    PinningDefaults::MODE
}

impl HostPinConfig {
    pub fn new(host: impl Into<String>, mode: PinningMode, sources: Vec<PinSource>) -> Self {
        Self { host: host.into(), mode, sources }
    }
}

/// Configuration for a host-scoped trust manager.
///
/// ```json
/// {
///   "all_hosts_must_be_evaluated": true,
///   "hosts": [
///     { "host": "api.example.com", "mode": "public_key",
///       "sources": [{ "host_identifier": "api.example.com", "resource_name": "api" }] }
///   ]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PinningConfig {
    #[serde(default)]
    pub hosts: Vec<HostPinConfig>,
    /// Reject handshakes for hosts that have no pinning entry.
    #[serde(default = "default_all_hosts_must_be_evaluated")]
    pub all_hosts_must_be_evaluated: bool,
}

fn default_all_hosts_must_be_evaluated() -> bool {
    PinningDefaults::ALL_HOSTS_MUST_BE_EVALUATED
}

impl Default for PinningConfig {
    fn default() -> Self {
        Self {
            hosts: Vec::new(),
            all_hosts_must_be_evaluated: PinningDefaults::ALL_HOSTS_MUST_BE_EVALUATED,
        }
    }
}

impl PinningConfig {
    /// Every host must be pinned; anything else is rejected.
    pub fn secure_default(hosts: Vec<HostPinConfig>) -> Self {
        Self { hosts, all_hosts_must_be_evaluated: true }
    }

    pub fn from_json(json: &str) -> PinResult<Self> {
        let cfg: PinningConfig = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Host names must parse and appear at most once.
    pub fn validate(&self) -> PinResult<()> {
        let mut seen = Vec::with_capacity(self.hosts.len());
        for entry in &self.hosts {
            let host = normalize_host(&entry.host)?;
            if seen.contains(&host) {
                return Err(PinError::Config(format!("duplicate host entry: {host}")));
            }
            seen.push(host);
        }
        Ok(())
    }
}

/// Canonical form used as the lookup key for a host: IDNA/lowercased domain,
/// or a bracketed IPv6 literal.
pub fn normalize_host(host: &str) -> PinResult<String> {
    let trimmed = host.trim().trim_end_matches('.');
    if trimmed.is_empty() {
        return Err(PinError::Config("empty host".into()));
    }
    let input = if trimmed.contains(':') && !trimmed.starts_with('[') {
        format!("[{trimmed}]")
    } else {
        trimmed.to_string()
    };
    let parsed = Host::parse(&input)
        .map_err(|e| PinError::Config(format!("invalid host {host:?}: {e}")))?;
    Ok(parsed.to_string())
}

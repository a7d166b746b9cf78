// crates/engine/src/domain/manager.rs
use std::collections::HashMap;

use crate::crypto::chain::ServerTrust;
use crate::domain::error::{PinError, PinResult};
use crate::domain::policy::PinningStrategy;
use crate::domain::resource_loader::ResourceLoader;
use crate::domain::types::{normalize_host, PinningConfig, TrustDecision};

/// Result of routing a handshake through the trust manager.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostEvaluation<H, C> {
    /// A pinning strategy (or the all-hosts rule) decided the handshake.
    Decided(TrustDecision<C>),
    /// The host is not pinned; the transport applies its default trust
    /// evaluation to the returned handshake.
    DefaultHandling(H),
}

/// Host-scoped set of pinning strategies.
#[derive(Debug, Clone)]
pub struct ServerTrustManager {
    strategies: HashMap<String, PinningStrategy>,
    all_hosts_must_be_evaluated: bool,
}

impl ServerTrustManager {
    /// Build one strategy per configured host. Invalid or duplicate host
    /// names are configuration errors; unloadable pin material is not.
    pub fn from_config(config: &PinningConfig, loader: &dyn ResourceLoader) -> PinResult<Self> {
        config.validate()?;
        let mut strategies = HashMap::with_capacity(config.hosts.len());
        for entry in &config.hosts {
            let host = normalize_host(&entry.host)?;
            let strategy = PinningStrategy::build(entry.mode, &entry.sources, loader);
            strategies.insert(host, strategy);
        }
        Ok(Self {
            strategies,
            all_hosts_must_be_evaluated: config.all_hosts_must_be_evaluated,
        })
    }

    /// Manager over strategies that are already built.
    pub fn from_strategies(
        strategies: impl IntoIterator<Item = (String, PinningStrategy)>,
        all_hosts_must_be_evaluated: bool,
    ) -> PinResult<Self> {
        let mut map = HashMap::new();
        for (host, strategy) in strategies {
            let host = normalize_host(&host)?;
            if map.insert(host.clone(), strategy).is_some() {
                return Err(PinError::Config(format!("duplicate host entry: {host}")));
            }
        }
        Ok(Self { strategies: map, all_hosts_must_be_evaluated })
    }

    pub fn all_hosts_must_be_evaluated(&self) -> bool {
        self.all_hosts_must_be_evaluated
    }

    pub fn hosts(&self) -> impl Iterator<Item = &str> {
        self.strategies.keys().map(String::as_str)
    }

    pub fn strategy_for(&self, host: &str) -> Option<&PinningStrategy> {
        let host = normalize_host(host).ok()?;
        self.strategies.get(&host)
    }

    /// Like [`strategy_for`](Self::strategy_for), but an unpinned host is an
    /// error when every host must be evaluated.
    pub fn evaluator_for(&self, host: &str) -> PinResult<Option<&PinningStrategy>> {
        match self.strategy_for(host) {
            Some(strategy) => Ok(Some(strategy)),
            None if self.all_hosts_must_be_evaluated => Err(PinError::NoEvaluator(host.to_string())),
            None => Ok(None),
        }
    }

    pub fn evaluate_handshake<H: ServerTrust>(
        &self,
        host: &str,
        handshake: H,
    ) -> HostEvaluation<H, H::Credential> {
        match self.evaluator_for(host) {
            Ok(Some(strategy)) => HostEvaluation::Decided(strategy.evaluate_handshake(handshake)),
            Ok(None) => {
                tracing::debug!(host, "host not pinned; deferring to default handling");
                HostEvaluation::DefaultHandling(handshake)
            }
            Err(e) => {
                tracing::warn!(error = %e, "rejecting handshake");
                HostEvaluation::Decided(TrustDecision::Reject)
            }
        }
    }
}

use serde::{Deserialize, Serialize};

/// Which material a strategy pins against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PinningMode {
    /// Whole leaf certificate, byte for byte.
    Certificate,
    /// Public key of any certificate in the presented chain.
    PublicKey,
}

/// Outcome of evaluating one handshake. `Accept` carries the credential the
/// transport handed us so the session continues with the real peer identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrustDecision<C = ()> {
    Accept(C),
    Reject,
}

impl<C> TrustDecision<C> {
    pub fn is_accept(&self) -> bool {
        matches!(self, TrustDecision::Accept(_))
    }
}

impl TrustDecision {
    pub(crate) fn from_match(matched: bool) -> Self {
        if matched {
            TrustDecision::Accept(())
        } else {
            TrustDecision::Reject
        }
    }
}

// crates/engine/src/domain/sink.rs
use crate::domain::types::TrustDecision;

/// Turns a trust decision into whatever the surrounding transport expects
/// from its handshake callback. There is no partial trust: a rejection ends
/// the handshake with no credential and no fallback negotiation.
pub trait TrustDecisionSink {
    type Credential;
    type Outcome;

    fn accept(&self, credential: Self::Credential) -> Self::Outcome;

    fn reject(&self) -> Self::Outcome;

    fn apply(&self, decision: TrustDecision<Self::Credential>) -> Self::Outcome {
        match decision {
            TrustDecision::Accept(credential) => self.accept(credential),
            TrustDecision::Reject => self.reject(),
        }
    }
}

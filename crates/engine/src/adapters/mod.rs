// Transport and resource adapters around the pinning core.

pub mod resources;

#[cfg(feature = "rustls")]
pub mod rustls_verifier;

pub use resources::*;

#[cfg(feature = "rustls")]
pub use rustls_verifier::*;

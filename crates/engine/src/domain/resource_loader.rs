// crates/engine/src/domain/resource_loader.rs
use crate::domain::error::PinResult;

/// Read access to bundled pin material. Only consulted while a store is
/// built, never on the handshake path.
pub trait ResourceLoader: Send + Sync {
    /// Raw bytes of `<resource_name>.<resource_kind>` for a host, or
    /// `ResourceNotFound`.
    fn load_bytes(
        &self,
        host_identifier: &str,
        resource_name: &str,
        resource_kind: &str,
    ) -> PinResult<Vec<u8>>;
}

// Re-export all types so callers can reach them through `domain::types`.

pub use self::core::*;
pub use self::source::*;
pub use self::config::*;

// Module declarations
mod core;
mod source;
mod config;

pub mod chain;
pub mod public_key;

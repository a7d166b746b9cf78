pub mod error;
pub mod types;
pub mod resource_loader;
pub mod store;
pub mod policy;
pub mod sink;
pub mod manager;

// modelgen-core/src/infrastructure/mod.rs

pub mod compiler;
pub mod config;
pub mod error;
pub mod fs;
pub mod reporter;

pub use compiler::{JinjaRenderer, SchemaDiscovery};
pub use reporter::TracingReporter;

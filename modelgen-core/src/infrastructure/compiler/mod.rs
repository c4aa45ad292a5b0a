pub mod discovery;
pub mod jinja;

pub use discovery::SchemaDiscovery;
pub use jinja::JinjaRenderer;

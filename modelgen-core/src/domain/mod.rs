pub mod context;
pub mod error;
pub mod model;
pub mod ports;

// Re-exports pratiques pour simplifier les imports ailleurs
pub use context::{ContextBuilder, DEFAULT_SCHEMA, RenderContext};
pub use error::DomainError;
pub use model::{DomainModel, EntityDefinition, OutputKind, SchemaFragment};

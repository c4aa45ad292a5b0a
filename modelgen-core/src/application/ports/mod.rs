pub mod renderer;
pub mod reporter;

pub use renderer::TemplateEngine;
pub use reporter::{PipelineReporter, PipelineStage};

use crate::domain::context::RenderContext;
use crate::error::ModelgenError;

pub trait TemplateEngine: Send + Sync {
    /// Renders `template_name` against one entity context. No side effects.
    fn render(&self, template_name: &str, context: &RenderContext<'_>)
    -> Result<String, ModelgenError>;

    fn has_template(&self, template_name: &str) -> bool;
}

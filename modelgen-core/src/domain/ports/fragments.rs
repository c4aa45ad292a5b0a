use crate::domain::model::SchemaFragment;
use crate::error::ModelgenError;
use std::path::Path;

/// Source of domain schema fragments (marker-bearing documents), in merge order.
pub trait FragmentSource {
    fn load(&self, root: &Path) -> Result<Vec<SchemaFragment>, ModelgenError>;
}

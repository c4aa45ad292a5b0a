// modelgen-core/src/application/output.rs

use std::path::{Component, Path, PathBuf};

use crate::domain::model::OutputKind;
use crate::error::ModelgenError;
use crate::infrastructure::fs::write_file;

/// Lays out `<root>/<kind subdir>/<lower(entity)><kind suffix>`.
pub struct OutputWriter {
    root: PathBuf,
}

impl OutputWriter {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn path_for(&self, entity: &str, kind: OutputKind) -> Result<PathBuf, ModelgenError> {
        let file_name = kind.file_name(entity);

        // Zero-Trust Path Traversal Guard: the file name must stay a single component
        let mut components = Path::new(&file_name).components();
        let single_normal = matches!(
            (components.next(), components.next()),
            (Some(Component::Normal(_)), None)
        );
        if entity.is_empty() || !single_normal {
            return Err(ModelgenError::UnsafePath(entity.to_string()));
        }

        Ok(self.root.join(kind.subdir()).join(file_name))
    }

    /// Overwrites the target unconditionally.
    pub fn write(
        &self,
        entity: &str,
        kind: OutputKind,
        content: &str,
    ) -> Result<PathBuf, ModelgenError> {
        let path = self.path_for(entity, kind)?;
        write_file(&path, content)?;
        Ok(path)
    }
}

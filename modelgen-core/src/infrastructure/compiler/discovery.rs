// modelgen-core/src/infrastructure/compiler/discovery.rs

// Walks the schema tree and keeps only the YAML documents tagged with the
// marker key. Any syntax error aborts the whole discovery.

use serde_yaml::Value;
use std::fs;
use std::path::Path;
use tracing::{debug, instrument};
use walkdir::WalkDir;

use crate::domain::error::DomainError;
use crate::domain::model::SchemaFragment;
use crate::domain::ports::FragmentSource;
use crate::error::ModelgenError;
use crate::infrastructure::config::GeneratorConfig;
use crate::infrastructure::error::InfrastructureError;

pub struct SchemaDiscovery {
    marker: String,
    extension: String,
}

impl FragmentSource for SchemaDiscovery {
    fn load(&self, root: &Path) -> Result<Vec<SchemaFragment>, ModelgenError> {
        let fragments = self.discover(root)?;
        if fragments.is_empty() {
            return Err(DomainError::NoDomainEntries {
                root: root.to_path_buf(),
                marker: self.marker.clone(),
            }
            .into());
        }
        Ok(fragments)
    }
}

impl SchemaDiscovery {
    pub fn new(marker: impl Into<String>, extension: impl Into<String>) -> Self {
        let extension: String = extension.into();
        Self {
            marker: marker.into(),
            extension: extension.trim_start_matches('.').to_string(),
        }
    }

    pub fn from_config(config: &GeneratorConfig) -> Self {
        Self::new(&config.marker_key, &config.schema_extension)
    }

    /// Marker-bearing fragments under `root`, sorted by path. A missing root yields none.
    #[instrument(skip(self))]
    pub fn discover(&self, root: &Path) -> Result<Vec<SchemaFragment>, InfrastructureError> {
        let mut fragments = Vec::new();
        if !root.exists() {
            debug!(root = ?root, "Schema directory does not exist");
            return Ok(fragments);
        }

        let walker = WalkDir::new(root).follow_links(true).sort_by_file_name();

        for entry in walker {
            let entry = entry?;
            let path = entry.path();

            if !entry.file_type().is_file()
                || !path.extension().is_some_and(|ext| ext == self.extension.as_str())
            {
                continue;
            }

            match self.parse_file(path)? {
                Some(fragment) => {
                    debug!(path = ?path, "📝 Domain fragment found");
                    fragments.push(fragment);
                }
                None => debug!(path = ?path, "Skipping YAML file without marker"),
            }
        }

        Ok(fragments)
    }

    fn parse_file(&self, path: &Path) -> Result<Option<SchemaFragment>, InfrastructureError> {
        let content = fs::read_to_string(path).map_err(|source| InfrastructureError::ReadFailed {
            path: path.to_path_buf(),
            source,
        })?;

        let yaml_error = |source: serde_yaml::Error| InfrastructureError::YamlParse {
            path: path.to_path_buf(),
            source,
        };

        let mut document: Value = serde_yaml::from_str(&content).map_err(yaml_error)?;
        // `<<: *anchor` merge keys are resolved before the marker lookup
        document.apply_merge().map_err(yaml_error)?;

        // Empty documents, lists or scalars cannot carry the marker
        let Value::Mapping(mut document) = document else {
            return Ok(None);
        };

        Ok(document.remove(self.marker.as_str()).map(|body| SchemaFragment {
            path: path.to_path_buf(),
            body,
        }))
    }
}

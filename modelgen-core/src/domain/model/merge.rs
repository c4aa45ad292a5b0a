// modelgen-core/src/domain/model/merge.rs

// Fusion des fragments : shallow overwrite, the last processed fragment wins
// the whole key. Nested fields are never merged.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use super::{DomainModel, FragmentBody, SchemaFragment};
use crate::domain::error::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Enums,
    Entities,
    Types,
    Metadata,
    Targets,
}

impl std::fmt::Display for Section {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Section::Enums => "enums",
            Section::Entities => "entities",
            Section::Types => "types",
            Section::Metadata => "metadata",
            Section::Targets => "targets",
        };
        f.write_str(name)
    }
}

/// A key defined by two fragments; `current` replaced `previous`.
#[derive(Debug, Clone, PartialEq)]
pub struct MergeCollision {
    pub section: Section,
    pub key: String,
    pub previous: PathBuf,
    pub current: PathBuf,
}

#[derive(Debug)]
pub struct MergeOutcome {
    pub model: DomainModel,
    pub collisions: Vec<MergeCollision>,
}

pub struct DomainMerger {
    marker: String,
    model: DomainModel,
    origins: HashMap<(Section, String), PathBuf>,
    collisions: Vec<MergeCollision>,
}

impl DomainMerger {
    pub fn new(marker: impl Into<String>) -> Self {
        Self {
            marker: marker.into(),
            model: DomainModel::default(),
            origins: HashMap::new(),
            collisions: Vec::new(),
        }
    }

    /// Folds one fragment into the accumulators.
    pub fn absorb(&mut self, fragment: &SchemaFragment) -> Result<(), DomainError> {
        if !fragment.body.is_mapping() {
            return Err(DomainError::MarkerNotMapping {
                path: fragment.path.clone(),
                marker: self.marker.clone(),
            });
        }

        let body: FragmentBody =
            serde_yaml::from_value(fragment.body.clone()).map_err(|e| {
                DomainError::InvalidFragment {
                    path: fragment.path.clone(),
                    marker: self.marker.clone(),
                    reason: e.to_string(),
                }
            })?;

        let path = fragment.path.as_path();
        let FragmentBody {
            enums,
            entities,
            types,
            metadata,
            targets,
        } = body;

        for (key, value) in enums {
            self.track(Section::Enums, &key, path);
            self.model.enums.insert(key, value);
        }
        for (key, value) in entities {
            self.track(Section::Entities, &key, path);
            self.model.entities.insert(key, value);
        }
        for (key, value) in types {
            self.track(Section::Types, &key, path);
            self.model.types.insert(key, value);
        }
        for (key, value) in metadata {
            self.track(Section::Metadata, &key, path);
            self.model.metadata.entries.insert(key, value);
        }
        for (key, value) in targets {
            self.track(Section::Targets, &key, path);
            self.model.targets.insert(key, value);
        }

        Ok(())
    }

    fn track(&mut self, section: Section, key: &str, path: &Path) {
        if let Some(previous) = self
            .origins
            .insert((section, key.to_string()), path.to_path_buf())
        {
            self.collisions.push(MergeCollision {
                section,
                key: key.to_string(),
                previous,
                current: path.to_path_buf(),
            });
        }
    }

    /// Closes the merge. A model without entities is rejected.
    pub fn finish(self) -> Result<MergeOutcome, DomainError> {
        if self.model.entities.is_empty() {
            return Err(DomainError::NoEntities {
                marker: self.marker,
            });
        }

        Ok(MergeOutcome {
            model: self.model,
            collisions: self.collisions,
        })
    }
}

/// Merges fragments in the given order (traversal order decides the winner).
pub fn merge_fragments(
    fragments: &[SchemaFragment],
    marker: &str,
) -> Result<MergeOutcome, DomainError> {
    let mut merger = DomainMerger::new(marker);
    for fragment in fragments {
        merger.absorb(fragment)?;
    }
    merger.finish()
}

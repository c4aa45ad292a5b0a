// modelgen-core/src/domain/model/mod.rs

pub mod merge;

pub use merge::{DomainMerger, MergeCollision, MergeOutcome, Section, merge_fragments};

use serde::{Deserialize, Deserializer, Serialize};
use serde_yaml::{Mapping, Value};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Shared catalog of named definitions (`enums`, `types`).
pub type Catalog = BTreeMap<String, Value>;

/// `null` sections count as empty (`entities:` with no body is legal).
pub(crate) fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// =============================================================================
//  1. FRAGMENT (one YAML document carrying the marker key)
// =============================================================================

/// The marker value of one schema file, not yet validated.
#[derive(Debug, Clone)]
pub struct SchemaFragment {
    pub path: PathBuf,
    pub body: Value,
}

/// Typed view of a fragment body once the marker value is known to be a mapping.
#[derive(Debug, Deserialize, Default)]
pub struct FragmentBody {
    #[serde(default, deserialize_with = "nullable")]
    pub enums: Catalog,
    #[serde(default, deserialize_with = "nullable")]
    pub entities: BTreeMap<String, EntityDefinition>,
    #[serde(default, deserialize_with = "nullable")]
    pub types: Catalog,
    #[serde(default, deserialize_with = "nullable")]
    pub metadata: BTreeMap<String, Value>,
    #[serde(default, deserialize_with = "nullable")]
    pub targets: BTreeMap<String, Value>,
}

// =============================================================================
//  2. DOMAIN MODEL
// =============================================================================

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct DomainModel {
    pub enums: Catalog,
    pub entities: BTreeMap<String, EntityDefinition>,
    pub types: Catalog,
    pub metadata: Metadata,
    pub targets: BTreeMap<String, Value>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct EntityDefinition {
    #[serde(default, deserialize_with = "nullable")]
    pub storage: StorageConfig,

    // Mapping keeps the declaration order (column order in the generated artifacts)
    #[serde(default, deserialize_with = "nullable")]
    pub attributes: Mapping,

    #[serde(default, deserialize_with = "nullable")]
    pub indexes: Vec<Value>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct StorageConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<Value>,

    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl StorageConfig {
    /// `table` as a name: scalars are stringified (`table: 2024` -> `"2024"`).
    pub fn table_name(&self) -> Option<String> {
        self.table.as_ref().and_then(scalar_name)
    }

    pub fn schema_name(&self) -> Option<String> {
        self.schema.as_ref().and_then(scalar_name)
    }
}

// Sequences and mappings cannot name a table; the defaulting cascade applies
fn scalar_name(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Project-wide defaults (`metadata` section), merged key by key.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(transparent)]
pub struct Metadata {
    pub entries: BTreeMap<String, Value>,
}

impl Metadata {
    pub fn default_schema(&self) -> Option<&str> {
        self.entries.get("default_schema").and_then(Value::as_str)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }
}

impl DomainModel {
    /// Output kinds requested through `targets`, all of them when none is recognised.
    pub fn requested_outputs(&self) -> Vec<OutputKind> {
        let requested: Vec<OutputKind> = OutputKind::ALL
            .into_iter()
            .filter(|kind| {
                self.targets.iter().any(|(key, value)| {
                    OutputKind::from_key(key) == Some(*kind) && is_enabled(value)
                })
            })
            .collect();

        let mentioned = self
            .targets
            .keys()
            .any(|key| OutputKind::from_key(key).is_some());

        if mentioned {
            requested
        } else {
            OutputKind::ALL.to_vec()
        }
    }
}

fn is_enabled(value: &Value) -> bool {
    match value {
        Value::Bool(flag) => *flag,
        Value::Mapping(map) => map
            .get("enabled")
            .and_then(Value::as_bool)
            .unwrap_or(true),
        _ => true,
    }
}

// =============================================================================
//  3. OUTPUT KINDS
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum OutputKind {
    SourceModel,
    TableDefinition,
}

impl OutputKind {
    pub const ALL: [OutputKind; 2] = [OutputKind::SourceModel, OutputKind::TableDefinition];

    pub fn key(self) -> &'static str {
        match self {
            OutputKind::SourceModel => "python",
            OutputKind::TableDefinition => "sql",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        match key.to_lowercase().as_str() {
            "python" | "sqlmodel" | "source_model" => Some(OutputKind::SourceModel),
            "sql" | "sqlite" | "table_definition" => Some(OutputKind::TableDefinition),
            _ => None,
        }
    }

    pub fn template_name(self) -> &'static str {
        match self {
            OutputKind::SourceModel => "python_sqlmodel.j2",
            OutputKind::TableDefinition => "sqlite_model.j2",
        }
    }

    pub fn subdir(self) -> &'static str {
        self.key()
    }

    pub fn suffix(self) -> &'static str {
        match self {
            OutputKind::SourceModel => "_model.py",
            OutputKind::TableDefinition => "_table.sql",
        }
    }

    pub fn file_name(self, entity: &str) -> String {
        format!("{}{}", entity.to_lowercase(), self.suffix())
    }
}

impl std::fmt::Display for OutputKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use anyhow::Result;

    fn model_with_targets(yaml: &str) -> Result<DomainModel> {
        Ok(DomainModel {
            targets: serde_yaml::from_str(yaml)?,
            ..Default::default()
        })
    }

    #[test]
    fn test_entity_null_sections_are_empty() -> Result<()> {
        let entity: EntityDefinition = serde_yaml::from_str("storage:\nattributes:\nindexes:\n")?;
        assert_eq!(entity, EntityDefinition::default());
        Ok(())
    }

    #[test]
    fn test_attributes_keep_declaration_order() -> Result<()> {
        let entity: EntityDefinition =
            serde_yaml::from_str("attributes:\n  zeta: int\n  alpha: str\n  mid: float\n")?;
        let keys: Vec<&str> = entity
            .attributes
            .keys()
            .filter_map(Value::as_str)
            .collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
        Ok(())
    }

    #[test]
    fn test_storage_keeps_extra_keys() -> Result<()> {
        let storage: StorageConfig = serde_yaml::from_str("table: products\nengine: wal\n")?;
        assert_eq!(storage.table_name().as_deref(), Some("products"));
        assert!(storage.schema.is_none());
        assert_eq!(storage.extra.get("engine"), Some(&Value::from("wal")));
        Ok(())
    }

    #[test]
    fn test_storage_scalars_are_kept_verbatim() -> Result<()> {
        let storage: StorageConfig = serde_yaml::from_str("table: 2024
schema: [a, b]
")?;
        assert_eq!(storage.table, Some(Value::from(2024)));
        assert_eq!(storage.table_name().as_deref(), Some("2024"));
        assert!(storage.schema.as_ref().is_some_and(Value::is_sequence));
        assert_eq!(storage.schema_name(), None);
        Ok(())
    }

    #[test]
    fn test_requested_outputs_default_to_all() -> Result<()> {
        let model = model_with_targets("{}")?;
        assert_eq!(model.requested_outputs(), OutputKind::ALL.to_vec());

        let model = model_with_targets("docs: true")?;
        assert_eq!(model.requested_outputs(), OutputKind::ALL.to_vec());
        Ok(())
    }

    #[test]
    fn test_requested_outputs_honour_flags() -> Result<()> {
        let model = model_with_targets("sqlite: true\npython: false")?;
        assert_eq!(model.requested_outputs(), vec![OutputKind::TableDefinition]);

        let model = model_with_targets("sqlmodel:\n  enabled: true\nsql:\n  enabled: false")?;
        assert_eq!(model.requested_outputs(), vec![OutputKind::SourceModel]);
        Ok(())
    }

    #[test]
    fn test_output_file_names() {
        assert_eq!(OutputKind::SourceModel.file_name("Product"), "product_model.py");
        assert_eq!(
            OutputKind::TableDefinition.file_name("DiningTable"),
            "diningtable_table.sql"
        );
    }
}

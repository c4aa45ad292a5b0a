// modelgen-core/src/infrastructure/config/generator.rs

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, instrument};
use validator::Validate;

use crate::domain::context::DEFAULT_SCHEMA;
use crate::infrastructure::error::InfrastructureError;

pub const CONFIG_FILE: &str = "modelgen.yaml";

#[derive(Debug, Deserialize, Serialize, Clone, Validate)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    #[serde(rename = "schema-dir")]
    #[validate(length(min = 1))]
    pub schema_dir: String,

    #[serde(rename = "template-dir")]
    #[validate(length(min = 1))]
    pub template_dir: String,

    #[serde(rename = "output-dir")]
    #[validate(length(min = 1))]
    pub output_dir: String,

    /// Top-level key that tags a YAML document as a domain schema fragment.
    #[serde(rename = "marker-key")]
    #[validate(length(min = 1))]
    pub marker_key: String,

    #[serde(rename = "schema-extension")]
    #[validate(length(min = 1))]
    pub schema_extension: String,

    #[serde(rename = "fallback-schema")]
    #[validate(length(min = 1))]
    pub fallback_schema: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            schema_dir: "db-meta/schemas".to_string(),
            template_dir: "templates".to_string(),
            output_dir: "generated".to_string(),
            marker_key: "botecopro_domain".to_string(),
            schema_extension: "yaml".to_string(),
            fallback_schema: DEFAULT_SCHEMA.to_string(),
        }
    }
}

impl GeneratorConfig {
    pub fn schema_path(&self, base_dir: &Path) -> PathBuf {
        base_dir.join(&self.schema_dir)
    }

    pub fn template_path(&self, base_dir: &Path) -> PathBuf {
        base_dir.join(&self.template_dir)
    }

    pub fn output_path(&self, base_dir: &Path) -> PathBuf {
        base_dir.join(&self.output_dir)
    }
}

// --- LOADER ---

/// Defaults, then `modelgen.yaml` (if any), then `MODELGEN_*` environment overrides.
#[instrument(skip(base_dir))]
pub fn load_generator_config(base_dir: &Path) -> Result<GeneratorConfig, InfrastructureError> {
    let mut config = load_config_file(base_dir)?;
    apply_overrides(&mut config, |key| std::env::var(key).ok());
    config
        .validate()
        .map_err(|e| InfrastructureError::ConfigError(e.to_string()))?;
    Ok(config)
}

fn load_config_file(base_dir: &Path) -> Result<GeneratorConfig, InfrastructureError> {
    let config_path = base_dir.join(CONFIG_FILE);
    if !config_path.exists() {
        return Ok(GeneratorConfig::default());
    }

    info!(path = ?config_path, "Loading generator configuration");
    let content = fs::read_to_string(&config_path).map_err(|source| {
        InfrastructureError::ReadFailed {
            path: config_path.clone(),
            source,
        }
    })?;

    // Un fichier vide = configuration par défaut
    if content.trim().is_empty() {
        return Ok(GeneratorConfig::default());
    }

    serde_yaml::from_str(&content).map_err(|source| InfrastructureError::YamlParse {
        path: config_path,
        source,
    })
}

fn apply_overrides<F>(config: &mut GeneratorConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(val) = lookup("MODELGEN_SCHEMA_DIR") {
        info!(old = ?config.schema_dir, new = ?val, "Overriding schema dir via ENV");
        config.schema_dir = val;
    }
    if let Some(val) = lookup("MODELGEN_TEMPLATE_DIR") {
        info!(old = ?config.template_dir, new = ?val, "Overriding template dir via ENV");
        config.template_dir = val;
    }
    if let Some(val) = lookup("MODELGEN_OUTPUT_DIR") {
        info!(old = ?config.output_dir, new = ?val, "Overriding output dir via ENV");
        config.output_dir = val;
    }
}

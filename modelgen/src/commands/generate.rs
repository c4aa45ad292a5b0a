// modelgen/src/commands/generate.rs
//
// USE CASE: discover schemas, merge them, render every entity for every target.

use std::path::Path;

use modelgen_core::application::run_generation;
use modelgen_core::domain::OutputKind;
use modelgen_core::infrastructure::config::load_generator_config;
use modelgen_core::infrastructure::{JinjaRenderer, SchemaDiscovery, TracingReporter};

/// Runs one generation pass rooted at `base_dir`; returns the number of entities.
pub fn execute(base_dir: &Path) -> anyhow::Result<usize> {
    let config = load_generator_config(base_dir)?;

    // Templates are frozen at startup: both output kinds must be present
    let renderer = JinjaRenderer::from_dir(&config.template_path(base_dir))?;
    let required: Vec<&str> = OutputKind::ALL
        .iter()
        .map(|kind| kind.template_name())
        .collect();
    renderer.require(&required)?;
    tracing::debug!(templates = renderer.template_names().count(), "Templates ready");

    let discovery = SchemaDiscovery::from_config(&config);
    let report = run_generation(&discovery, &renderer, &TracingReporter, base_dir, &config)?;

    Ok(report.entities)
}

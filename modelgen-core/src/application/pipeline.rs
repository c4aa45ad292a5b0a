// modelgen-core/src/application/pipeline.rs

// Discovery -> Merge -> Validation -> Contexts -> Render x Write.
// Single pass, fail fast: the first error stops the run. Files written before
// the failure stay on disk.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::application::output::OutputWriter;
use crate::application::ports::{PipelineReporter, PipelineStage, TemplateEngine};
use crate::domain::context::ContextBuilder;
use crate::domain::error::DomainError;
use crate::domain::model::{MergeCollision, MergeOutcome, merge_fragments};
use crate::domain::ports::FragmentSource;
use crate::error::ModelgenError;
use crate::infrastructure::config::GeneratorConfig;

#[derive(Debug)]
pub struct GenerationReport {
    pub entities: usize,
    pub files: Vec<PathBuf>,
    pub collisions: Vec<MergeCollision>,
}

pub fn run_generation<S, T, R>(
    fragment_source: &S,
    template_engine: &T,
    reporter: &R,
    base_dir: &Path,
    config: &GeneratorConfig,
) -> Result<GenerationReport, ModelgenError>
where
    S: FragmentSource + ?Sized,
    T: TemplateEngine + ?Sized,
    R: PipelineReporter + ?Sized,
{
    reporter.stage(&PipelineStage::Idle);

    let result = generate(fragment_source, template_engine, reporter, base_dir, config);
    if let Err(e) = &result {
        reporter.stage(&PipelineStage::Failed {
            message: e.to_string(),
        });
    }
    result
}

fn generate<S, T, R>(
    fragment_source: &S,
    template_engine: &T,
    reporter: &R,
    base_dir: &Path,
    config: &GeneratorConfig,
) -> Result<GenerationReport, ModelgenError>
where
    S: FragmentSource + ?Sized,
    T: TemplateEngine + ?Sized,
    R: PipelineReporter + ?Sized,
{
    // 1. DISCOVERY (Infra -> Domain)
    let fragments = fragment_source.load(&config.schema_path(base_dir))?;
    reporter.stage(&PipelineStage::Discovered {
        fragments: fragments.len(),
    });

    // 2. MERGE (last fragment wins on key collision)
    let MergeOutcome { model, collisions } = merge_fragments(&fragments, &config.marker_key)?;
    for collision in &collisions {
        reporter.collision(collision);
    }
    reporter.stage(&PipelineStage::Merged {
        entities: model.entities.len(),
    });

    // 3. VALIDATION: every output path is checked before the first write
    let writer = OutputWriter::new(config.output_path(base_dir));
    let outputs = model.requested_outputs();
    let mut claimed: BTreeMap<PathBuf, &str> = BTreeMap::new();
    for name in model.entities.keys() {
        for kind in &outputs {
            let path = writer.path_for(name, *kind)?;
            if let Some(first) = claimed.insert(path.clone(), name) {
                return Err(DomainError::OutputClash {
                    path,
                    first: first.to_string(),
                    second: name.clone(),
                }
                .into());
            }
        }
    }
    reporter.stage(&PipelineStage::Validated);

    // 4. CONTEXTS
    let contexts = ContextBuilder::new(&model)
        .with_fallback_schema(&config.fallback_schema)
        .build_all();
    reporter.stage(&PipelineStage::ContextsBuilt {
        count: contexts.len(),
    });

    // 5. RENDER & WRITE
    let mut files = Vec::with_capacity(contexts.len() * outputs.len());
    for context in &contexts {
        for kind in &outputs {
            reporter.stage(&PipelineStage::Rendering {
                entity: context.entity.to_string(),
                kind: *kind,
            });

            let rendered = template_engine.render(kind.template_name(), context)?;
            let path = writer.write(context.entity, *kind, &rendered)?;

            reporter.stage(&PipelineStage::Written { path: path.clone() });
            files.push(path);
        }
    }

    reporter.stage(&PipelineStage::Done {
        entities: contexts.len(),
    });

    Ok(GenerationReport {
        entities: contexts.len(),
        files,
        collisions,
    })
}

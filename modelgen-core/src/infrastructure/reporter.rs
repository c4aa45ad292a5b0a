// modelgen-core/src/infrastructure/reporter.rs

use tracing::{debug, info};

use crate::application::ports::{PipelineReporter, PipelineStage};
use crate::domain::model::MergeCollision;

/// Forwards pipeline events to `tracing`. The subscriber is installed by the binary.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl PipelineReporter for TracingReporter {
    fn stage(&self, stage: &PipelineStage) {
        match stage {
            // The binary prints the single user-facing error line itself
            PipelineStage::Failed { message } => debug!(%message, "💥 Generation failed"),
            PipelineStage::Done { entities } => info!(entities, "✨ Generation finished"),
            PipelineStage::Rendering { entity, kind } => {
                debug!(entity = %entity, kind = %kind, "Rendering")
            }
            PipelineStage::Written { path } => debug!(path = ?path, "Written"),
            other => debug!(stage = ?other, "Pipeline stage"),
        }
    }

    fn collision(&self, collision: &MergeCollision) {
        info!(
            section = %collision.section,
            key = %collision.key,
            previous = ?collision.previous,
            winner = ?collision.current,
            "Key redefined, last fragment wins"
        );
    }
}

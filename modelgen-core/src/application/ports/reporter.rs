use std::path::PathBuf;

use crate::domain::model::{MergeCollision, OutputKind};

/// Linear pipeline states. Any transition may jump to `Failed`.
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineStage {
    Idle,
    Discovered { fragments: usize },
    Merged { entities: usize },
    Validated,
    ContextsBuilt { count: usize },
    Rendering { entity: String, kind: OutputKind },
    Written { path: PathBuf },
    Done { entities: usize },
    Failed { message: String },
}

/// Sink for pipeline events, injected by the caller.
pub trait PipelineReporter {
    fn stage(&self, stage: &PipelineStage);

    fn collision(&self, _collision: &MergeCollision) {}
}

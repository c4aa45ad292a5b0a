// modelgen-core/src/domain/error.rs

use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum DomainError {
    #[error("no domain entries found under `{}`", root.display())]
    #[diagnostic(
        code(modelgen::domain::no_entries),
        help("At least one YAML file must carry the `{marker}` top-level key.")
    )]
    NoDomainEntries { root: PathBuf, marker: String },

    #[error("`{marker}` in {} must be a mapping", path.display())]
    #[diagnostic(code(modelgen::domain::marker_shape))]
    MarkerNotMapping { path: PathBuf, marker: String },

    #[error("invalid `{marker}` fragment in {}: {reason}", path.display())]
    #[diagnostic(
        code(modelgen::domain::fragment_shape),
        help("`enums`, `entities`, `types`, `metadata` and `targets` must be mappings.")
    )]
    InvalidFragment {
        path: PathBuf,
        marker: String,
        reason: String,
    },

    #[error("no entities defined in `{marker}` schemas")]
    #[diagnostic(code(modelgen::domain::no_entities))]
    NoEntities { marker: String },

    #[error("entities `{first}` and `{second}` both write {}", path.display())]
    #[diagnostic(
        code(modelgen::domain::output_clash),
        help("Output file names are lower-cased; rename one of the entities.")
    )]
    OutputClash {
        path: PathBuf,
        first: String,
        second: String,
    },
}

// modelgen-core/src/infrastructure/error.rs

use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum InfrastructureError {
    // --- FILESYSTEM (IO) ---
    #[error("File System Error: {0}")]
    #[diagnostic(
        code(modelgen::infra::io),
        help("Check file permissions or path validity.")
    )]
    Io(#[from] std::io::Error),

    #[error("Failed to write {}: {source}", path.display())]
    #[diagnostic(code(modelgen::infra::write))]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read {}: {source}", path.display())]
    #[diagnostic(code(modelgen::infra::read))]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Directory walk failed: {0}")]
    #[diagnostic(code(modelgen::infra::walk))]
    Walk(#[from] walkdir::Error),

    // --- YAML ---
    #[error("Failed to parse YAML file {}: {source}", path.display())]
    #[diagnostic(
        code(modelgen::infra::yaml),
        help("Check your YAML syntax (indentation, types).")
    )]
    YamlParse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    // --- CONFIG ---
    #[error("Configuration Error: {0}")]
    #[diagnostic(code(modelgen::infra::config))]
    ConfigError(String),

    // --- TEMPLATING ---
    #[error("template `{0}` not found")]
    #[diagnostic(
        code(modelgen::infra::template_not_found),
        help("Templates are loaded once from the template directory at startup.")
    )]
    TemplateNotFound(String),

    #[error("Template directory not found at '{}'", .0.display())]
    #[diagnostic(code(modelgen::infra::template_dir))]
    TemplateDirNotFound(PathBuf),

    #[error("Template Rendering Error: {0}")]
    #[diagnostic(
        code(modelgen::infra::template),
        help("Check your Jinja syntax ({{ ... }}) inside the template file.")
    )]
    TemplateError(#[from] minijinja::Error),
}

// modelgen-core/src/error.rs

use crate::domain::error::DomainError;
use crate::infrastructure::error::InfrastructureError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ModelgenError {
    // --- STRUCTURAL ERRORS (marker shape, empty model) ---
    #[error(transparent)]
    Domain(#[from] DomainError),

    // --- INFRASTRUCTURE ERRORS (IO, Parsing, Templates) ---
    #[error(transparent)]
    Infrastructure(#[from] InfrastructureError),

    // --- OUTPUT GUARD ---
    #[error("Unsafe output path for entity `{0}`")]
    UnsafePath(String),
}

impl From<std::io::Error> for ModelgenError {
    fn from(err: std::io::Error) -> Self {
        ModelgenError::Infrastructure(InfrastructureError::Io(err))
    }
}

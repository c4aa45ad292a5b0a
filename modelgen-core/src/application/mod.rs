// modelgen-core/src/application/mod.rs

pub mod output;
pub mod pipeline;
pub mod ports;

// --- RE-EXPORTS (FACADE PATTERN) ---
// `use modelgen_core::application::{run_generation, OutputWriter};`

pub use output::OutputWriter;
pub use pipeline::{GenerationReport, run_generation};

// modelgen-core/src/lib.rs

#![allow(missing_docs)]
// Memory safety
#![deny(unsafe_code)]
// Robustness
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
#![warn(clippy::perf)]

// --- MODULES HEXAGONAUX ---

// 1. Domain: model, merge policy, render contexts, ports (FragmentSource).
pub mod domain;

// 2. Infrastructure (Adapters): YAML discovery, minijinja, filesystem, config, tracing.
pub mod infrastructure;

// 3. Application (Use Cases): the generation pipeline and its ports.
pub mod application;

// --- GESTION DES ERREURS GLOBALE ---
pub mod error;

// --- RE-EXPORTS (FACADE) ---
pub use error::ModelgenError;

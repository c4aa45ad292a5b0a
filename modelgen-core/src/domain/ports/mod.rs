// src/domain/ports/mod.rs

pub mod fragments;

pub use fragments::FragmentSource;

pub mod generator;

pub use generator::{CONFIG_FILE, GeneratorConfig, load_generator_config};

// modelgen/src/main.rs

mod cli;
mod commands;

use clap::Parser;
use std::path::Path;

use cli::Cli;

fn main() {
    // 1. Setup Logging (Tracing) on stderr, stdout only carries the result line.
    // MODELGEN_LOG=debug modelgen pour voir les détails
    let level = std::env::var("MODELGEN_LOG")
        .ok()
        .and_then(|value| value.parse::<tracing::Level>().ok())
        .unwrap_or(tracing::Level::WARN);
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .init();

    let _cli = Cli::parse();

    match commands::generate::execute(Path::new(".")) {
        Ok(count) => println!("Generated {} models", count),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

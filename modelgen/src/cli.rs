// modelgen/src/cli.rs
//
// The generator takes no flags: paths come from the working directory,
// `modelgen.yaml` and `MODELGEN_*` variables. Clap still provides --help/--version.

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "modelgen")]
#[command(
    about = "Generates model stubs and table definitions from YAML domain schemas",
    long_about = None
)]
#[command(version)]
pub struct Cli {}

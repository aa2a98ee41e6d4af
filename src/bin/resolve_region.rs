//! Resolve region descriptors from the command line.
//!
//! Prints one `west/east/south/north` line per descriptor:
//!
//! ```text
//! $ resolve_region 10/35/20/45+r JP+r3 g
//! 10/20/35/45
//! 120/156/18/48
//! 0/360/-90/90
//! ```

use clap::Parser;
use std::path::PathBuf;

use georegion::config::RegionsConfig;
use georegion::region::{resolve_str, CountryTable};
use georegion::{init_tracing, Result};

#[derive(Parser, Debug)]
#[command(name = "resolve_region")]
#[command(author, version, about = "Resolve map region descriptors into bounding boxes")]
struct Cli {
    /// Region descriptors, e.g. 10/20/35/45, d, JP+r3
    #[arg(required = true, allow_hyphen_values = true)]
    regions: Vec<String>,

    /// JSON file of ISO country code bounds
    #[arg(long, env = "GEOREGION_CODES")]
    codes: Option<PathBuf>,

    /// Do not load the built-in country table
    #[arg(long)]
    no_builtin: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    let table = CountryTable::load(&RegionsConfig {
        codes_file: cli.codes,
        include_builtin: !cli.no_builtin,
        ..Default::default()
    })?;

    for region in &cli.regions {
        match resolve_str(region, &table) {
            Ok(bbox) => println!("{}", bbox),
            Err(e) => {
                eprintln!("{}: {}", region, e);
                std::process::exit(1);
            }
        }
    }

    Ok(())
}

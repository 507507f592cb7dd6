//! Totalraw - Command Line Interface
//!
//! This is the main entry point for the wiki recipe totals generator.
//! Run with `--help` to see all available options.

use clap::Parser;
use std::error::Error;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use totalraw::{data::load_recipes, display::write_recipe_totals, names::NameMapping};

/// Command-line arguments for Totalraw.
#[derive(Parser, Debug)]
#[command(name = "totalraw")]
#[command(author, version, about = "Write wiki recipe and total-raw infobox text", long_about = None)]
struct Args {
    /// Recipe data CSV file
    #[arg(short, long, default_value = "data/recipes.csv")]
    data: PathBuf,

    /// Display-name dictionary (JSON)
    #[arg(short, long)]
    names: Option<PathBuf>,

    /// Write the report to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Only report these recipes (repeatable)
    #[arg(short, long = "recipe")]
    recipes: Vec<String>,
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    if !args.data.exists() {
        error!(path = %args.data.display(), "recipe data file not found");
        std::process::exit(1);
    }

    let book = load_recipes(&args.data)?;
    if book.is_empty() {
        warn!(path = %args.data.display(), "no recipes found");
        return Ok(());
    }

    let names = match &args.names {
        Some(path) => {
            let names = NameMapping::load(path)?;
            info!(path = %path.display(), entries = names.len(), "loaded display names");
            names
        }
        None => NameMapping::new(),
    };

    let indices = book.indices()?;

    let mut out: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };

    let summary = write_recipe_totals(&indices, &names, &args.recipes, &mut out)?;
    out.flush()?;

    if let Some(path) = &args.output {
        info!(
            path = %path.display(),
            recipes = summary.recipes,
            failed = summary.failures.len(),
            "report written"
        );
    }

    Ok(())
}

//! Times inserts and searches on the AVL tree and the unbalanced baseline for the first rows of
//! a movie dataset, prints a summary and appends the figures to a CSV file.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use avl::harness;
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "avl-bench")]
#[command(about = "Compare AVL and unbalanced search trees on a CSV dataset", long_about = None)]
struct Cli {
    /// CSV file with `title,year,rating,votes` rows
    dataset: PathBuf,

    /// How many rows of the dataset to use
    lines: usize,

    /// File the CSV row of timings is appended to
    #[arg(short, long, default_value = "output.txt")]
    output: PathBuf,

    /// Seed for the shuffled ordering; random when omitted
    #[arg(short, long)]
    seed: Option<u64>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let movies = harness::read_movies(&cli.dataset, cli.lines)
        .with_context(|| format!("loading {} rows", cli.lines))?;
    if movies.is_empty() {
        bail!(
            "no rows read from {}; check the file path and row count",
            cli.dataset.display()
        );
    }

    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let timings = harness::run(&movies, &mut rng);

    print!("{timings}");
    harness::append_csv(&cli.output, &timings)?;
    Ok(())
}

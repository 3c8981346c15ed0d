mod evaluate;
mod sample;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::evaluate::ThresholdOverrides;
use crate::sample::SampleKind;

#[derive(Debug, Parser)]
#[command(name = "clearbid")]
#[command(about = "Evaluate resale listings through the ClearBid gate pipeline")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Evaluate a listing file (YAML or JSON) and print the decision
    Evaluate {
        /// Path to the listing file
        file: PathBuf,
        /// Minimum projected margin, e.g. 0.25
        #[arg(long)]
        min_margin: Option<f64>,
        /// Minimum seller trust score in [0, 1]
        #[arg(long)]
        min_trust: Option<f64>,
        /// Maximum logistics cost as a fraction of ask price
        #[arg(long)]
        max_logistics_pct: Option<f64>,
        /// Buyer destination: place name or two-letter code (e.g. SG)
        #[arg(long)]
        dest: Option<String>,
        /// Print the full deal packet as JSON instead of a summary
        #[arg(long)]
        json: bool,
    },
    /// Print a sample listing as YAML
    Sample {
        #[arg(value_enum)]
        kind: SampleKind,
    },
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(clearbid_core::log_level_from_env()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Some(Commands::Evaluate {
            file,
            min_margin,
            min_trust,
            max_logistics_pct,
            dest,
            json,
        }) => {
            let overrides = ThresholdOverrides {
                min_margin,
                min_trust,
                max_logistics_pct,
                dest,
            };
            // Flags are merged over the env layer before anything is range-checked.
            let config = clearbid_core::load_unvalidated_app_config()?;
            evaluate::run_evaluate(&config, &file, &overrides, json)?;
        }
        Some(Commands::Sample { kind }) => sample::run_sample(kind)?,
        None => println!("clearbid: run `clearbid --help` for usage"),
    }

    Ok(())
}

//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Normalyze: detect functional dependencies, candidate keys, and normal
/// form violations in tabular data
#[derive(Parser)]
#[command(name = "normalyze")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze a data file: dependencies, candidate keys, normal forms
    Analyze {
        /// Path to the data file (CSV/TSV)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Relation name used in decomposed table names (default: file stem)
        #[arg(short, long)]
        relation: Option<String>,

        /// Minimum confidence for a dependency to be reported
        #[arg(long)]
        threshold: Option<f64>,

        /// Cap on the number of rows inspected during detection
        #[arg(long)]
        max_rows: Option<usize>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Decompose a data file into 1NF/2NF/3NF table schemas
    Normalize {
        /// Path to the data file (CSV/TSV)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Relation name used in decomposed table names (default: file stem)
        #[arg(short, long)]
        relation: Option<String>,

        /// Output path for the analysis JSON (default: <file>.normalyze.json)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

//! Normalyze CLI - relational normalization analysis for tabular data.

mod cli;
mod commands;
mod loader;

use clap::Parser;
use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Analyze {
            file,
            relation,
            threshold,
            max_rows,
            json,
        } => commands::analyze::run(file, relation, threshold, max_rows, json, cli.verbose),

        Commands::Normalize {
            file,
            relation,
            output,
        } => commands::normalize::run(file, relation, output, cli.verbose),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

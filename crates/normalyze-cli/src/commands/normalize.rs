//! Normalize command - decompose a relation into normalized table schemas.

use std::fs;
use std::path::PathBuf;

use colored::Colorize;
use normalyze::{Normalyze, NormalyzeConfig};

use crate::loader;

pub fn run(
    file: PathBuf,
    relation: Option<String>,
    output: Option<PathBuf>,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if !file.exists() {
        return Err(format!("File not found: {}", file.display()).into());
    }

    println!(
        "{} {}",
        "Normalizing".cyan().bold(),
        file.display().to_string().white()
    );

    let dataset = loader::load_dataset(&file)?;

    let config = NormalyzeConfig {
        relation_name: super::relation_name(relation, &file),
        ..NormalyzeConfig::default()
    };
    let result = Normalyze::with_config(config).analyze(&dataset)?;

    for stage in &result.stages {
        println!();
        println!(
            "{} {} table{}",
            stage.normal_form.to_string().yellow().bold(),
            stage.tables.len(),
            if stage.tables.len() == 1 { "" } else { "s" }
        );

        for table in &stage.tables {
            let pk: Vec<&str> = table.primary_key.iter().map(String::as_str).collect();
            println!(
                "  {} ({})  pk: {{{}}}",
                table.name.white().bold(),
                table.attributes.join(", "),
                pk.join(", ")
            );
            for fk in &table.foreign_keys {
                println!(
                    "    fk: ({}) -> {}",
                    fk.columns.join(", "),
                    fk.referenced_table
                );
            }
        }

        if verbose {
            for t in &stage.transformations {
                println!("  {}", t.blue());
            }
        }
    }

    let output_path = output.unwrap_or_else(|| {
        let mut p = file.clone();
        let stem = p.file_stem().unwrap_or_default().to_string_lossy().into_owned();
        p.set_file_name(format!("{}.normalyze.json", stem));
        p
    });

    fs::write(&output_path, serde_json::to_string_pretty(&result)?)?;

    println!();
    println!(
        "{} {}",
        "Saved to".green().bold(),
        output_path.display().to_string().white()
    );

    Ok(())
}

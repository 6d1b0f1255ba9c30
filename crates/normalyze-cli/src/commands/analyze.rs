//! Analyze command - report dependencies, keys, and normal forms.

use std::path::PathBuf;

use colored::Colorize;
use normalyze::{NormalForm, Normalyze, NormalyzeConfig};

use crate::loader;

pub fn run(
    file: PathBuf,
    relation: Option<String>,
    threshold: Option<f64>,
    max_rows: Option<usize>,
    json_output: bool,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if !file.exists() {
        return Err(format!("File not found: {}", file.display()).into());
    }

    if !json_output {
        println!(
            "{} {}",
            "Analyzing".cyan().bold(),
            file.display().to_string().white()
        );
    }

    let dataset = loader::load_dataset(&file)?;

    let mut config = NormalyzeConfig {
        relation_name: super::relation_name(relation, &file),
        ..NormalyzeConfig::default()
    };
    if let Some(t) = threshold {
        config.detector.confidence_threshold = t;
    }
    config.detector.max_rows = max_rows;

    let result = Normalyze::with_config(config).analyze(&dataset)?;

    if json_output {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    println!(
        "Read {} rows, {} attributes",
        result.summary.row_count.to_string().white().bold(),
        result.summary.attribute_count.to_string().white().bold()
    );
    println!();

    println!("{}", "Functional dependencies:".yellow().bold());
    if result.dependencies.is_empty() {
        println!("  (none detected)");
    }
    for fd in &result.dependencies {
        if verbose {
            println!("  {}  (confidence {:.2})", fd, fd.confidence);
        } else {
            println!("  {}", fd);
        }
    }
    println!();

    println!("{}", "Candidate keys:".yellow().bold());
    for key in &result.candidate_keys {
        let attrs: Vec<&str> = key.iter().map(String::as_str).collect();
        println!("  {{{}}}", attrs.join(", "));
    }
    if !result.summary.key_search_complete {
        println!("  {}", "(search bounded; keys are best-effort)".yellow());
    }
    println!();

    println!("{}", "Normal forms:".yellow().bold());
    for (label, check) in [
        ("1NF", &result.forms.first),
        ("2NF", &result.forms.second),
        ("3NF", &result.forms.third),
    ] {
        let mark = if check.satisfied {
            "ok".green()
        } else {
            format!("{} violations", check.violations.len()).red()
        };
        println!("  {:4} {}", label, mark);
    }

    let form = result.forms.current_form;
    let form_colored = match form {
        NormalForm::Third => form.to_string().green().bold(),
        NormalForm::Second | NormalForm::First => form.to_string().yellow().bold(),
        NormalForm::Unf => form.to_string().red().bold(),
    };
    println!();
    println!("Current form: {}", form_colored);
    println!("{}", result.summary.recommendation);

    if form != NormalForm::Third {
        println!();
        println!(
            "Run {} to generate normalized table schemas",
            format!("normalyze normalize {}", file.display())
                .cyan()
                .bold()
        );
    }

    Ok(())
}

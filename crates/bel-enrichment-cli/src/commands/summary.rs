//! Summary command - outcome and error-type tables across curated sheets.

use std::path::PathBuf;

use bel_enrichment::sheets::{CurationOutcome, EdgeTypeFilter};
use bel_enrichment::{EnrichmentConfig, SheetsRepository};
use colored::Colorize;

pub fn run(
    directory: PathBuf,
    output_directory: Option<PathBuf>,
    edge_type: Option<String>,
    json_output: bool,
    config: &EnrichmentConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let edge_type_filter = edge_type
        .as_deref()
        .map(str::parse::<EdgeTypeFilter>)
        .transpose()?;

    let mut repository = SheetsRepository::new(&directory, config.clone());
    if let Some(output_directory) = output_directory {
        repository = repository.with_output_directory(output_directory);
    }

    let summary = repository.generate_curation_summary(edge_type_filter)?;

    if json_output {
        let outcomes: serde_json::Map<String, serde_json::Value> = summary
            .outcomes
            .iter()
            .map(|(unit, counts)| (unit.clone(), serde_json::json!(counts.to_columns())))
            .collect();
        let report = serde_json::json!({
            "outcomes": outcomes,
            "error_types": summary.error_types,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!(
        "{} {}",
        "Curation summary for".cyan().bold(),
        directory.display().to_string().white()
    );
    println!();

    for (unit, counts) in &summary.outcomes {
        println!(
            "{} {}",
            unit.yellow().bold(),
            format!("({} rows)", counts.total).dimmed()
        );
        for outcome in CurationOutcome::ALL {
            let n = counts.get(outcome);
            if n == 0 {
                continue;
            }
            let rendered = match outcome {
                CurationOutcome::Correct => n.to_string().green(),
                CurationOutcome::Error => n.to_string().red(),
                CurationOutcome::ModifiedByCurator => n.to_string().blue(),
                _ => n.to_string().white(),
            };
            println!("  {:<42} {}", outcome.label(), rendered);
        }
        if counts.conflicts > 0 {
            println!(
                "  {:<42} {}",
                "Marked both correct and changed",
                counts.conflicts.to_string().yellow()
            );
        }
    }

    let labels = summary.error_labels();
    if !labels.is_empty() {
        println!();
        println!("{}", "Error types:".yellow().bold());
        for label in labels {
            let total: usize = summary
                .error_types
                .values()
                .filter_map(|counts| counts.get(label))
                .sum();
            println!("  {:<42} {}", label, total.to_string().red());
        }
    }

    Ok(())
}

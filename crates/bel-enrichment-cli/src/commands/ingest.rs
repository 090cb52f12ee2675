//! Ingest command - build the curated graph from a directory of sheets.

use std::path::PathBuf;

use bel_enrichment::{EnrichmentConfig, SheetsRepository};
use colored::Colorize;

pub fn run(
    directory: PathBuf,
    output_directory: Option<PathBuf>,
    no_cache: bool,
    config: &EnrichmentConfig,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if !directory.is_dir() {
        return Err(format!("Not a directory: {}", directory.display()).into());
    }

    let mut repository = SheetsRepository::new(&directory, config.clone());
    if let Some(output_directory) = output_directory {
        repository = repository.with_output_directory(output_directory);
    }

    let graph = repository.get_graph(!no_cache)?;

    println!(
        "{} {}",
        "Curated graph from".cyan().bold(),
        directory.display().to_string().white()
    );
    println!("  Sheets:   {}", graph.sources.len().to_string().white());
    println!("  Nodes:    {}", graph.node_count().to_string().white());
    println!("  Edges:    {}", graph.edge_count().to_string().green());

    let warnings = graph.warnings.len();
    if warnings > 0 {
        println!("  Warnings: {}", warnings.to_string().yellow());
        if verbose {
            for warning in &graph.warnings {
                println!("    {}", warning.to_string().dimmed());
            }
        }
    }

    println!();
    println!("  Cache:  {}", repository.cache_path().display());
    println!("  Export: {}", repository.json_path().display());

    Ok(())
}

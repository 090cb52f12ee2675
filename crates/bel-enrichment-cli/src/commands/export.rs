//! Export command - curation sheets around under-curated genes.

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use std::sync::Arc;

use bel_enrichment::config::ExportConfig;
use bel_enrichment::statement::IndraDbClient;
use bel_enrichment::{CurationGraph, EnrichmentConfig, EnrichmentWorkflow};
use colored::Colorize;

pub fn run(
    graph: PathBuf,
    directory: Option<PathBuf>,
    single: Option<PathBuf>,
    export: ExportConfig,
    config: &EnrichmentConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let graph = CurationGraph::load(&graph)?;

    let client = IndraDbClient::new(&config.retrieval)?;
    let workflow = EnrichmentWorkflow::with_defaults(config, Arc::new(client))?;

    if let Some(path) = single {
        let file = File::create(&path)
            .map_err(|e| format!("Cannot create '{}': {}", path.display(), e))?;
        let statements = workflow.export_single(&graph, BufWriter::new(file), &export)?;
        println!(
            "{} {} statements to {}",
            "Exported".green().bold(),
            statements.len().to_string().white().bold(),
            path.display()
        );
        return Ok(());
    }

    let directory = directory.ok_or("Either DIRECTORY or --single is required")?;
    let report = workflow.export_separate(&graph, &directory, &export)?;

    println!(
        "{} {}",
        "Exported genes to".cyan().bold(),
        directory.display().to_string().white()
    );
    println!("  Exported: {}", report.exported.len().to_string().green());
    println!("  Skipped:  {}", report.skipped.len().to_string().dimmed());
    for gene in &report.exported {
        println!("    {}", gene);
    }

    Ok(())
}

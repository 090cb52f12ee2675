//! Agents command - curation sheet for statements about gene symbols.

use std::sync::Arc;

use bel_enrichment::statement::IndraDbClient;
use bel_enrichment::{EnrichmentConfig, EnrichmentWorkflow};
use colored::Colorize;

use crate::cli::SheetArgs;

use super::{open_sink, process_options};

pub fn run(
    agents: Vec<String>,
    sheet: SheetArgs,
    config: &EnrichmentConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let client = IndraDbClient::new(&config.retrieval)?;
    let workflow = EnrichmentWorkflow::with_defaults(config, Arc::new(client))?;

    let sink = open_sink(sheet.output.as_deref())?;
    let statements = workflow.enrich_from_agents(&agents, sink, &process_options(&sheet))?;

    eprintln!(
        "{} {} statements for {}",
        "Retrieved".green().bold(),
        statements.len().to_string().white().bold(),
        agents.join(", ").cyan()
    );
    if let Some(output) = &sheet.output {
        eprintln!("  Sheet: {}", output.display().to_string().white());
    }

    Ok(())
}

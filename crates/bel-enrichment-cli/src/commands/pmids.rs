//! Pmids command - curation sheet for statements read from articles.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use bel_enrichment::statement::IndraDbClient;
use bel_enrichment::workflow::PmidOptions;
use bel_enrichment::{EnrichmentConfig, EnrichmentWorkflow};
use colored::Colorize;

use crate::cli::SheetArgs;

use super::{open_sink, process_options};

pub fn run(
    mut pmids: Vec<String>,
    file: Option<PathBuf>,
    json: Option<PathBuf>,
    keep_only_query_pmids: bool,
    extra_columns: Vec<String>,
    sheet: SheetArgs,
    config: &EnrichmentConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(file) = &file {
        let contents = fs::read_to_string(file)
            .map_err(|e| format!("Cannot read '{}': {}", file.display(), e))?;
        pmids.extend(
            contents
                .lines()
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .map(String::from),
        );
    }

    if pmids.is_empty() {
        return Err("No PubMed identifiers given".into());
    }

    let client = IndraDbClient::new(&config.retrieval)?;
    let workflow = EnrichmentWorkflow::with_defaults(config, Arc::new(client))?;

    let pmid_options = PmidOptions {
        keep_only_query_pmids,
        extra_columns,
        json_path: json.clone(),
    };

    let sink = open_sink(sheet.output.as_deref())?;
    let statements =
        workflow.enrich_from_pmids(&pmids, sink, &process_options(&sheet), &pmid_options)?;

    eprintln!(
        "{} {} statements from {} articles",
        "Retrieved".green().bold(),
        statements.len().to_string().white().bold(),
        pmids.len()
    );
    if let Some(json) = &json {
        eprintln!("  Statements: {}", json.display().to_string().white());
    }

    Ok(())
}

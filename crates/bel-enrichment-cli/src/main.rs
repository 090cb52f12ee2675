//! BEL enrichment CLI.

mod cli;
mod commands;

use std::path::Path;

use bel_enrichment::EnrichmentConfig;
use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };
    tracing::debug!(path = ?cli.config, "configuration loaded");

    let result = match cli.command {
        Commands::Agents { agents, sheet } => commands::agents::run(agents, sheet, &config),

        Commands::Pmids {
            pmids,
            file,
            json,
            keep_only_query_pmids,
            extra_columns,
            sheet,
        } => commands::pmids::run(
            pmids,
            file,
            json,
            keep_only_query_pmids,
            extra_columns,
            sheet,
            &config,
        ),

        Commands::Ingest {
            directory,
            output_directory,
            no_cache,
        } => commands::ingest::run(directory, output_directory, no_cache, &config, cli.verbose),

        Commands::Summary {
            directory,
            output_directory,
            edge_type,
            json,
        } => commands::summary::run(directory, output_directory, edge_type, json, &config),

        Commands::Rank { graph, number, sep } => commands::rank::run(graph, number, sep),

        Commands::Export {
            graph,
            directory,
            single,
            minimum_information_density,
            minimum_belief,
            limit,
            allow_duplicates,
        } => {
            let mut export = config.export.clone();
            if let Some(density) = minimum_information_density {
                export.minimum_information_density = density;
            }
            if let Some(belief) = minimum_belief {
                export.minimum_belief = belief;
            }
            if limit.is_some() {
                export.limit = limit;
            }
            export.allow_duplicates |= allow_duplicates;
            commands::export::run(graph, directory, single, export, &config)
        }

        Commands::Apis { graph, json } => commands::apis::run(graph, json),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn load_config(path: Option<&Path>) -> bel_enrichment::Result<EnrichmentConfig> {
    match path {
        Some(path) => EnrichmentConfig::load(path),
        None => Ok(EnrichmentConfig::default()),
    }
}

//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// BEL enrichment: curation sheets from machine-read statements
#[derive(Parser)]
#[command(name = "bel-enrichment")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file (TOML)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Options shared by the sheet-producing commands.
#[derive(clap::Args, Clone)]
pub struct SheetArgs {
    /// Output path for the curation sheet (default: stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Maximum number of rows
    #[arg(short, long)]
    pub limit: Option<usize>,

    /// Drop statements below this belief
    #[arg(short = 'b', long)]
    pub minimum_belief: Option<f64>,

    /// Write every evidence of a statement, not just the first
    #[arg(long)]
    pub allow_duplicates: bool,

    /// Drop statements with ungrounded agents
    #[arg(long)]
    pub grounded_only: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a curation sheet for statements about gene symbols
    Agents {
        /// Gene symbols
        #[arg(value_name = "AGENT", required = true)]
        agents: Vec<String>,

        #[command(flatten)]
        sheet: SheetArgs,
    },

    /// Write a curation sheet for statements read from PubMed articles
    Pmids {
        /// PubMed identifiers
        #[arg(value_name = "PMID", required_unless_present = "file")]
        pmids: Vec<String>,

        /// File with one PubMed identifier per line
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Dump the retrieved statements as JSON
        #[arg(long, value_name = "PATH")]
        json: Option<PathBuf>,

        /// Keep only evidence from the queried articles
        #[arg(long)]
        keep_only_query_pmids: bool,

        /// Blank columns to add for curators (comma-separated)
        #[arg(short = 'e', long, value_delimiter = ',')]
        extra_columns: Vec<String>,

        #[command(flatten)]
        sheet: SheetArgs,
    },

    /// Build the curated graph from a directory of sheets
    Ingest {
        /// Directory of curation sheets
        #[arg(value_name = "DIRECTORY")]
        directory: PathBuf,

        /// Where to write the cache and JSON export (default: DIRECTORY)
        #[arg(short, long)]
        output_directory: Option<PathBuf>,

        /// Rebuild even if a cached graph exists
        #[arg(long)]
        no_cache: bool,
    },

    /// Summarize curation outcomes and error types
    Summary {
        /// Directory of curation sheets
        #[arg(value_name = "DIRECTORY")]
        directory: PathBuf,

        /// Where to write the tables (default: DIRECTORY)
        #[arg(short, long)]
        output_directory: Option<PathBuf>,

        /// Only count one kind of edge (activation_edges, inhibition_edges)
        #[arg(long)]
        edge_type: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Rank the genes of a curated graph by information density
    Rank {
        /// Cached graph (MessagePack or JSON)
        #[arg(value_name = "GRAPH")]
        graph: PathBuf,

        /// Show only the top N genes
        #[arg(short, long)]
        number: Option<usize>,

        /// Column separator
        #[arg(short, long, default_value = "\t")]
        sep: String,
    },

    /// Export curation sheets around under-curated genes
    Export {
        /// Cached graph (MessagePack or JSON)
        #[arg(value_name = "GRAPH")]
        graph: PathBuf,

        /// Directory to create one folder per gene in
        #[arg(value_name = "DIRECTORY", required_unless_present = "single")]
        directory: Option<PathBuf>,

        /// Write one sheet for all genes instead
        #[arg(long, value_name = "PATH", conflicts_with = "directory")]
        single: Option<PathBuf>,

        /// Rank above which non-HGNC genes are exported
        #[arg(long)]
        minimum_information_density: Option<f64>,

        /// Drop statements below this belief
        #[arg(short = 'b', long)]
        minimum_belief: Option<f64>,

        /// Maximum rows per sheet
        #[arg(short, long)]
        limit: Option<usize>,

        /// Write every evidence of a statement, not just the first
        #[arg(long)]
        allow_duplicates: bool,
    },

    /// Count the reading systems behind curated edges
    Apis {
        /// Cached graph (MessagePack or JSON)
        #[arg(value_name = "GRAPH")]
        graph: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

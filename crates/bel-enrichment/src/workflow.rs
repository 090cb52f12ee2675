//! End-to-end enrichment: retrieve statements, build rows, write sheets.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::info;

use crate::config::{delimiter_byte, EnrichmentConfig, ExportConfig};
use crate::curation::{CurationSheetWriter, ProcessOptions, StatementSetProcessor};
use crate::error::{EnrichmentError, Result};
use crate::graph::CurationGraph;
use crate::ranking::gene_symbols;
use crate::render::{BelRenderer, EdgeRenderer};
use crate::statement::{HashPreassembler, Preassembler, Statement, StatementSource};

/// File name of a gene's curation sheet.
pub fn sheet_file_name(gene: &str) -> String {
    format!("{}.bel.tsv", gene)
}

/// File name of a gene's raw statement dump.
pub fn statements_file_name(gene: &str) -> String {
    format!("{}_statements.json", gene)
}

/// Options for building a sheet from document ids.
#[derive(Debug, Clone, Default)]
pub struct PmidOptions {
    /// Drop evidence from documents other than the queried ones.
    pub keep_only_query_pmids: bool,
    /// Blank columns added for curators.
    pub extra_columns: Vec<String>,
    /// Where to dump the retrieved statements as JSON.
    pub json_path: Option<PathBuf>,
}

/// Genes handled by [`EnrichmentWorkflow::export_separate`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportReport {
    /// Genes whose sheet was written.
    pub exported: Vec<String>,
    /// Genes whose sheet already existed.
    pub skipped: Vec<String>,
}

/// Retrieval plus row processing plus sheet writing.
pub struct EnrichmentWorkflow {
    source: Arc<dyn StatementSource>,
    processor: StatementSetProcessor,
    writer: CurationSheetWriter,
}

impl EnrichmentWorkflow {
    pub fn new(
        config: &EnrichmentConfig,
        source: Arc<dyn StatementSource>,
        preassembler: Arc<dyn Preassembler>,
        renderer: Arc<dyn EdgeRenderer>,
    ) -> Result<Self> {
        let writer = CurationSheetWriter::new().with_delimiter(delimiter_byte(config.output.delimiter)?);
        Ok(Self {
            source,
            processor: StatementSetProcessor::new(&config.filter, preassembler, renderer),
            writer,
        })
    }

    /// Default preassembly and rendering over the given source.
    pub fn with_defaults(config: &EnrichmentConfig, source: Arc<dyn StatementSource>) -> Result<Self> {
        Self::new(
            config,
            source,
            Arc::new(HashPreassembler),
            Arc::new(BelRenderer),
        )
    }

    pub fn processor(&self) -> &StatementSetProcessor {
        &self.processor
    }

    /// Write a sheet for statements about the given agents.
    pub fn enrich_from_agents<W: Write>(
        &self,
        agents: &[String],
        sink: W,
        options: &ProcessOptions,
    ) -> Result<Vec<Statement>> {
        let statements = self.source.get_statements_for_agents(agents)?;
        info!(agents = agents.len(), statements = statements.len(), "retrieved statements");

        let rows = self.processor.process(&statements, options);
        self.writer.write(&rows, sink)?;
        Ok(statements)
    }

    /// Write a sheet for statements read from the given documents.
    pub fn enrich_from_pmids<W: Write>(
        &self,
        pmids: &[String],
        sink: W,
        options: &ProcessOptions,
        pmid_options: &PmidOptions,
    ) -> Result<Vec<Statement>> {
        let pmids: Vec<String> = pmids.iter().map(|p| p.trim().to_string()).collect();
        let statements = self.source.get_statements_for_papers(&pmids)?;
        info!(pmids = pmids.len(), statements = statements.len(), "retrieved statements");

        if let Some(path) = &pmid_options.json_path {
            write_statements_json(&statements, path)?;
        }

        let mut options = options.clone();
        if pmid_options.keep_only_query_pmids {
            options = options.with_keep_only_document_ids(pmids.iter().cloned());
        }

        let rows = self.processor.process(&statements, &options);
        self.writer
            .clone()
            .with_extra_columns(pmid_options.extra_columns.clone())
            .write(&rows, sink)?;
        Ok(statements)
    }

    /// One folder per selected gene, each with a sheet and a statement dump.
    ///
    /// A gene whose sheet already exists is skipped.
    pub fn export_separate(
        &self,
        graph: &CurationGraph,
        directory: &Path,
        export: &ExportConfig,
    ) -> Result<ExportReport> {
        let options = export_options(export);
        let mut report = ExportReport::default();

        for gene in gene_symbols(graph, export.minimum_information_density) {
            let gene_directory = directory.join(&gene);
            fs::create_dir_all(&gene_directory)
                .map_err(|e| EnrichmentError::io(&gene_directory, e))?;

            let sheet_path = gene_directory.join(sheet_file_name(&gene));
            if sheet_path.exists() {
                info!(gene = %gene, "sheet already exported, skipping");
                report.skipped.push(gene);
                continue;
            }

            let file = File::create(&sheet_path).map_err(|e| EnrichmentError::io(&sheet_path, e))?;
            let statements =
                self.enrich_from_agents(std::slice::from_ref(&gene), BufWriter::new(file), &options)?;
            write_statements_json(&statements, &gene_directory.join(statements_file_name(&gene)))?;

            report.exported.push(gene);
        }

        info!(
            exported = report.exported.len(),
            skipped = report.skipped.len(),
            "export finished"
        );
        Ok(report)
    }

    /// One sheet covering every selected gene.
    pub fn export_single<W: Write>(
        &self,
        graph: &CurationGraph,
        sink: W,
        export: &ExportConfig,
    ) -> Result<Vec<Statement>> {
        let genes = gene_symbols(graph, export.minimum_information_density);
        self.enrich_from_agents(&genes, sink, &export_options(export))
    }
}

fn export_options(export: &ExportConfig) -> ProcessOptions {
    ProcessOptions::new()
        .with_minimum_belief(export.minimum_belief)
        .with_allow_duplicates(export.allow_duplicates)
        .with_limit(export.limit)
}

/// Dump statements as pretty-printed JSON.
pub fn write_statements_json(statements: &[Statement], path: &Path) -> Result<()> {
    let file = File::create(path).map_err(|e| EnrichmentError::io(path, e))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, statements)?;
    writer.flush().map_err(|e| EnrichmentError::io(path, e))
}

//! Rank command - genes of a curated graph by information density.

use std::path::PathBuf;

use bel_enrichment::ranking::process_rank_genes;
use bel_enrichment::CurationGraph;

pub fn run(
    graph: PathBuf,
    number: Option<usize>,
    sep: String,
) -> Result<(), Box<dyn std::error::Error>> {
    let graph = CurationGraph::load(&graph)?;
    let ranks = process_rank_genes(&graph);

    for gene in ranks.iter().take(number.unwrap_or(ranks.len())) {
        println!("{:.2}{}{}{}{}", gene.rank, sep, gene.namespace, sep, gene.name);
    }

    Ok(())
}

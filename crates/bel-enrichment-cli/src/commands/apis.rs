//! Apis command - count the reading systems behind curated edges.

use std::path::PathBuf;

use bel_enrichment::graph::count_apis;
use bel_enrichment::CurationGraph;
use colored::Colorize;

pub fn run(graph: PathBuf, json_output: bool) -> Result<(), Box<dyn std::error::Error>> {
    let graph = CurationGraph::load(&graph)?;

    let mut counts: Vec<(String, usize)> = count_apis(&graph).into_iter().collect();
    counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

    if json_output {
        let map: serde_json::Map<String, serde_json::Value> = counts
            .into_iter()
            .map(|(api, n)| (api, serde_json::json!(n)))
            .collect();
        println!("{}", serde_json::to_string_pretty(&map)?);
        return Ok(());
    }

    if counts.is_empty() {
        println!("{}", "No source APIs recorded on curated edges.".yellow());
        return Ok(());
    }

    println!("{}", "Source APIs:".yellow().bold());
    for (api, n) in counts {
        println!("  {:<20} {}", api, n.to_string().white());
    }

    Ok(())
}

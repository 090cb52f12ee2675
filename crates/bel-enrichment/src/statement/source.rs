//! Statement retrieval from the literature-mining database.

use std::time::Duration;

use indexmap::IndexMap;
use reqwest::blocking::Client;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, info};

use crate::config::RetrievalConfig;
use crate::error::{EnrichmentError, Result};

use super::model::Statement;

/// Environment variable consulted when no API key is configured.
pub const API_KEY_ENV: &str = "INDRA_DB_REST_API_KEY";

/// Something that can look up statements by entity or by paper.
pub trait StatementSource {
    /// Statements mentioning any of the given agents (gene symbols).
    fn get_statements_for_agents(&self, agents: &[String]) -> Result<Vec<Statement>>;

    /// Statements read from the given PubMed identifiers.
    fn get_statements_for_papers(&self, pmids: &[String]) -> Result<Vec<Statement>>;
}

/// Response body shared by both statement endpoints.
#[derive(Debug, Deserialize)]
struct StatementsResponse {
    #[serde(default)]
    statements: IndexMap<String, Statement>,
}

/// Blocking client for the statement database REST API.
pub struct IndraDbClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl IndraDbClient {
    /// Create a client from retrieval configuration.
    pub fn new(config: &RetrievalConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| EnrichmentError::Http(format!("Failed to create HTTP client: {}", e)))?;

        let api_key = config
            .api_key
            .clone()
            .or_else(|| std::env::var(API_KEY_ENV).ok());

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/statements/{}", self.base_url, path)
    }

    fn query_params(&self) -> Vec<(String, String)> {
        let mut params = vec![("format".to_string(), "json".to_string())];
        if let Some(ref key) = self.api_key {
            params.push(("api_key".to_string(), key.clone()));
        }
        params
    }

    fn read_statements(&self, response: reqwest::blocking::Response) -> Result<Vec<Statement>> {
        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().unwrap_or_default();
            return Err(EnrichmentError::Http(format!(
                "API error ({}): {}",
                status, error_text
            )));
        }

        let body: StatementsResponse = response
            .json()
            .map_err(|e| EnrichmentError::Http(format!("Failed to parse API response: {}", e)))?;

        Ok(body.statements.into_values().collect())
    }
}

impl StatementSource for IndraDbClient {
    fn get_statements_for_agents(&self, agents: &[String]) -> Result<Vec<Statement>> {
        let mut params = self.query_params();
        for (i, agent) in agents.iter().enumerate() {
            params.push((format!("agent{}", i), agent.clone()));
        }

        debug!(?agents, "querying statements by agent");
        let response = self
            .client
            .get(self.endpoint("from_agents"))
            .query(&params)
            .send()
            .map_err(|e| EnrichmentError::Http(format!("API request failed: {}", e)))?;

        let statements = self.read_statements(response)?;
        info!(count = statements.len(), ?agents, "retrieved statements");
        Ok(statements)
    }

    fn get_statements_for_papers(&self, pmids: &[String]) -> Result<Vec<Statement>> {
        let ids: Vec<_> = pmids
            .iter()
            .map(|pmid| json!({"id": pmid.trim(), "type": "pmid"}))
            .collect();

        debug!(papers = pmids.len(), "querying statements by paper");
        let response = self
            .client
            .post(self.endpoint("from_papers"))
            .query(&self.query_params())
            .json(&json!({ "ids": ids }))
            .send()
            .map_err(|e| EnrichmentError::Http(format!("API request failed: {}", e)))?;

        let statements = self.read_statements(response)?;
        info!(count = statements.len(), papers = pmids.len(), "retrieved statements");
        Ok(statements)
    }
}

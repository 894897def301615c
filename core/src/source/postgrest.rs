use super::{parse_contract_rows, ContractSource};
use crate::contracts::model::Contract;
use crate::error::{CoreError, CoreResult};
use reqwest::blocking::Client;
use std::time::Duration;
use url::Url;

/// Order pushed to the table read; filtering always stays client-side.
pub const ORDER_CLAUSE: &str = "total_value_clean.desc.nullslast";

const MAX_ERROR_BODY_CHARS: usize = 200;

/// Reads the contracts table through a PostgREST (Supabase) endpoint.
pub struct PostgrestSource {
    client: Client,
    base_url: Url,
    api_key: String,
    table: String,
}

impl std::fmt::Debug for PostgrestSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PostgrestSource")
            .field("base_url", &self.base_url.as_str())
            .field("table", &self.table)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

impl PostgrestSource {
    pub fn new(base_url: Url, api_key: String, table: String, timeout: Duration) -> CoreResult<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url,
            api_key,
            table,
        })
    }

    pub fn request_url(&self) -> CoreResult<Url> {
        let raw = format!(
            "{}/rest/v1/{}",
            self.base_url.as_str().trim_end_matches('/'),
            self.table
        );
        let mut url = Url::parse(&raw)
            .map_err(|_| CoreError::Config(format!("cannot build request URL for table {}", self.table)))?;
        url.query_pairs_mut()
            .append_pair("select", "*")
            .append_pair("order", ORDER_CLAUSE);
        Ok(url)
    }
}

impl ContractSource for PostgrestSource {
    fn describe(&self) -> String {
        format!("postgrest {}/rest/v1/{}", self.base_url.as_str().trim_end_matches('/'), self.table)
    }

    fn fetch_all(&self) -> CoreResult<Vec<Contract>> {
        let url = self.request_url()?;
        tracing::info!(source = %self.describe(), "fetching contracts");

        let resp = self
            .client
            .get(url)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .header("Accept", "application/json")
            .send()?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().unwrap_or_default();
            let snippet: String = body.chars().take(MAX_ERROR_BODY_CHARS).collect();
            return Err(CoreError::Source(format!(
                "contracts endpoint returned status {}: {}",
                status, snippet
            )));
        }

        let body = resp.text()?;
        parse_contract_rows(&body)
    }
}

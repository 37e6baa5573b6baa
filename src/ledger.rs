//! Liminal banking API executor
//!
//! Every banking tool is a POST of its JSON input to
//! `{base_url}/v1/tools/{tool}`. The caller's JWT from the frontend login flow
//! is forwarded as a bearer token; no API key is involved.

use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::{debug, warn};

use crate::error::AgentError;
use crate::models::ToolInput;
use crate::Result;

/// Transactions requested per analytics fetch
pub const TRANSACTION_FETCH_LIMIT: u32 = 100;

/// Response envelope returned by the banking API
#[derive(Debug, Clone, Deserialize)]
pub struct ExecuteResponse {
    pub success: bool,
    #[serde(default)]
    pub data: Value,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Clone)]
pub struct LedgerClient {
    client: Client,
    base_url: String,
}

impl LedgerClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let client = Client::builder()
            .pool_idle_timeout(Duration::from_secs(60))
            .pool_max_idle_per_host(8)
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Run one banking tool on behalf of the caller described by `ctx`.
    pub async fn execute(&self, tool: &str, input: &Value, ctx: &ToolInput) -> Result<ExecuteResponse> {
        let url = format!("{}/v1/tools/{}", self.base_url, tool);

        let mut request = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .header("X-Request-Id", ctx.request_id.to_string())
            .json(input);

        if !ctx.user_id.is_empty() {
            request = request.header("X-User-Id", &ctx.user_id);
        }
        if let Some(token) = ctx.bearer_token.as_deref() {
            request = request.bearer_auth(token);
        }

        debug!(tool, request_id = %ctx.request_id, "Calling Liminal API");

        let response = request.send().await.map_err(|e| {
            AgentError::LedgerError(format!("Liminal request failed for {}: {}", tool, e))
        })?;

        let status = response.status();
        let body = response
            .json::<Value>()
            .await
            .map_err(|e| AgentError::LedgerError(format!("Invalid JSON response: {}", e)))?;

        if !status.is_success() {
            warn!(tool, %status, "Liminal API returned an error status");
            return Err(AgentError::LedgerError(format!(
                "Liminal API returned {} for {}: {}",
                status, tool, body
            )));
        }

        Ok(serde_json::from_value(body)?)
    }

    /// Fetch the caller's recent transactions as raw JSON objects.
    pub async fn fetch_transactions(&self, ctx: &ToolInput) -> Result<Vec<Value>> {
        let response = self
            .execute(
                "get_transactions",
                &json!({ "limit": TRANSACTION_FETCH_LIMIT }),
                ctx,
            )
            .await?;

        if !response.success {
            return Err(AgentError::LedgerError(format!(
                "transaction fetch failed: {}",
                response.error.unwrap_or_default()
            )));
        }

        Ok(extract_transactions(&response.data))
    }
}

/// Pull `transactions[]` out of a `get_transactions` payload, keeping objects only.
pub fn extract_transactions(data: &Value) -> Vec<Value> {
    data.get("transactions")
        .and_then(Value::as_array)
        .map(|items| items.iter().filter(|tx| tx.is_object()).cloned().collect())
        .unwrap_or_default()
}

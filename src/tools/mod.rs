//! Tool trait and registry
//!
//! Tools are what the model (or a direct HTTP caller) can invoke. Analytics
//! tools are deterministic; banking tools forward to the Liminal API.

mod analytics;
mod banking;

pub use analytics::{AnalyzeSpendingTool, CsvTransactionsTool, MoneyPersonalityTool};
pub use banking::{BankingTool, BankingToolSpec, BANKING_TOOLS};

use crate::error::AgentError;
use crate::models::{ToolDefinition, ToolInput, ToolOutput};
use crate::sources::TransactionFetcher;
use crate::Result;
use serde_json::{json, Map, Value};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, warn};

/// Trait for a single tool
#[async_trait::async_trait]
pub trait Tool: Send + Sync {
    fn name(&self) -> &'static str;
    fn description(&self) -> &'static str;

    /// JSON schema for the tool's input object
    fn input_schema(&self) -> Value;

    /// Money-moving tools must see `confirmed: true` before they act
    fn requires_confirmation(&self) -> bool {
        false
    }

    async fn execute(&self, input: &ToolInput) -> Result<ToolOutput>;

    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: self.name().to_string(),
            description: self.description().to_string(),
            input_schema: self.input_schema(),
        }
    }
}

/// Tool registry for looking up and executing tools
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
        }
    }

    pub fn register(&mut self, tool: Arc<dyn Tool>) {
        self.tools.insert(tool.name().to_string(), tool);
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.get(name).cloned()
    }

    /// Registered tool names, sorted
    pub fn list(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.tools.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Definitions for every tool, sorted by name
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.list()
            .into_iter()
            .filter_map(|name| self.tools.get(name))
            .map(|tool| tool.definition())
            .collect()
    }

    /// Execute a tool, folding every failure into a `ToolOutput`.
    pub async fn run(&self, input: &ToolInput) -> ToolOutput {
        let Some(tool) = self.get(&input.tool_name) else {
            warn!(tool_name = %input.tool_name, "Tool not registered");
            return ToolOutput::failure(
                AgentError::ToolNotFound(input.tool_name.clone()).to_string(),
            );
        };

        let start = Instant::now();
        let output = match tool.execute(input).await {
            Ok(output) => output,
            Err(e) => {
                warn!(tool_name = %input.tool_name, error = %e, "Tool execution failed");
                ToolOutput::failure(e.to_string())
            }
        };

        debug!(
            tool_name = %input.tool_name,
            request_id = %input.request_id,
            success = output.success,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Tool executed"
        );

        output
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

// =============================
// Schema helpers
// =============================

pub(crate) fn object_schema(properties: Value) -> Value {
    json!({
        "type": "object",
        "properties": properties,
    })
}

pub(crate) fn property(kind: &str, description: &str) -> Value {
    json!({ "type": kind, "description": description })
}

/// Reject tool input that is not a JSON object (`null` counts as empty).
pub(crate) fn input_object(input: &ToolInput) -> Result<Map<String, Value>> {
    match &input.parameters {
        Value::Object(map) => Ok(map.clone()),
        Value::Null => Ok(Map::new()),
        other => Err(AgentError::InvalidToolInput(format!(
            "expected a JSON object, got {}",
            other
        ))),
    }
}

/// Create the default registry: analytics tools, the CSV reader, and the
/// nine banking tools.
pub fn create_default_registry(fetcher: Arc<TransactionFetcher>) -> ToolRegistry {
    let mut registry = ToolRegistry::new();

    registry.register(Arc::new(AnalyzeSpendingTool::new(fetcher.clone())));
    registry.register(Arc::new(MoneyPersonalityTool::new(fetcher.clone())));
    registry.register(Arc::new(CsvTransactionsTool::new(fetcher.clone())));

    for spec in BANKING_TOOLS {
        registry.register(Arc::new(BankingTool::new(spec, fetcher.ledger().cloned())));
    }

    registry
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> ToolRegistry {
        create_default_registry(Arc::new(TransactionFetcher::csv_only("transactions.csv")))
    }

    #[test]
    fn test_default_registry_contents() {
        let registry = registry();

        assert_eq!(registry.len(), 12);
        assert!(registry.get("analyze_spending").is_some());
        assert!(registry.get("analyze_money_personality").is_some());
        assert!(registry.get("get_csv_transactions").is_some());
        assert!(registry.get("send_money").unwrap().requires_confirmation());
        assert!(!registry.get("get_balance").unwrap().requires_confirmation());

        let names = registry.list();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
    }

    #[test]
    fn test_definitions_are_object_schemas() {
        for def in registry().definitions() {
            assert_eq!(def.input_schema["type"], "object", "{}", def.name);
            assert!(!def.description.is_empty());
        }
    }

    #[tokio::test]
    async fn test_run_unknown_tool_is_a_failure_output() {
        let output = registry().run(&ToolInput::new("teleport", json!({}))).await;

        assert!(!output.success);
        assert_eq!(output.error.as_deref(), Some("Tool not found: teleport"));
    }

    #[test]
    fn test_input_object() {
        assert!(input_object(&ToolInput::new("x", Value::Null)).unwrap().is_empty());
        let err = input_object(&ToolInput::new("x", json!([1, 2]))).unwrap_err();
        assert_eq!(err.to_string(), "invalid input: expected a JSON object, got [1,2]");
    }
}

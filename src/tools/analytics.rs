//! Analytics tools: spending analyzer, money personality, CSV reader

use chrono::Utc;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::info;

use super::{input_object, object_schema, property, Tool};
use crate::analytics::{self, spending::DEFAULT_WINDOW_DAYS};
use crate::error::AgentError;
use crate::models::{ToolInput, ToolOutput};
use crate::sources::{DataSource, TransactionFetcher};
use crate::transactions::normalize;
use crate::Result;

const DEFAULT_CSV_LIMIT: usize = 50;

/// Validate the shared `use_csv` flag; it defaults to the banking API.
fn data_source(input: &ToolInput) -> Result<DataSource> {
    input_object(input)?;
    Ok(DataSource::new(input.bool_param("use_csv")?.unwrap_or(false)))
}

async fn fetch_for(
    fetcher: &TransactionFetcher,
    source: DataSource,
    input: &ToolInput,
) -> std::result::Result<Vec<Value>, String> {
    fetcher.fetch(source, input).await.map_err(|e| {
        if source.csv {
            format!("failed to load CSV: {}", e)
        } else {
            format!("failed to fetch transactions: {}", e)
        }
    })
}

pub struct AnalyzeSpendingTool {
    fetcher: Arc<TransactionFetcher>,
}

impl AnalyzeSpendingTool {
    pub fn new(fetcher: Arc<TransactionFetcher>) -> Self {
        Self { fetcher }
    }
}

#[async_trait::async_trait]
impl Tool for AnalyzeSpendingTool {
    fn name(&self) -> &'static str {
        "analyze_spending"
    }

    fn description(&self) -> &'static str {
        "Analyze the user's spending patterns over a specified time period. Returns insights about spending velocity, categories, and trends."
    }

    fn input_schema(&self) -> Value {
        object_schema(json!({
            "days": property("integer", "Number of days to analyze (default: 30)"),
            "use_csv": property("boolean", "Use local CSV file instead of API (for testing, default: false)"),
        }))
    }

    async fn execute(&self, input: &ToolInput) -> Result<ToolOutput> {
        let params = data_source(input).and_then(|source| {
            let days = input.int_param("days")?;
            Ok((source, days.unwrap_or(i64::from(DEFAULT_WINDOW_DAYS))))
        });
        let (source, requested_days) = match params {
            Ok(params) => params,
            Err(e) => return Ok(ToolOutput::failure(e.to_string())),
        };
        let days = analytics::window_days(requested_days);

        let raw = match fetch_for(&self.fetcher, source, input).await {
            Ok(raw) => raw,
            Err(msg) => return Ok(ToolOutput::failure(msg)),
        };

        let records = normalize(&raw);
        let report = analytics::analyze(&records, days);

        info!(
            period_days = days.get(),
            transactions = records.len(),
            csv = source.csv,
            "Spending analysis complete"
        );

        Ok(ToolOutput::ok(json!({
            "period_days": days.get(),
            "total_transactions": records.len(),
            "analysis": report,
            "data_source": source,
            "generated_at": Utc::now().to_rfc3339(),
        })))
    }
}

pub struct MoneyPersonalityTool {
    fetcher: Arc<TransactionFetcher>,
}

impl MoneyPersonalityTool {
    pub fn new(fetcher: Arc<TransactionFetcher>) -> Self {
        Self { fetcher }
    }
}

#[async_trait::async_trait]
impl Tool for MoneyPersonalityTool {
    fn name(&self) -> &'static str {
        "analyze_money_personality"
    }

    fn description(&self) -> &'static str {
        "Discover your Money Personality - a psychological profile of your spending and saving behaviors. Reveals behavioral patterns, triggers, and personalized strategies."
    }

    fn input_schema(&self) -> Value {
        object_schema(json!({
            "use_csv": property("boolean", "Use local CSV file instead of API (for testing, default: false)"),
        }))
    }

    async fn execute(&self, input: &ToolInput) -> Result<ToolOutput> {
        let source = match data_source(input) {
            Ok(source) => source,
            Err(e) => return Ok(ToolOutput::failure(e.to_string())),
        };

        let raw = match fetch_for(&self.fetcher, source, input).await {
            Ok(raw) => raw,
            Err(msg) => return Ok(ToolOutput::failure(msg)),
        };

        let profile = match analytics::profile(&normalize(&raw)) {
            Ok(profile) => profile,
            Err(AgentError::InsufficientData { .. }) => {
                return Ok(ToolOutput::failure(
                    "Need at least 10 transactions for accurate personality analysis",
                ))
            }
            Err(e) => return Ok(ToolOutput::failure(e.to_string())),
        };

        let archetype = &profile.archetype;
        info!(archetype = archetype.name, "Money personality matched");

        Ok(ToolOutput::ok(json!({
            "personality_type": archetype.name,
            "emoji": archetype.emoji,
            "confidence": archetype.confidence_percent(),
            "traits": archetype.traits,
            "behavioral_triggers": archetype.triggers,
            "personalized_strategies": archetype.strategies,
            "fun_fact": archetype.fun_fact,
            "raw_scores": profile.scores,
            "data_source": source,
        })))
    }
}

pub struct CsvTransactionsTool {
    fetcher: Arc<TransactionFetcher>,
}

impl CsvTransactionsTool {
    pub fn new(fetcher: Arc<TransactionFetcher>) -> Self {
        Self { fetcher }
    }
}

#[async_trait::async_trait]
impl Tool for CsvTransactionsTool {
    fn name(&self) -> &'static str {
        "get_csv_transactions"
    }

    fn description(&self) -> &'static str {
        "Read transactions from the local transactions.csv file. Use this for testing when API is unavailable or you want to use demo data."
    }

    fn input_schema(&self) -> Value {
        object_schema(json!({
            "limit": property("integer", "Maximum number of transactions to return (default: 50)"),
        }))
    }

    async fn execute(&self, input: &ToolInput) -> Result<ToolOutput> {
        let limit = match input_object(input).and_then(|_| input.int_param("limit")) {
            Ok(Some(n)) if n > 0 => usize::try_from(n).unwrap_or(usize::MAX),
            Ok(_) => DEFAULT_CSV_LIMIT,
            Err(e) => return Ok(ToolOutput::failure(e.to_string())),
        };

        let mut transactions = match self.fetcher.load_csv() {
            Ok(rows) => rows,
            Err(e) => {
                return Ok(ToolOutput::failure(format!(
                    "failed to load transactions from CSV: {}",
                    e
                )))
            }
        };
        transactions.truncate(limit);

        let file = self
            .fetcher
            .csv_path()
            .file_name()
            .map(|f| f.to_string_lossy().into_owned())
            .unwrap_or_default();

        Ok(ToolOutput::ok(json!({
            "count": transactions.len(),
            "transactions": transactions,
            "source": "csv",
            "file": file,
        })))
    }
}

//! Liminal banking tools
//!
//! Thin passthroughs to the banking API. Reads run immediately; writes that
//! move money return a confirmation summary until called with
//! `confirmed: true`.

use serde_json::{json, Map, Value};
use tracing::info;

use super::{input_object, object_schema, property, Tool};
use crate::ledger::LedgerClient;
use crate::models::{ToolInput, ToolOutput};
use crate::Result;

const CONFIRMED_KEY: &str = "confirmed";

#[derive(Debug)]
pub struct BankingToolSpec {
    pub name: &'static str,
    pub description: &'static str,
    /// Moves money; needs explicit confirmation
    pub write: bool,
    pub schema: fn() -> Value,
}

fn no_params() -> Value {
    object_schema(json!({}))
}

fn transactions_schema() -> Value {
    object_schema(json!({
        "limit": property("integer", "Maximum number of transactions to return"),
    }))
}

fn search_schema() -> Value {
    object_schema(json!({
        "query": property("string", "Display tag or name to search for, e.g. @alice"),
    }))
}

fn send_schema() -> Value {
    object_schema(json!({
        "recipient": property("string", "Recipient display tag, e.g. @alice"),
        "amount": property("string", "Amount to send"),
        "currency": property("string", "Currency code, e.g. USD"),
        "note": property("string", "Optional note for the recipient"),
        "confirmed": property("boolean", "Set only after the user explicitly confirmed this transfer"),
    }))
}

fn savings_schema() -> Value {
    object_schema(json!({
        "amount": property("string", "Amount to move"),
        "currency": property("string", "Currency code, e.g. USD"),
        "confirmed": property("boolean", "Set only after the user explicitly confirmed this move"),
    }))
}

pub static BANKING_TOOLS: &[BankingToolSpec] = &[
    BankingToolSpec {
        name: "get_balance",
        description: "Check wallet balance",
        write: false,
        schema: no_params,
    },
    BankingToolSpec {
        name: "get_savings_balance",
        description: "Check savings positions and APY",
        write: false,
        schema: no_params,
    },
    BankingToolSpec {
        name: "get_vault_rates",
        description: "Get current savings rates",
        write: false,
        schema: no_params,
    },
    BankingToolSpec {
        name: "get_transactions",
        description: "View transaction history",
        write: false,
        schema: transactions_schema,
    },
    BankingToolSpec {
        name: "get_profile",
        description: "Get user profile info",
        write: false,
        schema: no_params,
    },
    BankingToolSpec {
        name: "search_users",
        description: "Find users by display tag",
        write: false,
        schema: search_schema,
    },
    BankingToolSpec {
        name: "send_money",
        description: "Send money to another user (requires confirmation)",
        write: true,
        schema: send_schema,
    },
    BankingToolSpec {
        name: "deposit_savings",
        description: "Deposit funds into savings (requires confirmation)",
        write: true,
        schema: savings_schema,
    },
    BankingToolSpec {
        name: "withdraw_savings",
        description: "Withdraw funds from savings (requires confirmation)",
        write: true,
        schema: savings_schema,
    },
];

/// Human-readable summary of a money movement, shown before confirming
pub fn confirmation_summary(tool: &str, params: &Map<String, Value>) -> String {
    let amount = display(params.get("amount"));
    let currency = display(params.get("currency"));

    match tool {
        "send_money" => format!(
            "Send {} {} to {}",
            amount,
            currency,
            display(params.get("recipient"))
        ),
        "deposit_savings" => format!("Deposit {} {} into savings", amount, currency),
        "withdraw_savings" => format!("Withdraw {} {} from savings", amount, currency),
        other => format!("Run {}", other),
    }
}

fn display(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => "?".to_string(),
        Some(other) => other.to_string(),
    }
}

pub struct BankingTool {
    spec: &'static BankingToolSpec,
    ledger: Option<LedgerClient>,
}

impl BankingTool {
    pub fn new(spec: &'static BankingToolSpec, ledger: Option<LedgerClient>) -> Self {
        Self { spec, ledger }
    }
}

#[async_trait::async_trait]
impl Tool for BankingTool {
    fn name(&self) -> &'static str {
        self.spec.name
    }

    fn description(&self) -> &'static str {
        self.spec.description
    }

    fn input_schema(&self) -> Value {
        (self.spec.schema)()
    }

    fn requires_confirmation(&self) -> bool {
        self.spec.write
    }

    async fn execute(&self, input: &ToolInput) -> Result<ToolOutput> {
        let mut params = match input_object(input) {
            Ok(params) => params,
            Err(e) => return Ok(ToolOutput::failure(e.to_string())),
        };

        if self.spec.write {
            let confirmed = params
                .remove(CONFIRMED_KEY)
                .and_then(|v| v.as_bool())
                .unwrap_or(false);

            if !confirmed {
                let summary = confirmation_summary(self.spec.name, &params);
                info!(tool = self.spec.name, %summary, "Awaiting user confirmation");
                return Ok(ToolOutput {
                    success: false,
                    data: json!({
                        "requires_confirmation": true,
                        "summary": summary,
                    }),
                    error: Some(format!("confirmation required: {}", summary)),
                });
            }
        }

        let Some(ledger) = self.ledger.as_ref() else {
            return Ok(ToolOutput::failure(
                "LIMINAL_BASE_URL is not configured; banking tools are unavailable",
            ));
        };

        let response = ledger
            .execute(self.spec.name, &Value::Object(params), input)
            .await?;

        if response.success {
            Ok(ToolOutput::ok(response.data))
        } else {
            Ok(ToolOutput::failure(
                response
                    .error
                    .unwrap_or_else(|| format!("{} failed", self.spec.name)),
            ))
        }
    }
}

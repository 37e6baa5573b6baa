//! Normalized transaction records
//!
//! Ledger responses and CSV fixtures both arrive as loosely-typed JSON
//! objects. Normalization never fails: a missing or wrong-typed field falls
//! back to `0.0` / `""` so one bad row cannot sink a whole batch.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Send,
    Receive,
    /// Any other `type` value. Ignored by the analyzers.
    Other,
}

impl TransactionKind {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "send" => TransactionKind::Send,
            "receive" => TransactionKind::Receive,
            _ => TransactionKind::Other,
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TransactionKind::Send => "send",
            TransactionKind::Receive => "receive",
            TransactionKind::Other => "other",
        };
        write!(f, "{}", s)
    }
}

/// One ledger event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// ISO-8601 or opaque; never parsed here
    pub timestamp: String,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub amount: f64,
    /// Empty means uncategorized
    pub category: String,
    /// Values `<= 0` mean "unknown"
    pub balance_after: f64,
    pub currency: String,
    pub counterparty: String,
    pub description: String,
}

impl TransactionRecord {
    pub fn new(kind: TransactionKind, amount: f64, category: impl Into<String>) -> Self {
        Self {
            timestamp: String::new(),
            kind,
            amount,
            category: category.into(),
            balance_after: 0.0,
            currency: String::new(),
            counterparty: String::new(),
            description: String::new(),
        }
    }

    pub fn send(amount: f64, category: impl Into<String>) -> Self {
        Self::new(TransactionKind::Send, amount, category)
    }

    pub fn receive(amount: f64) -> Self {
        Self::new(TransactionKind::Receive, amount, "")
    }

    pub fn with_balance(mut self, balance_after: f64) -> Self {
        self.balance_after = balance_after;
        self
    }

    /// Build a record from a JSON object, defaulting anything missing or mistyped.
    pub fn from_value(value: &Value) -> Self {
        Self {
            timestamp: str_field(value, "timestamp"),
            kind: TransactionKind::parse(&str_field(value, "type")),
            amount: num_field(value, "amount"),
            category: str_field(value, "category"),
            balance_after: num_field(value, "balance_after"),
            currency: str_field(value, "currency"),
            counterparty: str_field(value, "counterparty"),
            description: str_field(value, "description"),
        }
    }

    pub fn is_send(&self) -> bool {
        self.kind == TransactionKind::Send
    }

    pub fn is_receive(&self) -> bool {
        self.kind == TransactionKind::Receive
    }

    /// Balance snapshot, if the ledger reported a usable one
    pub fn valid_balance(&self) -> Option<f64> {
        (self.balance_after > 0.0).then_some(self.balance_after)
    }
}

/// Normalize a raw batch. Non-object entries still produce (all-default) records.
pub fn normalize(raw: &[Value]) -> Vec<TransactionRecord> {
    raw.iter().map(TransactionRecord::from_value).collect()
}

fn str_field(value: &Value, key: &str) -> String {
    value
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn num_field(value: &Value, key: &str) -> f64 {
    value.get(key).and_then(Value::as_f64).unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_value_full_record() {
        let record = TransactionRecord::from_value(&json!({
            "timestamp": "2025-01-03T10:00:00Z",
            "type": "send",
            "amount": 42.5,
            "currency": "USD",
            "counterparty": "@alice",
            "description": "lunch",
            "category": "food",
            "balance_after": 957.5
        }));

        assert_eq!(record.kind, TransactionKind::Send);
        assert_eq!(record.amount, 42.5);
        assert_eq!(record.category, "food");
        assert_eq!(record.valid_balance(), Some(957.5));
        assert_eq!(record.counterparty, "@alice");
    }

    #[test]
    fn test_from_value_tolerates_bad_fields() {
        let record = TransactionRecord::from_value(&json!({
            "type": "refund",
            "amount": "12.00",
            "category": 7,
            "balance_after": -3.0
        }));

        assert_eq!(record.kind, TransactionKind::Other);
        assert_eq!(record.amount, 0.0);
        assert_eq!(record.category, "");
        assert_eq!(record.valid_balance(), None);
        assert_eq!(record.timestamp, "");
    }

    #[test]
    fn test_normalize_non_object_entries() {
        let records = normalize(&[json!("garbage"), json!({"type": "receive", "amount": 10})]);

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].kind, TransactionKind::Other);
        assert!(records[1].is_receive());
        assert_eq!(records[1].amount, 10.0);
    }
}

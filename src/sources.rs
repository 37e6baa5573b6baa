//! Transaction provenance
//!
//! Resolves where a batch comes from (local CSV fixture or the banking API)
//! and hands the fully materialized list to the analytics layer.

use serde::Serialize;
use serde_json::Value;
use std::path::{Path, PathBuf};

use crate::csv_source;
use crate::error::AgentError;
use crate::ledger::LedgerClient;
use crate::models::ToolInput;
use crate::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DataSource {
    pub csv: bool,
    pub api: bool,
}

impl DataSource {
    pub fn new(use_csv: bool) -> Self {
        Self {
            csv: use_csv,
            api: !use_csv,
        }
    }
}

pub struct TransactionFetcher {
    ledger: Option<LedgerClient>,
    csv_path: PathBuf,
}

impl TransactionFetcher {
    pub fn new(ledger: Option<LedgerClient>, csv_path: impl Into<PathBuf>) -> Self {
        Self {
            ledger,
            csv_path: csv_path.into(),
        }
    }

    /// Fetcher with no banking API; only `use_csv` requests succeed
    pub fn csv_only(csv_path: impl Into<PathBuf>) -> Self {
        Self::new(None, csv_path)
    }

    pub fn csv_path(&self) -> &Path {
        &self.csv_path
    }

    pub fn ledger(&self) -> Option<&LedgerClient> {
        self.ledger.as_ref()
    }

    pub fn load_csv(&self) -> Result<Vec<Value>> {
        csv_source::load_transactions(&self.csv_path)
    }

    pub async fn fetch(&self, source: DataSource, ctx: &ToolInput) -> Result<Vec<Value>> {
        if source.csv {
            return self.load_csv();
        }

        let ledger = self.ledger.as_ref().ok_or_else(|| {
            AgentError::ConfigError("LIMINAL_BASE_URL is not configured".to_string())
        })?;
        ledger.fetch_transactions(ctx).await
    }
}

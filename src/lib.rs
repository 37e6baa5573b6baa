//! NeuraPay Agent
//!
//! A conversational banking assistant that:
//! - Answers chat turns through the Anthropic Messages API with tool use
//! - Passes banking actions through to the Liminal API, gated on confirmation
//! - Computes spending analysis and a money-personality archetype locally
//!
//! DATA FLOW:
//! CSV / LEDGER → NORMALIZE → ANALYZE | SCORE → MATCH ARCHETYPE → TOOL OUTPUT

pub mod analytics;
pub mod anthropic;
pub mod api;
pub mod config;
pub mod conversational;
pub mod csv_source;
pub mod error;
pub mod ledger;
pub mod memory;
pub mod models;
pub mod prompt;
pub mod sources;
pub mod tools;
pub mod transactions;

pub use error::{AgentError, Result};

// Re-export common types
pub use models::*;
pub use transactions::{TransactionKind, TransactionRecord};

//! Error types for the NeuraPay agent

use thiserror::Error;

/// Result type alias for agent operations
pub type Result<T> = std::result::Result<T, AgentError>;

#[derive(Error, Debug)]
pub enum AgentError {

    // =============================
    // Analytics
    // =============================

    #[error("Insufficient data: need at least {required} transactions, got {actual}")]
    InsufficientData { required: usize, actual: usize },

    // =============================
    // Service Errors
    // =============================

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Ledger error: {0}")]
    LedgerError(String),

    #[error("LLM error: {0}")]
    LlmError(String),

    #[error("Tool not found: {0}")]
    ToolNotFound(String),

    #[error("invalid input: {0}")]
    InvalidToolInput(String),

    // =============================
    // External Library Conversions
    // =============================

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("HTTP client error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

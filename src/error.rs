//! Error types for the AutoStream agent.

use std::path::PathBuf;

/// Top-level error type for the agent.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    #[error("Retrieval error: {0}")]
    Retrieval(#[from] RetrievalError),

    #[error("Lead capture error: {0}")]
    Capture(#[from] CaptureError),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// LLM provider errors.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("Provider {provider} request failed: {reason}")]
    RequestFailed { provider: String, reason: String },

    #[error("Provider {provider} rate limited")]
    RateLimited { provider: String },

    #[error("Invalid response from {provider}: {reason}")]
    InvalidResponse { provider: String, reason: String },

    #[error("Authentication failed for provider {provider}")]
    AuthFailed { provider: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Knowledge-retrieval errors.
#[derive(Debug, thiserror::Error)]
pub enum RetrievalError {
    #[error("Knowledge base file not found: {0}")]
    KnowledgeBaseMissing(PathBuf),

    #[error("Invalid knowledge base: {0}")]
    InvalidKnowledgeBase(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Lead capture sink errors.
///
/// Always recoverable: the dialogue still completes and the failure is
/// logged by the caller.
#[derive(Debug, thiserror::Error)]
pub enum CaptureError {
    #[error("Lead rejected by capture endpoint: {reason}")]
    Rejected { reason: String },

    #[error("Capture endpoint unavailable: {reason}")]
    Unavailable { reason: String },
}

/// Result type alias for the agent.
pub type Result<T, E = Error> = std::result::Result<T, E>;

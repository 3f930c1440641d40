//! Error types for FitCheck

/// Result type alias using FitCheck's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for FitCheck operations
///
/// The classification and outfit paths never produce these; they only arise
/// while building components from configuration or talking to external
/// providers.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Keyword table or classifier construction errors
    #[error("classifier error: {0}")]
    Classifier(String),

    /// Outfit rule loading errors
    #[error("rules error: {0}")]
    Rules(String),

    /// Configuration errors
    #[error("configuration error: {0}")]
    Config(String),

    /// A garment record that violates the record invariants
    #[error("invalid record: {0}")]
    InvalidRecord(String),

    /// External advisor or weather provider errors
    #[error("upstream error: {0}")]
    Upstream(String),

    /// Filesystem errors
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Create a new classifier error
    pub fn classifier(msg: impl Into<String>) -> Self {
        Self::Classifier(msg.into())
    }

    /// Create a new rules error
    pub fn rules(msg: impl Into<String>) -> Self {
        Self::Rules(msg.into())
    }

    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new invalid record error
    pub fn invalid_record(msg: impl Into<String>) -> Self {
        Self::InvalidRecord(msg.into())
    }

    /// Create a new upstream error
    pub fn upstream(msg: impl Into<String>) -> Self {
        Self::Upstream(msg.into())
    }
}

use thiserror::Error;

/// Failures at the persistence boundary.
///
/// `GameStore::load` swallows all of these and falls back to a fresh
/// state; only `save` hands them to the caller.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("no value stored under key {0}")]
    Missing(String),

    #[error("storage I/O failed for key {key}: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid snapshot JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid snapshot: {0}")]
    Invalid(String),
}

/// Reasons a quiz run cannot start.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("no hearts left")]
    OutOfHearts,

    #[error("no questions available for topic {0}")]
    NoQuestions(String),
}

/// Rejected rule configuration.
#[derive(Debug, Error)]
pub enum RulesError {
    #[error("invalid rules TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid rule {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

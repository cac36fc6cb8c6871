use thiserror::Error;

#[derive(Debug, Error)]
pub enum SpotcheckError {
    #[error("Configuration error: {0}")]
    Config(String),

    /// A mismatch record (or a pair of precomputed count maps) that violates
    /// the aggregation contract. Raised by the caller side of the pipeline,
    /// never silently recovered.
    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl SpotcheckError {
    /// Process exit code used by the CLI.
    pub fn exit_code(&self) -> i32 {
        match self {
            SpotcheckError::Config(_) | SpotcheckError::Yaml(_) => 2,
            SpotcheckError::InvalidRecord(_) => 3,
            SpotcheckError::NotFound(_) => 4,
            _ => 1,
        }
    }
}

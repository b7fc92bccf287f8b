use thiserror::Error;

/// Failures at the crate boundary: reading captures, writing records,
/// loading configuration. The processing core itself never fails.
#[derive(Error, Debug)]
pub enum ReplayError {
    /// File could not be opened, read or written
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization failed
    #[error("JSON error ({context}): {source}")]
    Json {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// Config file is not valid YAML
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Input is well-formed but unusable
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl ReplayError {
    pub fn json(context: impl ToString, source: serde_json::Error) -> Self {
        ReplayError::Json {
            context: context.to_string(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, ReplayError>;

//! Error types for the classification pipeline

use thiserror::Error;

/// Errors that can occur while building or running a classifier
#[derive(Error, Debug)]
pub enum ClassifyError {
    #[error("Invalid input: expected {expected}x{expected} image, got {width}x{height}")]
    InvalidInput {
        expected: u32,
        width: u32,
        height: u32,
    },

    #[error("Inference failed: {context}")]
    InferenceFailure {
        context: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Failed to load model: {0}")]
    ModelLoadFailure(String),

    #[error("Classification service has been shut down")]
    ServiceClosed,

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl ClassifyError {
    /// Engine call failed with an opaque engine error
    pub fn engine(source: anyhow::Error) -> Self {
        ClassifyError::InferenceFailure {
            context: "inference engine returned an error".to_string(),
            source: Some(source.into()),
        }
    }

    /// Engine returned output that breaks its contract
    pub fn contract(context: impl Into<String>) -> Self {
        ClassifyError::InferenceFailure {
            context: context.into(),
            source: None,
        }
    }
}

/// Result type for classification operations
pub type Result<T> = std::result::Result<T, ClassifyError>;

//! Error types for the `skb-retrieval` crate.

use std::time::Duration;

use thiserror::Error;

/// Errors that can occur in knowledge-base retrieval operations.
#[derive(Debug, Error)]
pub enum RetrievalError {
    /// The embedding provider failed to produce a query embedding.
    #[error("Embedding error ({provider}): {message}")]
    EmbeddingError {
        /// The embedding provider that produced the error.
        provider: String,
        /// A description of the failure.
        message: String,
    },

    /// The embedding call did not complete within the configured bound.
    #[error("Embedding call timed out after {0:?}")]
    EmbeddingTimeout(Duration),

    /// An error occurred in the vector index.
    #[error("Index error: {0}")]
    IndexError(String),

    /// The corpus artifact is malformed or could not be interpreted.
    #[error("Corpus error: {0}")]
    CorpusError(String),

    /// A vector's dimensionality does not match the index.
    #[error("Invalid vector dimension: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// The dimensionality the index was built with.
        expected: usize,
        /// The dimensionality that was supplied.
        actual: usize,
    },

    /// The corpus and the embedding index are not aligned by position.
    #[error("Corpus/index misalignment: corpus has {corpus} entries, index has {index} rows")]
    Misaligned {
        /// Number of entries in the corpus.
        corpus: usize,
        /// Number of rows in the index.
        index: usize,
    },

    /// A configuration validation error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// An artifact could not be read or written.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// An artifact could not be serialized or deserialized.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// A convenience result type for retrieval operations.
pub type Result<T> = std::result::Result<T, RetrievalError>;

//! Configuration for the knowledge retriever.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Result, RetrievalError};

/// Default number of results returned per query.
pub const DEFAULT_TOP_K: usize = 7;

/// Default bound on a single embedding call.
pub const DEFAULT_EMBED_TIMEOUT: Duration = Duration::from_secs(10);

/// Configuration parameters for the knowledge retriever.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RetrieverConfig {
    /// Number of top results to return from a search.
    pub top_k: usize,
    /// Upper bound on the duration of a single embedding-provider call.
    pub embed_timeout: Duration,
}

impl Default for RetrieverConfig {
    fn default() -> Self {
        Self { top_k: DEFAULT_TOP_K, embed_timeout: DEFAULT_EMBED_TIMEOUT }
    }
}

impl RetrieverConfig {
    /// Create a new builder for constructing a [`RetrieverConfig`].
    pub fn builder() -> RetrieverConfigBuilder {
        RetrieverConfigBuilder::default()
    }
}

/// Builder for constructing a validated [`RetrieverConfig`].
#[derive(Debug, Clone, Default)]
pub struct RetrieverConfigBuilder {
    config: RetrieverConfig,
}

impl RetrieverConfigBuilder {
    /// Set the number of top results to return from a search.
    pub fn top_k(mut self, k: usize) -> Self {
        self.config.top_k = k;
        self
    }

    /// Set the bound on a single embedding-provider call.
    pub fn embed_timeout(mut self, timeout: Duration) -> Self {
        self.config.embed_timeout = timeout;
        self
    }

    /// Build the [`RetrieverConfig`], validating that parameters are
    /// consistent.
    ///
    /// # Errors
    ///
    /// Returns [`RetrievalError::ConfigError`] if:
    /// - `top_k == 0`
    /// - `embed_timeout` is zero
    pub fn build(self) -> Result<RetrieverConfig> {
        if self.config.top_k == 0 {
            return Err(RetrievalError::ConfigError(
                "top_k must be greater than zero".to_string(),
            ));
        }
        if self.config.embed_timeout.is_zero() {
            return Err(RetrievalError::ConfigError(
                "embed_timeout must be non-zero".to_string(),
            ));
        }
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_caller_contract() {
        let config = RetrieverConfig::default();
        assert_eq!(config.top_k, 7);
    }

    #[test]
    fn rejects_zero_top_k() {
        assert!(RetrieverConfig::builder().top_k(0).build().is_err());
    }

    #[test]
    fn rejects_zero_timeout() {
        assert!(RetrieverConfig::builder().embed_timeout(Duration::ZERO).build().is_err());
    }

    #[test]
    fn builder_overrides_defaults() {
        let config = RetrieverConfig::builder()
            .top_k(3)
            .embed_timeout(Duration::from_secs(2))
            .build()
            .unwrap();
        assert_eq!(config.top_k, 3);
        assert_eq!(config.embed_timeout, Duration::from_secs(2));
    }
}

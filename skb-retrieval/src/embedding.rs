//! Embedding provider trait for turning query text into vectors.

use async_trait::async_trait;

use crate::error::Result;

/// A provider that generates a fixed-dimension vector embedding for text.
///
/// Implementations wrap specific embedding backends (OpenAI, local models,
/// test fixtures) behind a unified async interface. The retriever embeds
/// queries one at a time, so the capability is deliberately minimal.
///
/// # Example
///
/// ```rust,ignore
/// use skb_retrieval::EmbeddingProvider;
///
/// let provider = MyEmbeddingProvider::new();
/// let embedding = provider.embed("how do I withdraw money?").await?;
/// assert_eq!(embedding.len(), provider.dimensions());
/// ```
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Generate an embedding vector for a single text input.
    ///
    /// Failures (network errors, malformed responses) must surface as
    /// errors, never as an empty vector.
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Return the dimensionality of embeddings produced by this provider.
    fn dimensions(&self) -> usize;
}

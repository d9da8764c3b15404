//! The knowledge retriever.
//!
//! [`KnowledgeRetriever`] is an immutable handle over a loaded corpus and the
//! two capability seams retrieval needs: an [`EmbeddingProvider`] and a
//! [`VectorIndex`]. Construct one via [`KnowledgeRetriever::builder()`] or
//! [`KnowledgeRetriever::from_artifacts()`]; both validate the corpus/index
//! pairing up front so a misconfigured retriever never serves queries.
//!
//! # Example
//!
//! ```rust,ignore
//! use skb_retrieval::{KnowledgeRetriever, RetrieverConfig};
//!
//! let retriever = KnowledgeRetriever::builder()
//!     .corpus(corpus)
//!     .embedding_provider(Arc::new(embedder))
//!     .index(Arc::new(index))
//!     .config(RetrieverConfig::default())
//!     .build()?;
//!
//! let hits = retriever.search("what are the fees?").await?;
//! ```

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::config::RetrieverConfig;
use crate::corpus::Corpus;
use crate::document::SearchResult;
use crate::embedding::EmbeddingProvider;
use crate::error::{Result, RetrievalError};
use crate::flat::FlatIndex;
use crate::index::VectorIndex;
use crate::keyword::KeywordMatcher;

enum Backend {
    Vector { embedder: Arc<dyn EmbeddingProvider>, index: Arc<dyn VectorIndex> },
    Keyword(KeywordMatcher),
}

/// Retrieves the corpus entries most similar to a free-text query.
///
/// The retriever is stateless apart from its immutable corpus and index, so
/// a shared reference can serve concurrent callers without locking. A
/// query's result ordering depends only on that query's own embedding.
pub struct KnowledgeRetriever {
    corpus: Arc<Corpus>,
    backend: Backend,
    config: RetrieverConfig,
}

impl std::fmt::Debug for KnowledgeRetriever {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let backend = match self.backend {
            Backend::Vector { .. } => "Vector",
            Backend::Keyword(_) => "Keyword",
        };
        f.debug_struct("KnowledgeRetriever")
            .field("corpus", &self.corpus)
            .field("backend", &backend)
            .field("config", &self.config)
            .finish()
    }
}

impl KnowledgeRetriever {
    /// Create a new [`KnowledgeRetrieverBuilder`].
    pub fn builder() -> KnowledgeRetrieverBuilder {
        KnowledgeRetrieverBuilder::default()
    }

    /// Load corpus and index artifacts from disk and build a retriever.
    ///
    /// This is the explicit startup step: unreadable or malformed artifacts
    /// and corpus/index misalignment all fail here, before the first query.
    ///
    /// # Errors
    ///
    /// Propagates artifact load errors and all [`builder`](Self::builder)
    /// validation errors.
    pub async fn from_artifacts(
        corpus_path: impl AsRef<Path>,
        index_path: impl AsRef<Path>,
        embedder: Arc<dyn EmbeddingProvider>,
        config: RetrieverConfig,
    ) -> Result<Self> {
        let corpus = Corpus::load(corpus_path).await?;
        let index = FlatIndex::load(index_path).await?;
        Self::builder()
            .corpus(corpus)
            .embedding_provider(embedder)
            .index(Arc::new(index))
            .config(config)
            .build()
    }

    /// Return a reference to the retriever configuration.
    pub fn config(&self) -> &RetrieverConfig {
        &self.config
    }

    /// Return a reference to the loaded corpus.
    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    /// Search with the configured `top_k`.
    ///
    /// # Errors
    ///
    /// See [`search_top_k`](Self::search_top_k).
    pub async fn search(&self, query: &str) -> Result<Vec<SearchResult>> {
        self.search_top_k(query, self.config.top_k).await
    }

    /// Return the `top_k` entries most similar to `query`, ranked by
    /// ascending distance.
    ///
    /// An empty or whitespace-only query returns an empty sequence without
    /// invoking the embedding provider. Neighbors whose position does not
    /// resolve against the corpus are skipped (logged at warn) rather than
    /// failing the query, so the result may be shorter than `top_k`.
    ///
    /// # Errors
    ///
    /// - [`RetrievalError::ConfigError`] if `top_k == 0`.
    /// - [`RetrievalError::EmbeddingTimeout`] if the embedding call exceeds
    ///   the configured bound.
    /// - Embedding-provider and index errors are propagated, never folded
    ///   into an empty result.
    pub async fn search_top_k(&self, query: &str, top_k: usize) -> Result<Vec<SearchResult>> {
        if top_k == 0 {
            return Err(RetrievalError::ConfigError(
                "top_k must be greater than zero".to_string(),
            ));
        }

        if query.trim().is_empty() {
            debug!("blank query, returning no results");
            return Ok(Vec::new());
        }

        match &self.backend {
            Backend::Keyword(matcher) => {
                debug!(query_len = query.len(), top_k, "keyword search");
                Ok(matcher.search(query, top_k))
            }
            Backend::Vector { embedder, index } => {
                // 1. Embed the query, bounded by the configured timeout.
                debug!(query_len = query.len(), top_k, "embedding query");
                let embedding =
                    tokio::time::timeout(self.config.embed_timeout, embedder.embed(query))
                        .await
                        .map_err(|_| RetrievalError::EmbeddingTimeout(self.config.embed_timeout))??;

                // 2. Nearest-neighbor lookup, ascending distance.
                let neighbors = index.search(&embedding, top_k)?;

                // 3. Resolve positions against the corpus, in index order.
                let mut results = Vec::with_capacity(neighbors.len());
                for neighbor in neighbors {
                    match self.corpus.get(neighbor.position) {
                        Some(entry) => results.push(entry.resolve(neighbor.distance)),
                        None => warn!(
                            position = neighbor.position,
                            corpus_len = self.corpus.len(),
                            "index position out of corpus range, skipping hit"
                        ),
                    }
                }

                info!(result_count = results.len(), "search completed");
                Ok(results)
            }
        }
    }
}

/// Builder for constructing a validated [`KnowledgeRetriever`].
///
/// Exactly one retrieval mode must be wired: an embedding provider together
/// with a vector index, or the explicitly-requested keyword fallback.
#[derive(Default)]
pub struct KnowledgeRetrieverBuilder {
    corpus: Option<Corpus>,
    embedder: Option<Arc<dyn EmbeddingProvider>>,
    index: Option<Arc<dyn VectorIndex>>,
    config: Option<RetrieverConfig>,
    keyword_fallback: bool,
}

impl KnowledgeRetrieverBuilder {
    /// Set the loaded corpus.
    pub fn corpus(mut self, corpus: Corpus) -> Self {
        self.corpus = Some(corpus);
        self
    }

    /// Set the embedding provider.
    pub fn embedding_provider(mut self, embedder: Arc<dyn EmbeddingProvider>) -> Self {
        self.embedder = Some(embedder);
        self
    }

    /// Set the vector index.
    pub fn index(mut self, index: Arc<dyn VectorIndex>) -> Self {
        self.index = Some(index);
        self
    }

    /// Set the retriever configuration. Defaults to
    /// [`RetrieverConfig::default()`] when not called.
    pub fn config(mut self, config: RetrieverConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Use lexical keyword matching instead of an embedder/index pair.
    ///
    /// This is the degraded mode for deployments without embedding and index
    /// artifacts. It must be requested explicitly; a missing artifact never
    /// silently falls back.
    pub fn keyword_fallback(mut self) -> Self {
        self.keyword_fallback = true;
        self
    }

    /// Build the [`KnowledgeRetriever`], validating its configuration.
    ///
    /// # Errors
    ///
    /// - [`RetrievalError::ConfigError`] if the corpus is missing, if only
    ///   one of embedder/index was supplied, or if neither vector mode nor
    ///   keyword fallback was wired.
    /// - [`RetrievalError::Misaligned`] if `corpus.len() != index.len()`.
    /// - [`RetrievalError::DimensionMismatch`] if the embedder and index
    ///   disagree on vector dimensionality.
    pub fn build(self) -> Result<KnowledgeRetriever> {
        let corpus = self
            .corpus
            .ok_or_else(|| RetrievalError::ConfigError("corpus is required".to_string()))?;
        let config = self.config.unwrap_or_default();

        let backend = match (self.embedder, self.index) {
            (Some(embedder), Some(index)) => {
                if corpus.len() != index.len() {
                    return Err(RetrievalError::Misaligned {
                        corpus: corpus.len(),
                        index: index.len(),
                    });
                }
                if embedder.dimensions() != index.dimensions() {
                    return Err(RetrievalError::DimensionMismatch {
                        expected: index.dimensions(),
                        actual: embedder.dimensions(),
                    });
                }
                Backend::Vector { embedder, index }
            }
            (None, None) if self.keyword_fallback => {
                Backend::Keyword(KeywordMatcher::new(corpus.clone()))
            }
            (None, None) => {
                return Err(RetrievalError::ConfigError(
                    "an embedding provider and index are required (or request keyword_fallback)"
                        .to_string(),
                ));
            }
            _ => {
                return Err(RetrievalError::ConfigError(
                    "vector retrieval requires both an embedding provider and an index"
                        .to_string(),
                ));
            }
        };

        Ok(KnowledgeRetriever { corpus: Arc::new(corpus), backend, config })
    }
}

//! # skb-retrieval
//!
//! Semantic knowledge-base retrieval for support-assistant agents: load a
//! static corpus and a prebuilt vector index at startup, embed free-text
//! queries through an embedding provider, and return ranked, annotated hits
//! for grounding an answer.
//!
//! ## Architecture
//!
//! ```text
//! corpus.json ──> Corpus ─────────────┐
//!                                     ├──> KnowledgeRetriever::search
//! index.json ──> FlatIndex (L2) ──────┤        │
//!                                     │        ├─ embed query (EmbeddingProvider)
//! query ──> EmbeddingProvider ────────┘        ├─ nearest-k   (VectorIndex)
//!                                              └─ resolve positions → SearchResult
//! ```
//!
//! Both seams are capability traits: [`EmbeddingProvider`] for the external
//! embedding API and [`VectorIndex`] for the nearest-neighbor structure, so
//! providers and index backends can be substituted without touching the
//! retrieval logic. Artifact loading fails fast at startup; a retriever that
//! constructed successfully is immutable and safe to share across tasks.
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use skb_retrieval::{KnowledgeRetriever, OpenAIEmbeddingProvider, RetrieverConfig};
//!
//! #[tokio::main]
//! async fn main() -> skb_retrieval::Result<()> {
//!     let retriever = KnowledgeRetriever::from_artifacts(
//!         "kd_base.json",
//!         "kd_index.json",
//!         Arc::new(OpenAIEmbeddingProvider::from_env()?),
//!         RetrieverConfig::default(),
//!     )
//!     .await?;
//!
//!     for hit in retriever.search("what are the fees?").await? {
//!         println!("{} [{:.3}] {}", hit.title, hit.distance, hit.source);
//!     }
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod corpus;
pub mod document;
pub mod embedding;
pub mod error;
pub mod flat;
pub mod index;
pub mod keyword;
#[cfg(feature = "openai")]
pub mod openai;
pub mod retriever;

pub use config::{DEFAULT_TOP_K, RetrieverConfig, RetrieverConfigBuilder};
pub use corpus::Corpus;
pub use document::{CorpusEntry, SearchResult};
pub use embedding::EmbeddingProvider;
pub use error::{Result, RetrievalError};
pub use flat::{FLAT_INDEX_SCHEMA_VERSION, FlatIndex};
pub use index::{Neighbor, VectorIndex};
pub use keyword::KeywordMatcher;
#[cfg(feature = "openai")]
pub use openai::OpenAIEmbeddingProvider;
pub use retriever::{KnowledgeRetriever, KnowledgeRetrieverBuilder};

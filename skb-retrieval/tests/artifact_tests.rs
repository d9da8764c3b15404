//! Tests for corpus and flat-index artifact loading.

use std::sync::Arc;

use async_trait::async_trait;
use skb_retrieval::{
    Corpus, EmbeddingProvider, FlatIndex, KnowledgeRetriever, Result, RetrievalError,
    RetrieverConfig, VectorIndex,
};
use tempfile::TempDir;

struct FixedEmbedder {
    vector: Vec<f32>,
}

#[async_trait]
impl EmbeddingProvider for FixedEmbedder {
    async fn embed(&self, _text: &str) -> Result<Vec<f32>> {
        Ok(self.vector.clone())
    }

    fn dimensions(&self) -> usize {
        self.vector.len()
    }
}

#[tokio::test]
async fn corpus_artifact_loads_from_disk() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("kd_base.json");
    tokio::fs::write(
        &path,
        r#"[{"title": "Fees", "context": "0.4% annual fee", "source": "faq#1"}]"#,
    )
    .await
    .unwrap();

    let corpus = Corpus::load(&path).await.unwrap();
    assert_eq!(corpus.len(), 1);
    assert_eq!(corpus.get(0).unwrap().source.as_deref(), Some("faq#1"));
}

#[tokio::test]
async fn missing_corpus_artifact_is_fatal() {
    let tmp = TempDir::new().unwrap();
    let err = Corpus::load(tmp.path().join("absent.json")).await.unwrap_err();
    assert!(matches!(err, RetrievalError::Io(_)));
}

#[tokio::test]
async fn flat_index_round_trips_through_artifact() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("kd_index.json");

    let index = FlatIndex::from_vectors(vec![vec![0.5, -0.5], vec![1.0, 1.0]]).unwrap();
    index.save(&path).await.unwrap();

    let loaded = FlatIndex::load(&path).await.unwrap();
    assert_eq!(loaded, index);
    assert_eq!(loaded.len(), 2);
    assert_eq!(loaded.dimensions(), 2);
}

#[tokio::test]
async fn flat_index_rejects_unknown_schema_version() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("kd_index.json");
    tokio::fs::write(&path, r#"{"schema_version": 99, "dimensions": 2, "rows": [[0.0, 0.0]]}"#)
        .await
        .unwrap();

    let err = FlatIndex::load(&path).await.unwrap_err();
    assert!(matches!(err, RetrievalError::IndexError(_)), "got: {err}");
}

#[tokio::test]
async fn flat_index_rejects_inconsistent_recorded_dimensions() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("kd_index.json");
    tokio::fs::write(&path, r#"{"schema_version": 1, "dimensions": 3, "rows": [[0.0, 0.0]]}"#)
        .await
        .unwrap();

    let err = FlatIndex::load(&path).await.unwrap_err();
    assert!(matches!(err, RetrievalError::DimensionMismatch { .. }), "got: {err}");
}

#[tokio::test]
async fn from_artifacts_builds_a_serving_retriever() {
    let tmp = TempDir::new().unwrap();
    let corpus_path = tmp.path().join("kd_base.json");
    let index_path = tmp.path().join("kd_index.json");

    tokio::fs::write(
        &corpus_path,
        r#"{
            "fees": {"title": "Fees", "context": "0.4% annual fee", "source": "faq#1"},
            "withdrawals": {"title": "Withdrawals", "context": "withdraw to your bank", "source": "faq#2"}
        }"#,
    )
    .await
    .unwrap();
    FlatIndex::from_vectors(vec![vec![1.0, 0.0], vec![0.0, 1.0]])
        .unwrap()
        .save(&index_path)
        .await
        .unwrap();

    let retriever = KnowledgeRetriever::from_artifacts(
        &corpus_path,
        &index_path,
        Arc::new(FixedEmbedder { vector: vec![1.0, 0.0] }),
        RetrieverConfig::builder().top_k(2).build().unwrap(),
    )
    .await
    .unwrap();

    let results = retriever.search("fees").await.unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].title, "Fees");
    assert_eq!(results[0].distance, 0.0);
}

#[tokio::test]
async fn from_artifacts_rejects_misaligned_pair() {
    let tmp = TempDir::new().unwrap();
    let corpus_path = tmp.path().join("kd_base.json");
    let index_path = tmp.path().join("kd_index.json");

    tokio::fs::write(&corpus_path, r#"[{"title": "Only entry"}]"#).await.unwrap();
    FlatIndex::from_vectors(vec![vec![1.0], vec![2.0]]).unwrap().save(&index_path).await.unwrap();

    let err = KnowledgeRetriever::from_artifacts(
        &corpus_path,
        &index_path,
        Arc::new(FixedEmbedder { vector: vec![0.0] }),
        RetrieverConfig::default(),
    )
    .await
    .unwrap_err();

    assert!(matches!(err, RetrievalError::Misaligned { corpus: 1, index: 2 }));
}

//! # Knowledge-Base Search Example
//!
//! Demonstrates the full retrieval flow: build a small support corpus and a
//! flat index, persist both artifacts, reload them through
//! `KnowledgeRetriever::from_artifacts`, and run queries.
//!
//! Uses a deterministic `MockEmbeddingProvider` so it runs with **zero API
//! keys**.
//!
//! Run: `cargo run --example kb_search`

use std::sync::Arc;

use skb_retrieval::{
    Corpus, CorpusEntry, EmbeddingProvider, FlatIndex, KnowledgeRetriever, RetrieverConfig,
};

// ---------------------------------------------------------------------------
// MockEmbeddingProvider — deterministic hash-based embeddings for demos/tests
// ---------------------------------------------------------------------------

struct MockEmbeddingProvider {
    dimensions: usize,
}

impl MockEmbeddingProvider {
    fn new(dimensions: usize) -> Self {
        Self { dimensions }
    }

    fn vector_for(&self, text: &str) -> Vec<f32> {
        // Deterministic embedding: hash the text bytes, then generate a
        // normalised vector whose direction depends on the content.
        let hash = text.bytes().fold(0u64, |acc, b| acc.wrapping_mul(31).wrapping_add(b as u64));
        let mut emb = vec![0.0f32; self.dimensions];
        for (i, v) in emb.iter_mut().enumerate() {
            *v = ((hash.wrapping_add(i as u64)) as f32).sin();
        }
        let norm: f32 = emb.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            emb.iter_mut().for_each(|x| *x /= norm);
        }
        emb
    }
}

#[async_trait::async_trait]
impl EmbeddingProvider for MockEmbeddingProvider {
    async fn embed(&self, text: &str) -> skb_retrieval::Result<Vec<f32>> {
        Ok(self.vector_for(text))
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn entry(title: &str, context: &str, source: &str) -> CorpusEntry {
    CorpusEntry {
        title: Some(title.into()),
        context: Some(context.into()),
        source: Some(source.into()),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    // -- 1. A small support knowledge base ---------------------------------
    let corpus = Corpus::new(vec![
        entry(
            "Fees",
            "The annual fee is 0.4% of managed assets, charged monthly.",
            "https://support.example.com/fees",
        ),
        entry(
            "Opening an account",
            "You can open an investment account online in a few minutes with your ID.",
            "https://support.example.com/accounts",
        ),
        entry(
            "Withdrawals",
            "Withdraw money to a registered bank account; transfers take 1-3 business days.",
            "https://support.example.com/withdrawals",
        ),
        entry(
            "Monthly savings",
            "You can change or pause your monthly savings amount at any time.",
            "https://support.example.com/savings",
        ),
    ]);

    // -- 2. Build the flat index over the corpus contexts -------------------
    // One embedding row per entry, in corpus order.
    let embedder = MockEmbeddingProvider::new(64);
    let mut rows = Vec::with_capacity(corpus.len());
    for entry in corpus.entries() {
        rows.push(embedder.embed(entry.context.as_deref().unwrap_or_default()).await?);
    }
    let index = FlatIndex::from_vectors(rows)?;

    // -- 3. Persist and reload both artifacts -------------------------------
    let dir = tempfile::tempdir()?;
    let corpus_path = dir.path().join("kd_base.json");
    let index_path = dir.path().join("kd_index.json");

    tokio::fs::write(&corpus_path, corpus_bytes(&corpus)?).await?;
    index.save(&index_path).await?;
    println!("Artifacts written to {}", dir.path().display());

    let config = RetrieverConfig::builder().top_k(3).build()?;
    let retriever = KnowledgeRetriever::from_artifacts(
        &corpus_path,
        &index_path,
        Arc::new(MockEmbeddingProvider::new(64)),
        config,
    )
    .await?;

    // -- 4. Query ------------------------------------------------------------
    let queries =
        ["what are the fees?", "how do I withdraw money?", "change my monthly amount", ""];

    for query in &queries {
        println!("\nQuery: {query:?}");
        let results = retriever.search(query).await?;
        if results.is_empty() {
            println!("  (no results)");
        } else {
            for (i, hit) in results.iter().enumerate() {
                println!("  {}. [distance={:.4}] {} — {}", i + 1, hit.distance, hit.title, hit.source);
            }
        }
    }

    println!("\nDone.");
    Ok(())
}

/// Serialize the corpus in the sequence artifact form.
fn corpus_bytes(corpus: &Corpus) -> anyhow::Result<Vec<u8>> {
    Ok(serde_json::to_vec_pretty(corpus.entries())?)
}

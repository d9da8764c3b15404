//! # Knowledge-Base Search with OpenAI Embeddings
//!
//! Same flow as `kb_search`, but against the real OpenAI embeddings API:
//! embed each corpus entry once at startup, build the flat index, then
//! answer queries with semantic nearest-neighbor search.
//!
//! Requires the `OPENAI_API_KEY` environment variable.
//!
//! Run: `OPENAI_API_KEY=sk-... cargo run --example kb_openai`

use std::sync::Arc;

use skb_retrieval::{
    Corpus, CorpusEntry, EmbeddingProvider, FlatIndex, KnowledgeRetriever,
    OpenAIEmbeddingProvider, RetrieverConfig,
};

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

    let corpus = Corpus::new(vec![
        entry(
            "Fees",
            "The annual fee is 0.4% of managed assets, charged monthly.",
            "https://support.example.com/fees",
        ),
        entry(
            "ISK taxation",
            "ISK accounts are taxed on a standard yearly basis instead of on capital gains.",
            "https://support.example.com/tax",
        ),
        entry(
            "Contacting support",
            "Reach customer support by phone or email on weekdays between 9 and 17.",
            "https://support.example.com/contact",
        ),
    ]);

    // Smaller Matryoshka dimensions keep the demo index light.
    let embedder = Arc::new(OpenAIEmbeddingProvider::from_env()?.with_dimensions(256));

    println!("Embedding {} corpus entries...", corpus.len());
    let mut rows = Vec::with_capacity(corpus.len());
    for entry in corpus.entries() {
        rows.push(embedder.embed(entry.context.as_deref().unwrap_or_default()).await?);
    }
    let index = FlatIndex::from_vectors(rows)?;

    let retriever = KnowledgeRetriever::builder()
        .corpus(corpus)
        .embedding_provider(embedder)
        .index(Arc::new(index))
        .config(RetrieverConfig::builder().top_k(2).build()?)
        .build()?;

    for query in ["how is my account taxed?", "how do I reach you?"] {
        println!("\nQuery: {query:?}");
        for (i, hit) in retriever.search(query).await?.iter().enumerate() {
            println!("  {}. [distance={:.4}] {} — {}", i + 1, hit.distance, hit.title, hit.source);
        }
    }

    Ok(())
}

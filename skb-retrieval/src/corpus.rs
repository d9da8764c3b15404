//! Loading and positional access for the knowledge-base corpus.
//!
//! The corpus artifact is a JSON document holding either an ordered sequence
//! of entry objects or a mapping of arbitrary keys to entry objects. In the
//! mapping form, iteration order is the file's key order (`serde_json` is
//! compiled with `preserve_order`), because positional order must match the
//! row order of the embedding index.

use std::path::Path;

use serde_json::Value;
use tracing::debug;

use crate::document::CorpusEntry;
use crate::error::{Result, RetrievalError};

/// The static, immutable collection of knowledge-base entries.
///
/// Entries are identified by position and never mutated after load.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Corpus {
    entries: Vec<CorpusEntry>,
}

impl Corpus {
    /// Create a corpus from already-deserialized entries.
    pub fn new(entries: Vec<CorpusEntry>) -> Self {
        Self { entries }
    }

    /// Load the corpus artifact from disk.
    ///
    /// # Errors
    ///
    /// Returns [`RetrievalError::Io`] if the file cannot be read, and
    /// [`RetrievalError::Serialization`] / [`RetrievalError::CorpusError`]
    /// if its contents are malformed. Loading is the fail-fast point: a
    /// corpus that fails here must never serve queries.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        let corpus = Self::from_slice(&bytes)?;
        debug!(path = %path.display(), entries = corpus.len(), "loaded corpus artifact");
        Ok(corpus)
    }

    /// Parse a corpus artifact from raw JSON bytes.
    ///
    /// # Errors
    ///
    /// Returns [`RetrievalError::CorpusError`] if the document is neither a
    /// sequence nor a mapping, or if any entry is not an object.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let value: Value = serde_json::from_slice(bytes)?;
        Self::from_value(value)
    }

    /// Build a corpus from a parsed JSON document.
    ///
    /// Accepts a sequence of entry objects, or a mapping whose values are
    /// entry objects (keys are ignored; value order is positional order).
    pub fn from_value(value: Value) -> Result<Self> {
        let items: Vec<Value> = match value {
            Value::Array(items) => items,
            Value::Object(map) => map.into_iter().map(|(_, v)| v).collect(),
            other => {
                return Err(RetrievalError::CorpusError(format!(
                    "expected a JSON sequence or mapping of entries, got {}",
                    json_type_name(&other)
                )));
            }
        };

        let entries = items
            .into_iter()
            .enumerate()
            .map(|(position, item)| {
                serde_json::from_value::<CorpusEntry>(item).map_err(|e| {
                    RetrievalError::CorpusError(format!("entry at position {position}: {e}"))
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { entries })
    }

    /// Look up an entry by its positional index.
    pub fn get(&self, position: usize) -> Option<&CorpusEntry> {
        self.entries.get(position)
    }

    /// All entries, in positional order.
    pub fn entries(&self) -> &[CorpusEntry] {
        &self.entries
    }

    /// Number of entries in the corpus.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the corpus holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a sequence",
        Value::Object(_) => "a mapping",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_sequence_form() {
        let corpus = Corpus::from_slice(
            br#"[
                {"title": "Fees", "context": "0.4% annual fee", "source": "faq#1"},
                {"context": "no title here"}
            ]"#,
        )
        .unwrap();

        assert_eq!(corpus.len(), 2);
        assert_eq!(corpus.get(0).unwrap().title.as_deref(), Some("Fees"));
        assert_eq!(corpus.get(1).unwrap().title, None);
    }

    #[test]
    fn mapping_form_preserves_key_order() {
        let corpus = Corpus::from_slice(
            br#"{
                "zeta": {"title": "First"},
                "alpha": {"title": "Second"},
                "mid": {"title": "Third"}
            }"#,
        )
        .unwrap();

        let titles: Vec<_> =
            corpus.entries().iter().map(|e| e.title.as_deref().unwrap()).collect();
        assert_eq!(titles, vec!["First", "Second", "Third"]);
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let corpus = Corpus::from_slice(
            br#"[{"title": "Fees", "category": "billing", "weight": 3}]"#,
        )
        .unwrap();
        assert_eq!(corpus.get(0).unwrap().title.as_deref(), Some("Fees"));
    }

    #[test]
    fn rejects_non_collection_document() {
        let err = Corpus::from_slice(b"42").unwrap_err();
        assert!(matches!(err, RetrievalError::CorpusError(_)), "got: {err}");
    }

    #[test]
    fn rejects_non_object_entry() {
        let err = Corpus::from_slice(br#"[{"title": "ok"}, "just a string"]"#).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("position 1"), "got: {message}");
    }
}

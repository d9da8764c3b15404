//! Data types for corpus entries and search results.

use serde::{Deserialize, Serialize};

/// Placeholder emitted when a matched entry has no `title`.
pub const NO_TITLE: &str = "No Title";
/// Placeholder emitted when a matched entry has no `context`.
pub const NO_CONTEXT: &str = "No Context";
/// Placeholder emitted when a matched entry has no `source`.
pub const NO_SOURCE: &str = "No Source";

/// A single knowledge-base item as it appears in the corpus artifact.
///
/// All fields are optional in the artifact; absent fields are replaced with
/// placeholder strings when the entry is resolved into a [`SearchResult`].
/// An entry's identity is its position within the corpus, which must match
/// the row order of the embedding index built over it.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CorpusEntry {
    /// Short human-readable label for the information item.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// The textual content used to answer a question.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    /// A citation/reference string (e.g. a URL or document name).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl CorpusEntry {
    /// Resolve this entry into a [`SearchResult`] at the given distance,
    /// substituting placeholders for absent fields.
    pub fn resolve(&self, distance: f32) -> SearchResult {
        SearchResult {
            title: self.title.clone().unwrap_or_else(|| NO_TITLE.to_string()),
            context: self.context.clone().unwrap_or_else(|| NO_CONTEXT.to_string()),
            source: self.source.clone().unwrap_or_else(|| NO_SOURCE.to_string()),
            distance,
        }
    }
}

/// A ranked retrieval hit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchResult {
    /// Title copied from the matched entry.
    pub title: String,
    /// Context copied from the matched entry.
    pub context: String,
    /// Source citation copied from the matched entry.
    pub source: String,
    /// Non-negative dissimilarity score; lower is more similar.
    pub distance: f32,
}

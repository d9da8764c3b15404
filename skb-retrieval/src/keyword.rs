//! Keyword matching for the explicitly-configured degraded mode.
//!
//! When a deployment runs without embedding and index artifacts it can opt
//! into lexical retrieval instead: entries are ranked by the fraction of
//! query tokens they contain, and the fraction is folded into the same
//! ascending-distance contract the vector path uses
//! (`distance = 1 - overlap`). This mode is never inferred; the retriever
//! builder has to be asked for it.

use std::cmp::Ordering;
use std::collections::HashSet;

use tracing::debug;

use crate::corpus::Corpus;
use crate::document::SearchResult;

/// Lexical matcher over a corpus, used as the degraded retrieval mode.
#[derive(Debug, Clone)]
pub struct KeywordMatcher {
    corpus: Corpus,
    /// One token set per entry, over `title` + `context`, positional order.
    tokens: Vec<HashSet<String>>,
}

impl KeywordMatcher {
    /// Precompute token sets for every corpus entry.
    pub fn new(corpus: Corpus) -> Self {
        let tokens = corpus
            .entries()
            .iter()
            .map(|entry| {
                let mut set = HashSet::new();
                if let Some(title) = &entry.title {
                    set.extend(tokenize(title));
                }
                if let Some(context) = &entry.context {
                    set.extend(tokenize(context));
                }
                set
            })
            .collect();
        Self { corpus, tokens }
    }

    /// Rank entries by descending query-token overlap.
    ///
    /// Returns at most `top_k` results with `distance = 1 - overlap`, lowest
    /// distance first; entries sharing no token with the query are dropped.
    /// Ties keep positional order.
    pub fn search(&self, query: &str, top_k: usize) -> Vec<SearchResult> {
        let query_tokens: HashSet<String> = tokenize(query).collect();
        if query_tokens.is_empty() {
            return Vec::new();
        }

        let mut hits: Vec<(usize, f32)> = self
            .tokens
            .iter()
            .enumerate()
            .filter_map(|(position, entry_tokens)| {
                let shared = query_tokens.intersection(entry_tokens).count();
                if shared == 0 {
                    return None;
                }
                let overlap = shared as f32 / query_tokens.len() as f32;
                Some((position, 1.0 - overlap))
            })
            .collect();

        hits.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(Ordering::Equal));
        hits.truncate(top_k);

        debug!(hits = hits.len(), "keyword match completed");

        hits.into_iter()
            .filter_map(|(position, distance)| {
                self.corpus.get(position).map(|entry| entry.resolve(distance))
            })
            .collect()
    }
}

fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|token| !token.is_empty())
        .map(str::to_lowercase)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::CorpusEntry;

    fn entry(title: &str, context: &str) -> CorpusEntry {
        CorpusEntry {
            title: Some(title.to_string()),
            context: Some(context.to_string()),
            source: None,
        }
    }

    fn matcher() -> KeywordMatcher {
        KeywordMatcher::new(Corpus::new(vec![
            entry("Fees", "The annual fee is 0.4% of managed assets"),
            entry("Withdrawals", "Withdraw money to a registered bank account"),
            entry("Accounts", "Open an account in a few minutes"),
        ]))
    }

    #[test]
    fn best_overlap_ranks_first() {
        let results = matcher().search("what is the annual fee", 3);
        assert!(!results.is_empty());
        assert_eq!(results[0].title, "Fees");
        for window in results.windows(2) {
            assert!(window[0].distance <= window[1].distance);
        }
    }

    #[test]
    fn distances_are_within_unit_interval() {
        for result in matcher().search("withdraw money from my account", 3) {
            assert!((0.0..=1.0).contains(&result.distance), "distance {}", result.distance);
        }
    }

    #[test]
    fn no_shared_tokens_means_no_results() {
        assert!(matcher().search("quantum chromodynamics", 3).is_empty());
    }

    #[test]
    fn punctuation_only_query_is_empty() {
        assert!(matcher().search("?!...", 3).is_empty());
    }

    #[test]
    fn respects_top_k() {
        let results = matcher().search("account money fee", 1);
        assert_eq!(results.len(), 1);
    }
}

// file: src/corpus/scorer.rs
// description: keyword-overlap relevance ranking over the loaded documents
// reference: case-insensitive substring matching of query tokens

use crate::corpus::Corpus;
use crate::models::{Document, ScoredDocument};
use tracing::debug;

pub const DEFAULT_MAX_DOCUMENTS: usize = 3;
/// Query tokens need strictly more characters than this to be scored.
pub const DEFAULT_MIN_TOKEN_CHARS: usize = 3;

/// Scores a document by how many query tokens appear in it as substrings.
#[derive(Debug, Clone, Copy)]
pub struct Scorer {
    min_token_chars: usize,
}

/// Documents chosen to ground one answer.
#[derive(Debug, Clone)]
pub struct Selection<'a> {
    pub documents: Vec<&'a Document>,
    /// True when nothing matched and the leading corpus documents were used instead.
    pub fallback: bool,
}

impl Scorer {
    pub fn new(min_token_chars: usize) -> Self {
        Self { min_token_chars }
    }

    /// Lower-cased whitespace tokens longer than the minimum, duplicates kept.
    pub fn query_tokens(&self, query: &str) -> Vec<String> {
        query
            .to_lowercase()
            .split_whitespace()
            .filter(|token| token.chars().count() > self.min_token_chars)
            .map(str::to_string)
            .collect()
    }

    pub fn score(&self, tokens: &[String], document: &Document) -> usize {
        let haystack = document.content.to_lowercase();
        tokens
            .iter()
            .filter(|token| haystack.contains(token.as_str()))
            .count()
    }

    /// Matching documents by descending score; equal scores keep corpus order.
    pub fn rank<'a>(
        &self,
        query: &str,
        documents: &'a [Document],
        max_docs: usize,
    ) -> Vec<ScoredDocument<'a>> {
        let tokens = self.query_tokens(query);
        if tokens.is_empty() {
            debug!("Query has no tokens longer than {} chars", self.min_token_chars);
            return Vec::new();
        }

        let mut scored: Vec<ScoredDocument<'a>> = documents
            .iter()
            .map(|doc| ScoredDocument::new(doc, self.score(&tokens, doc)))
            .filter(|scored| scored.score > 0)
            .collect();

        // sort_by is stable
        scored.sort_by(|a, b| b.score.cmp(&a.score));
        scored.truncate(max_docs);

        debug!(
            "Ranked {} matching documents for {} query tokens",
            scored.len(),
            tokens.len()
        );

        scored
    }

    pub fn select<'a>(
        &self,
        query: &str,
        corpus: &'a Corpus,
        max_docs: usize,
        fallback_docs: usize,
    ) -> Selection<'a> {
        let ranked = self.rank(query, corpus.documents(), max_docs);

        if ranked.is_empty() {
            Selection {
                documents: corpus.fallback(fallback_docs),
                fallback: true,
            }
        } else {
            Selection {
                documents: ranked.into_iter().map(|scored| scored.document).collect(),
                fallback: false,
            }
        }
    }
}

impl Default for Scorer {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_TOKEN_CHARS)
    }
}

/// Top `max_docs` matching documents using the default token length threshold.
pub fn find_relevant<'a>(
    query: &str,
    documents: &'a [Document],
    max_docs: usize,
) -> Vec<&'a Document> {
    Scorer::default()
        .rank(query, documents, max_docs)
        .into_iter()
        .map(|scored| scored.document)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn docs(contents: &[&str]) -> Vec<Document> {
        contents
            .iter()
            .enumerate()
            .map(|(i, c)| Document::new(i, *c))
            .collect()
    }

    fn contents<'a>(found: &[&'a Document]) -> Vec<&'a str> {
        found.iter().map(|d| d.content.as_str()).collect()
    }

    #[test]
    fn test_microgravity_example() {
        let documents = docs(&[
            "Mice lose bone density in microgravity.",
            "Plants grow roots differently in space.",
        ]);

        let ranked = Scorer::default().rank(
            "How does microgravity affect bone density?",
            &documents,
            DEFAULT_MAX_DOCUMENTS,
        );

        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].document.index, 0);
        assert_eq!(ranked[0].score, 2);
    }

    #[test]
    fn test_short_tokens_never_match() {
        let documents = docs(&["the cat sat on a mat", "how are you"]);
        assert!(find_relevant("how are the cat", &documents, 3).is_empty());
    }

    #[test]
    fn test_token_length_counts_characters() {
        let scorer = Scorer::default();
        // three chars, six bytes
        assert!(scorer.query_tokens("ééé").is_empty());
        assert_eq!(scorer.query_tokens("éééé"), vec!["éééé".to_string()]);
    }

    #[test]
    fn test_single_matching_document_regardless_of_position() {
        let documents = docs(&[
            "Arabidopsis seedlings on the ISS.",
            "Astronaut muscle atrophy studies.",
            "Radiation shielding for Mars transit.",
        ]);

        let found = find_relevant("radiation shielding", &documents, 3);
        assert_eq!(contents(&found), vec!["Radiation shielding for Mars transit."]);
    }

    #[test]
    fn test_ties_keep_corpus_order() {
        let documents = docs(&[
            "cells respond to spaceflight",
            "unrelated text",
            "spaceflight changes cells",
        ]);

        let ranked = Scorer::default().rank("cells spaceflight", &documents, 3);
        let order: Vec<usize> = ranked.iter().map(|s| s.document.index).collect();
        assert_eq!(order, vec![0, 2]);
    }

    #[test]
    fn test_higher_scores_rank_first() {
        let documents = docs(&[
            "bone loss",
            "bone loss and muscle atrophy in mice",
            "muscle only",
        ]);

        let ranked = Scorer::default().rank("bone muscle atrophy mice", &documents, 3);
        let scores: Vec<(usize, usize)> = ranked
            .iter()
            .map(|s| (s.document.index, s.score))
            .collect();
        assert_eq!(scores, vec![(1, 4), (0, 1), (2, 1)]);
    }

    #[test]
    fn test_result_never_exceeds_max() {
        let documents = docs(&[
            "plant growth",
            "plant roots",
            "plant cells",
            "plant genes",
            "plant light",
        ]);

        assert_eq!(find_relevant("plant", &documents, 3).len(), 3);
        assert_eq!(find_relevant("plant", &documents, 1).len(), 1);
    }

    #[test]
    fn test_matching_is_case_insensitive_substring() {
        let documents = docs(&["MICROGRAVITY alters Gene Expression"]);
        let ranked = Scorer::default().rank("gravity genes", &documents, 3);
        // "gravity" is a substring of "microgravity", "genes" is not in the text
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].score, 1);
    }

    #[test]
    fn test_duplicate_query_tokens_each_count() {
        let documents = docs(&["bone density"]);
        let ranked = Scorer::default().rank("bone bone", &documents, 3);
        assert_eq!(ranked[0].score, 2);
    }

    #[test]
    fn test_select_falls_back_to_leading_documents() {
        let corpus = Corpus::from_text("first\n---\nsecond\n---\nthird", "---").unwrap();

        let selection = Scorer::default().select("who is it", &corpus, 3, 2);
        assert!(selection.fallback);
        assert_eq!(contents(&selection.documents), vec!["first", "second"]);

        let selection = Scorer::default().select("third", &corpus, 3, 2);
        assert!(!selection.fallback);
        assert_eq!(contents(&selection.documents), vec!["third"]);
    }

    #[test]
    fn test_default_threshold_matches_constant() {
        let scorer = Scorer::default();
        let at_limit = "x".repeat(DEFAULT_MIN_TOKEN_CHARS);
        let over_limit = "x".repeat(DEFAULT_MIN_TOKEN_CHARS + 1);

        assert!(scorer.query_tokens(&at_limit).is_empty());
        assert_eq!(scorer.query_tokens(&over_limit), vec![over_limit.clone()]);
        assert_eq!(
            crate::Config::default_config().retrieval.min_token_chars,
            DEFAULT_MIN_TOKEN_CHARS
        );
    }
}

// file: src/models/scored_document.rs
// description: transient document/score pairing produced by the relevance scorer
// reference: used only while ranking a single query

use crate::models::Document;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoredDocument<'a> {
    pub document: &'a Document,

    /// Number of qualifying query tokens found in the document.
    pub score: usize,
}

impl<'a> ScoredDocument<'a> {
    pub fn new(document: &'a Document, score: usize) -> Self {
        Self { document, score }
    }

    /// Format as a summary string for display
    pub fn format_summary(&self, max_content_len: usize) -> String {
        format!(
            "Score: {} | document #{}\n{}\n",
            self.score,
            self.document.index + 1,
            self.document.preview(max_content_len)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_summary() {
        let doc = Document::new(2, "Plants grow roots differently in space.");
        let scored = ScoredDocument::new(&doc, 3);

        let summary = scored.format_summary(12);
        assert!(summary.contains("Score: 3"));
        assert!(summary.contains("document #3"));
        assert!(summary.contains("Plants grow ..."));
    }
}

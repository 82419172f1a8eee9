// file: src/corpus/loader.rs
// description: reads the flat knowledge base file and splits it into documents
// reference: separator-delimited text produced by the offline preparation step

use crate::error::{ChatError, Result};
use crate::models::Document;
use crate::utils::Validator;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// The loaded knowledge base. Read-only after construction.
#[derive(Debug, Clone)]
pub struct Corpus {
    source: Option<PathBuf>,
    documents: Vec<Document>,
    total_chars: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorpusStats {
    pub documents: usize,
    pub total_chars: usize,
    pub shortest: usize,
    pub longest: usize,
    pub average: usize,
}

impl Corpus {
    pub fn load(path: &Path, separator: &str) -> Result<Self> {
        Validator::validate_corpus_path(path)?;

        let text = std::fs::read_to_string(path).map_err(|source| match source.kind() {
            ErrorKind::NotFound => ChatError::CorpusNotFound {
                path: path.to_path_buf(),
            },
            _ => ChatError::FileOperation {
                path: path.to_path_buf(),
                source,
            },
        })?;

        let mut corpus = Self::from_text(&text, separator)?;
        corpus.source = Some(path.to_path_buf());

        info!(
            "Loaded {} documents ({} characters) from {}",
            corpus.len(),
            corpus.total_chars,
            path.display()
        );

        Ok(corpus)
    }

    pub fn from_text(text: &str, separator: &str) -> Result<Self> {
        if separator.is_empty() {
            return Err(ChatError::Config(
                "corpus separator must not be empty".to_string(),
            ));
        }

        let documents: Vec<Document> = text
            .split(separator)
            .map(str::trim)
            .filter(|block| !block.is_empty())
            .enumerate()
            .map(|(index, block)| Document::new(index, block))
            .collect();

        if documents.is_empty() {
            warn!("Knowledge base contains no documents");
        } else {
            debug!("Split knowledge base into {} documents", documents.len());
        }

        Ok(Self {
            source: None,
            documents,
            total_chars: text.chars().count(),
        })
    }

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Character count of the raw file, separators included.
    pub fn total_chars(&self) -> usize {
        self.total_chars
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// The first `count` documents in corpus order, used when nothing matches.
    pub fn fallback(&self, count: usize) -> Vec<&Document> {
        self.documents.iter().take(count).collect()
    }

    pub fn stats(&self) -> CorpusStats {
        let lengths: Vec<usize> = self.documents.iter().map(Document::char_count).collect();
        let sum: usize = lengths.iter().sum();

        CorpusStats {
            documents: lengths.len(),
            total_chars: self.total_chars,
            shortest: lengths.iter().copied().min().unwrap_or(0),
            longest: lengths.iter().copied().max().unwrap_or(0),
            average: if lengths.is_empty() {
                0
            } else {
                sum / lengths.len()
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_split_preserves_order_and_trims() {
        let corpus = Corpus::from_text("  first doc \n---\nsecond doc\n---\n third doc\n", "---")
            .unwrap();

        let contents: Vec<&str> = corpus
            .documents()
            .iter()
            .map(|d| d.content.as_str())
            .collect();
        assert_eq!(contents, vec!["first doc", "second doc", "third doc"]);
        assert_eq!(
            corpus.documents().iter().map(|d| d.index).collect::<Vec<_>>(),
            vec![0, 1, 2]
        );
    }

    #[test]
    fn test_empty_blocks_are_dropped() {
        let corpus = Corpus::from_text("---\n\n---\nonly doc\n---\n   \n---", "---").unwrap();
        assert_eq!(corpus.len(), 1);
        assert_eq!(corpus.documents()[0].content, "only doc");
        assert_eq!(corpus.documents()[0].index, 0);
    }

    #[test]
    fn test_empty_separator_is_rejected() {
        assert!(matches!(
            Corpus::from_text("text", ""),
            Err(ChatError::Config(_))
        ));
    }

    #[test]
    fn test_load_missing_file_returns_not_found() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("space_biology_knowledge_optimized.txt");

        match Corpus::load(&missing, "---") {
            Err(ChatError::CorpusNotFound { path }) => assert_eq!(path, missing),
            other => panic!("expected CorpusNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_load_from_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("kb.txt");
        fs::write(&path, "Mice lose bone.\n---\nPlants grow roots.\n").unwrap();

        let corpus = Corpus::load(&path, "---").unwrap();
        assert_eq!(corpus.len(), 2);
        assert_eq!(corpus.source(), Some(path.as_path()));
        assert_eq!(corpus.total_chars(), 39);
    }

    #[test]
    fn test_fallback_takes_leading_documents() {
        let corpus = Corpus::from_text("a\n---\nb\n---\nc", "---").unwrap();
        let fallback: Vec<&str> = corpus
            .fallback(2)
            .into_iter()
            .map(|d| d.content.as_str())
            .collect();
        assert_eq!(fallback, vec!["a", "b"]);
        assert_eq!(corpus.fallback(10).len(), 3);
    }

    #[test]
    fn test_stats() {
        let corpus = Corpus::from_text("ab\n---\nabcd\n---\nabcdef", "---").unwrap();
        assert_eq!(
            corpus.stats(),
            CorpusStats {
                documents: 3,
                total_chars: 22,
                shortest: 2,
                longest: 6,
                average: 4,
            }
        );
    }
}

// file: src/utils/validation.rs
// description: input validation utilities and text helpers
// reference: input validation patterns

use crate::error::{ChatError, Result};
use std::path::Path;

pub struct Validator;

impl Validator {
    pub fn validate_corpus_path(path: &Path) -> Result<()> {
        if !path.exists() {
            return Err(ChatError::CorpusNotFound {
                path: path.to_path_buf(),
            });
        }

        if !path.is_file() {
            return Err(ChatError::Validation(format!(
                "Knowledge base path is not a file: {}",
                path.display()
            )));
        }

        Ok(())
    }

    pub fn validate_url(url: &str) -> Result<()> {
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ChatError::Validation(format!(
                "Invalid URL format: {}",
                url
            )));
        }
        Ok(())
    }

    /// Truncates on a character boundary and appends `...` when shortened.
    pub fn truncate_text(text: &str, max_chars: usize) -> String {
        match text.char_indices().nth(max_chars) {
            None => text.to_string(),
            Some((byte_idx, _)) => format!("{}...", &text[..byte_idx]),
        }
    }

    pub fn single_line(text: &str) -> String {
        text.split_whitespace().collect::<Vec<_>>().join(" ")
    }
}

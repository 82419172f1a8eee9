// file: src/models/document.rs
// description: a single passage of the loaded knowledge base
// reference: internal data structures

use crate::utils::Validator;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Zero-based position in the corpus; ties in ranking resolve on this.
    pub index: usize,
    pub content: String,
}

impl Document {
    pub fn new(index: usize, content: impl Into<String>) -> Self {
        Self {
            index,
            content: content.into(),
        }
    }

    pub fn char_count(&self) -> usize {
        self.content.chars().count()
    }

    pub fn preview(&self, max_chars: usize) -> String {
        Validator::truncate_text(&Validator::single_line(&self.content), max_chars)
    }
}

// file: src/models/mod.rs
// description: data models module exports
// reference: internal module structure

pub mod document;
pub mod history;
pub mod scored_document;

pub use document::Document;
pub use history::{History, HistoryEntry, Role};
pub use scored_document::ScoredDocument;

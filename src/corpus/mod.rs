// file: src/corpus/mod.rs
// description: knowledge base loading and keyword relevance ranking
// reference: internal module structure

mod loader;
mod scorer;

pub use loader::{Corpus, CorpusStats};
pub use scorer::{DEFAULT_MAX_DOCUMENTS, DEFAULT_MIN_TOKEN_CHARS, Scorer, Selection, find_relevant};

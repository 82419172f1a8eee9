// file: src/lib.rs
// description: library entry point and public api exports
// reference: rust library patterns

//! Answers questions about a local space biology knowledge base by picking
//! passages with keyword overlap and forwarding them to a chat completion API.

pub mod chat;
pub mod config;
pub mod corpus;
pub mod error;
pub mod llm;
pub mod models;
pub mod utils;

pub use chat::{Exchange, PromptBuilder, ResponseSpinner, Session, SessionState};
pub use config::{CompletionConfig, Config, CorpusConfig, RetrievalConfig, SessionConfig};
pub use corpus::{Corpus, CorpusStats, Scorer, Selection, find_relevant};
pub use error::{ChatError, Result};
pub use llm::{ChatMessage, CompletionClient, OpenAiClient};
pub use models::{Document, History, HistoryEntry, Role, ScoredDocument};
pub use utils::Validator;

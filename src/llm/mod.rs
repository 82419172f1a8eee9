// file: src/llm/mod.rs
// description: chat completion client module exports
// reference: internal module structure

mod client;

pub use client::{ChatMessage, CompletionClient, OpenAiClient};

// file: src/chat/prompt.rs
// description: builds the grounded instruction sent with each question
// reference: retrieval-augmented prompt template

use crate::config::CompletionConfig;
use crate::llm::ChatMessage;
use crate::models::Document;

pub const ANSWER_INSTRUCTION: &str = "Please provide a concise answer focused on the research \
above. If the research doesn't contain relevant information, say so.";

const CONTEXT_SEPARATOR: &str = "\n\n";

#[derive(Debug, Clone)]
pub struct PromptBuilder {
    system_prompt: String,
    context_preamble: String,
}

impl PromptBuilder {
    pub fn new(system_prompt: impl Into<String>, context_preamble: impl Into<String>) -> Self {
        Self {
            system_prompt: system_prompt.into(),
            context_preamble: context_preamble.into(),
        }
    }

    pub fn from_config(config: &CompletionConfig) -> Self {
        Self::new(&config.system_prompt, &config.context_preamble)
    }

    pub fn context(documents: &[&Document]) -> String {
        documents
            .iter()
            .map(|doc| doc.content.as_str())
            .collect::<Vec<_>>()
            .join(CONTEXT_SEPARATOR)
    }

    pub fn build(&self, question: &str, documents: &[&Document]) -> String {
        format!(
            "{}\n\n{}\n\nQuestion: {}\n\n{}",
            self.context_preamble,
            Self::context(documents),
            question,
            ANSWER_INSTRUCTION
        )
    }

    /// System instruction followed by the grounded user prompt.
    pub fn messages(&self, question: &str, documents: &[&Document]) -> Vec<ChatMessage> {
        vec![
            ChatMessage::system(&self.system_prompt),
            ChatMessage::user(self.build(question, documents)),
        ]
    }
}

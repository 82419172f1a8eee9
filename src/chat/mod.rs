// file: src/chat/mod.rs
// description: prompt assembly and the interactive question/answer loop
// reference: internal module structure

mod progress;
mod prompt;
mod session;

pub use progress::ResponseSpinner;
pub use prompt::{ANSWER_INSTRUCTION, PromptBuilder};
pub use session::{Exchange, Session, SessionState};

// file: src/chat/session.rs
// description: interactive read loop that answers questions from the knowledge base
// reference: retrieve, assemble, complete, print

use crate::chat::{PromptBuilder, ResponseSpinner};
use crate::config::Config;
use crate::corpus::{Corpus, Scorer};
use crate::error::{ChatError, Result};
use crate::llm::{ChatMessage, CompletionClient};
use crate::models::History;
use crate::utils::logging::{
    format_bot, format_error, format_info, format_rule, format_success, format_user_prompt,
};
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, info, warn};

const RULE_WIDTH: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    AwaitingInput,
    Done,
}

/// Outcome of one answered question.
#[derive(Debug, Clone, PartialEq)]
pub struct Exchange {
    pub question: String,
    /// Corpus positions of the documents used as context, in prompt order.
    pub documents: Vec<usize>,
    pub fallback: bool,
    pub reply: String,
}

struct PreparedRequest {
    documents: Vec<usize>,
    fallback: bool,
    messages: Vec<ChatMessage>,
}

pub struct Session<C> {
    corpus: Corpus,
    client: C,
    scorer: Scorer,
    prompt: PromptBuilder,
    history: History,
    max_documents: usize,
    fallback_documents: usize,
    exit_keywords: Vec<String>,
    show_spinner: bool,
}

impl<C: CompletionClient> Session<C> {
    pub fn new(corpus: Corpus, client: C, config: &Config) -> Self {
        Self {
            corpus,
            client,
            scorer: Scorer::new(config.retrieval.min_token_chars),
            prompt: PromptBuilder::from_config(&config.completion),
            history: History::new(config.session.history_limit),
            max_documents: config.retrieval.max_documents,
            fallback_documents: config.retrieval.fallback_documents,
            exit_keywords: config
                .session
                .exit_keywords
                .iter()
                .map(|k| k.to_lowercase())
                .collect(),
            show_spinner: config.session.show_spinner,
        }
    }

    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Recorded exchanges. Kept for inspection only; never sent to the model.
    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn is_exit(&self, input: &str) -> bool {
        let lowered = input.trim().to_lowercase();
        self.exit_keywords.iter().any(|k| *k == lowered)
    }

    pub fn print_banner<W: Write>(&self, out: &mut W) -> Result<()> {
        writeln!(out, "{}", format_success("Space Biology knowledge base loaded"))?;
        writeln!(
            out,
            "{}",
            format_info(&format!(
                "Knowledge base size: {} characters",
                self.corpus.total_chars()
            ))
        )?;
        writeln!(
            out,
            "{}",
            format_info(&format!("Loaded {} research documents", self.corpus.len()))
        )?;
        writeln!(out)?;
        writeln!(out, "Space Biology Expert Chatbot Ready!")?;
        writeln!(
            out,
            "Type {} to end the conversation",
            self.exit_keywords
                .iter()
                .map(|k| format!("'{}'", k))
                .collect::<Vec<_>>()
                .join(" or ")
        )?;
        writeln!(out)?;
        Ok(())
    }

    /// Picks the context documents and builds the request for one question.
    fn prepare(&self, question: &str) -> PreparedRequest {
        let selection = self.scorer.select(
            question,
            &self.corpus,
            self.max_documents,
            self.fallback_documents,
        );

        PreparedRequest {
            documents: selection.documents.iter().map(|d| d.index).collect(),
            fallback: selection.fallback,
            messages: self.prompt.messages(question, &selection.documents),
        }
    }

    async fn dispatch(&mut self, question: &str, request: PreparedRequest) -> Result<Exchange> {
        let reply = self.client.complete(&request.messages).await?;
        self.history.record_exchange(question, &reply);
        debug!("History holds {} entries", self.history.len());

        Ok(Exchange {
            question: question.to_string(),
            documents: request.documents,
            fallback: request.fallback,
            reply,
        })
    }

    /// Answers one question without any console output.
    pub async fn ask(&mut self, question: &str) -> Result<Exchange> {
        let request = self.prepare(question);
        self.dispatch(question, request).await
    }

    async fn answer<W: Write>(&mut self, question: &str, out: &mut W) -> Result<()> {
        writeln!(out, "{}", format_info("Searching for relevant research..."))?;

        let request = self.prepare(question);
        if request.fallback {
            writeln!(
                out,
                "{}",
                format_info("Using general space biology knowledge...")
            )?;
        } else {
            writeln!(
                out,
                "{}",
                format_info(&format!(
                    "Found {} relevant research papers...",
                    request.documents.len()
                ))
            )?;
        }

        let spinner = ResponseSpinner::start("Generating response...", self.show_spinner);
        if spinner.is_hidden() {
            writeln!(out, "{}", format_info("Generating response..."))?;
        }
        out.flush()?;

        let exchange = self.dispatch(question, request).await;
        spinner.finish();
        let exchange = exchange?;

        writeln!(out)?;
        writeln!(out, "{}", format_bot(&exchange.reply))?;
        writeln!(out, "{}", format_rule(RULE_WIDTH))?;

        Ok(())
    }

    fn report_failure<W: Write>(&self, err: &ChatError, out: &mut W) -> Result<()> {
        warn!("Exchange failed: {}", err);
        writeln!(out)?;
        writeln!(out, "{}", format_error(&format!("Error: {}", err)))?;
        writeln!(out, "Please try again with a different question.")?;
        Ok(())
    }

    /// Reads one line and acts on it. Exchange failures are reported and swallowed.
    pub async fn step<R, W>(&mut self, input: &mut R, out: &mut W) -> Result<SessionState>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
    {
        write!(out, "{}", format_user_prompt())?;
        out.flush()?;

        let mut raw = Vec::new();
        if input.read_until(b'\n', &mut raw).await? == 0 {
            writeln!(out)?;
            info!("Input closed, ending session");
            return Ok(SessionState::Done);
        }

        let line = match String::from_utf8(raw) {
            Ok(line) => line,
            Err(e) => {
                let err = ChatError::Validation(format!(
                    "input is not valid UTF-8: {}",
                    e.utf8_error()
                ));
                self.report_failure(&err, out)?;
                return Ok(SessionState::AwaitingInput);
            }
        };
        let question = line.trim();

        if self.is_exit(question) {
            writeln!(
                out,
                "{}",
                format_bot("Thank you for chatting about space biology!")
            )?;
            return Ok(SessionState::Done);
        }

        if question.is_empty() {
            return Ok(SessionState::AwaitingInput);
        }

        if let Err(e) = self.answer(question, out).await {
            self.report_failure(&e, out)?;
        }

        Ok(SessionState::AwaitingInput)
    }

    pub async fn run<R, W>(&mut self, input: &mut R, out: &mut W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
    {
        let mut state = SessionState::AwaitingInput;
        while state == SessionState::AwaitingInput {
            state = self.step(input, out).await?;
        }
        Ok(())
    }
}

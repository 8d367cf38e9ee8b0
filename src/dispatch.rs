//! Chat dispatch
//!
//! Routes each inbound message: the start token begins a questionnaire, an
//! active session consumes the message as an answer, anything else goes to
//! the summary generator as free-form chat.

use crate::pipeline::ScoringPipeline;
use crate::prompts;
use crate::session::{SessionStore, SubmitOutcome};
use crate::summary::{SummaryGenerator, SUMMARY_FALLBACK};
use chrono::Duration;
use std::collections::HashMap;
use tracing::{error, info, warn};

/// Token a user sends to begin the questionnaire
pub const START_TOKEN: &str = "@start";

/// Greeting emitted when a questionnaire begins
pub const WELCOME_MESSAGE: &str = "Welcome to SociaLytix! Let's assess your mental wellness based on your social media use. Please answer honestly.";

/// Reply used when the scoring pipeline fails; deliberately carries no
/// internal error detail
pub const SCORING_ERROR_MESSAGE: &str =
    "Sorry, something went wrong while scoring your answers. Type @start to try again.";

/// Survey chatbot: session store, scoring pipeline, and summary generator
pub struct ChatBot<S: SummaryGenerator> {
    sessions: SessionStore,
    pipeline: ScoringPipeline,
    summarizer: S,
}

impl<S: SummaryGenerator> ChatBot<S> {
    /// Create a chatbot over a scoring pipeline and summary generator
    pub fn new(pipeline: ScoringPipeline, summarizer: S) -> Self {
        Self {
            sessions: SessionStore::new(),
            pipeline,
            summarizer,
        }
    }

    /// Handle one inbound message and return the ordered replies.
    ///
    /// # Arguments
    /// * `session_id` - Stable id for the sending user
    /// * `message` - Raw inbound text
    ///
    /// # Returns
    /// The outbound messages to send, in order; never empty
    pub async fn handle_message(&mut self, session_id: &str, message: &str) -> Vec<String> {
        let trimmed = message.trim();

        if trimmed == START_TOKEN {
            let first = self.sessions.start(session_id);
            info!("Questionnaire started for session {}", session_id);
            return vec![WELCOME_MESSAGE.to_string(), first.prompt.to_string()];
        }

        if self.sessions.is_active(session_id) {
            return self.handle_answer(session_id, trimmed).await;
        }

        self.handle_chat(trimmed).await
    }

    /// Drop sessions idle for longer than `max_idle`; returns how many were
    /// removed
    pub fn evict_idle(&mut self, max_idle: Duration) -> usize {
        self.sessions.evict_idle(max_idle)
    }

    /// Number of questionnaires in progress
    pub fn active_sessions(&self) -> usize {
        self.sessions.len()
    }

    async fn handle_answer(&mut self, session_id: &str, answer: &str) -> Vec<String> {
        match self.sessions.submit(session_id, answer) {
            Ok(SubmitOutcome::NextPrompt(question)) => vec![question.prompt.to_string()],
            Ok(SubmitOutcome::Complete(answers)) => self.handle_complete(session_id, answers).await,
            // A message without a session is ordinary chat
            Err(_) => self.handle_chat(answer).await,
        }
    }

    /// Score a completed answer set and build the result replies.
    ///
    /// The session is already gone from the store by the time this runs, so
    /// a scoring failure still leaves the user free to restart.
    async fn handle_complete(
        &mut self,
        session_id: &str,
        answers: HashMap<String, String>,
    ) -> Vec<String> {
        match self.pipeline.score(&answers) {
            Ok(result) => {
                info!("Session {} scored: label {}", session_id, result.label);
                let mut replies = result.message_lines();
                replies.push(self.summarize_or_fallback(&prompts::results_prompt(&result)).await);
                replies
            }
            Err(e) => {
                error!("Scoring failed for session {}: {}", session_id, e);
                vec![SCORING_ERROR_MESSAGE.to_string()]
            }
        }
    }

    async fn handle_chat(&self, message: &str) -> Vec<String> {
        vec![self.summarize_or_fallback(&prompts::chat_prompt(message)).await]
    }

    /// Call the summary generator, substituting the fixed fallback on failure
    async fn summarize_or_fallback(&self, prompt: &str) -> String {
        match self.summarizer.summarize(prompt).await {
            Ok(text) => text,
            Err(e) => {
                warn!("Summary generation failed: {}", e);
                SUMMARY_FALLBACK.to_string()
            }
        }
    }
}

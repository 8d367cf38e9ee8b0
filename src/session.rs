//! Session state
//!
//! Per-respondent questionnaire progress, keyed by a caller-supplied session
//! id. Sessions advance one answer at a time and are removed from the store
//! the moment the final answer lands, so a finished respondent can restart
//! cleanly no matter what happens downstream.

use crate::error::EngineError;
use crate::survey::{Question, QUESTIONS, QUESTION_COUNT};
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;

/// One respondent's questionnaire progress
#[derive(Debug, Clone)]
pub struct SessionState {
    /// Collected answers keyed by question key
    pub answers: HashMap<String, String>,
    /// Index of the next unanswered question; always below
    /// [`QUESTION_COUNT`] while the session is stored
    pub next_index: usize,
    /// When the questionnaire was started
    pub started_at: DateTime<Utc>,
    /// When the last answer arrived
    pub last_active: DateTime<Utc>,
}

impl SessionState {
    fn new(now: DateTime<Utc>) -> Self {
        Self {
            answers: HashMap::new(),
            next_index: 0,
            started_at: now,
            last_active: now,
        }
    }
}

/// Outcome of submitting one answer
#[derive(Debug, Clone)]
pub enum SubmitOutcome {
    /// More questions remain; ask this one next
    NextPrompt(&'static Question),
    /// All answers are collected and the session has been cleared
    Complete(HashMap<String, String>),
}

/// Questionnaire store keyed by session id.
///
/// Session ids come from the embedding transport; independent users must use
/// distinct ids.
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: HashMap<String, SessionState>,
}

impl SessionStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Start (or restart) the questionnaire for `session_id`.
    ///
    /// Any in-progress answers for the id are discarded.
    ///
    /// # Returns
    /// The first question to ask
    pub fn start(&mut self, session_id: &str) -> &'static Question {
        self.sessions
            .insert(session_id.to_string(), SessionState::new(Utc::now()));
        &QUESTIONS[0]
    }

    /// Whether `session_id` has a questionnaire in progress
    pub fn is_active(&self, session_id: &str) -> bool {
        self.sessions.contains_key(session_id)
    }

    /// Progress for `session_id`, if a questionnaire is in progress
    pub fn get(&self, session_id: &str) -> Option<&SessionState> {
        self.sessions.get(session_id)
    }

    /// Record one answer for `session_id`.
    ///
    /// The trimmed answer is stored under the current question's key. While
    /// questions remain, the next prompt is returned; when the final answer
    /// lands, the session is removed from the store and the full answer set
    /// is handed back for scoring.
    ///
    /// # Errors
    /// [`EngineError::NoActiveSession`] when no questionnaire is in progress
    /// for the id
    pub fn submit(
        &mut self,
        session_id: &str,
        raw_answer: &str,
    ) -> Result<SubmitOutcome, EngineError> {
        let state = self
            .sessions
            .get_mut(session_id)
            .ok_or_else(|| EngineError::NoActiveSession(session_id.to_string()))?;

        let question = &QUESTIONS[state.next_index];
        state
            .answers
            .insert(question.key.to_string(), raw_answer.trim().to_string());
        state.next_index += 1;
        state.last_active = Utc::now();

        if state.next_index < QUESTION_COUNT {
            return Ok(SubmitOutcome::NextPrompt(&QUESTIONS[state.next_index]));
        }

        // Final answer: drop the session before anything downstream runs so
        // the respondent can restart whether or not scoring succeeds.
        let completed = self
            .sessions
            .remove(session_id)
            .map(|state| state.answers)
            .unwrap_or_default();
        Ok(SubmitOutcome::Complete(completed))
    }

    /// Remove the session for `session_id`; returns whether one existed
    pub fn clear(&mut self, session_id: &str) -> bool {
        self.sessions.remove(session_id).is_some()
    }

    /// Drop sessions idle for longer than `max_idle`.
    ///
    /// # Returns
    /// How many sessions were removed
    pub fn evict_idle(&mut self, max_idle: Duration) -> usize {
        let cutoff = Utc::now() - max_idle;
        let before = self.sessions.len();
        self.sessions.retain(|_, state| state.last_active >= cutoff);
        before - self.sessions.len()
    }

    /// Number of questionnaires in progress
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Whether no questionnaires are in progress
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

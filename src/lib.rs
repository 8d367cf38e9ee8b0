//! SociaLytix - Survey chatbot core for social-media wellness scoring
//!
//! SociaLytix turns a short questionnaire about social media habits into a
//! wellness read-out through a deterministic pipeline: answer collection →
//! feature encoding → regression scoring → label derivation, with an LLM
//! summary layered on top.
//!
//! ## Modules
//!
//! - **Survey**: Fixed ten-question questionnaire and session sequencing
//! - **Scoring**: Feature vector construction, tree-ensemble regressors, label rule
//! - **Chat**: Message dispatch and Gemini-backed summaries

pub mod artifacts;
pub mod dispatch;
pub mod encoder;
pub mod error;
pub mod features;
pub mod label;
pub mod model;
pub mod pipeline;
pub mod prompts;
pub mod session;
pub mod summary;
pub mod survey;

pub use artifacts::{ScoringArtifacts, ARTIFACT_SCHEMA};
pub use dispatch::{ChatBot, START_TOKEN, WELCOME_MESSAGE};
pub use error::EngineError;
pub use pipeline::{PredictionResult, ScoringPipeline};

// Survey exports
pub use survey::{Question, QUESTIONS, QUESTION_COUNT};

// Summary exports
pub use summary::{GeminiClient, GeminiConfig, SummaryGenerator, SUMMARY_FALLBACK};

/// Bot version reported by the CLI and doctor checks
pub const BOT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Producer name reported by the CLI and doctor checks
pub const BOT_NAME: &str = "socialytix";

//! Survey catalog
//!
//! The fixed ten-question intake used to collect one respondent's
//! social-media usage profile. Question order matches the column order the
//! regression models were trained with and must not change.

use serde::Serialize;

/// One survey question: a stable column key plus the prompt shown to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Question {
    /// Column key, matching the training data header
    pub key: &'static str,
    /// Prompt text sent to the user
    pub prompt: &'static str,
}

/// Number of questions in the intake
pub const QUESTION_COUNT: usize = 10;

/// The intake questions, in the fixed order answers are collected
pub static QUESTIONS: [Question; QUESTION_COUNT] = [
    Question {
        key: "Age",
        prompt: "Enter your age (e.g., 20):",
    },
    Question {
        key: "Gender",
        prompt: "Enter your gender (male/female/other):",
    },
    Question {
        key: "Academic_Level",
        prompt: "Enter your academic level (e.g., undergraduate):",
    },
    Question {
        key: "Country",
        prompt: "Enter your country:",
    },
    Question {
        key: "Avg_Daily_Usage_Hours",
        prompt: "How many hours per day do you use social media (e.g., 4.5)?",
    },
    Question {
        key: "Most_Used_Platform",
        prompt: "Which social media platform do you use the most?",
    },
    Question {
        key: "Affects_Academic_Performance",
        prompt: "Does social media affect your academic performance? (yes/no):",
    },
    Question {
        key: "Relationship_Status",
        prompt: "What is your relationship status? (e.g., single):",
    },
    Question {
        key: "Conflicts_Over_Social_Media",
        prompt: "How many conflicts have you had over social media recently (0-10)?",
    },
    Question {
        key: "Sleep_Hours_Per_Night",
        prompt: "How many hours do you sleep per night?",
    },
];

/// Columns answered with plain numbers rather than encoded categories
pub const NUMERIC_FIELDS: [&str; 4] = [
    "Age",
    "Avg_Daily_Usage_Hours",
    "Conflicts_Over_Social_Media",
    "Sleep_Hours_Per_Night",
];

/// Get the question at `index`, if it exists
pub fn question(index: usize) -> Option<&'static Question> {
    QUESTIONS.get(index)
}

/// Whether `key` is a numeric-only survey column
pub fn is_numeric_field(key: &str) -> bool {
    NUMERIC_FIELDS.contains(&key)
}

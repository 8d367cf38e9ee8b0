//! Prompt construction for the summary generator
//!
//! The persona preamble and the two message shapes sent to the LLM: a recap
//! of one scoring result, and pass-through free-form chat.

use crate::pipeline::PredictionResult;

/// Persona preamble prepended to every generated prompt
pub const PERSONA_PREAMBLE: &str = "You are SociaLytix, a supportive and friendly AI designed to help users reflect on their social media habits and their impact on mental well-being. Offer 2-3 friendly, actionable suggestions if needed. Keep your tone warm, non-judgmental, and encouraging. Never request sensitive or identifying personal details. End your analysis with a motivational message like, “Take care of yourself — you're doing better than you think. 🌱”. Don't reply in Readme format. Keep your response short and conversational. Now respond to the user message:\n";

/// Build the prompt recapping one scoring result
pub fn results_prompt(result: &PredictionResult) -> String {
    format!(
        "{}Mental health score: {:.1}, Addiction score: {:.1}, Label: {}.",
        PERSONA_PREAMBLE, result.mental_score, result.addicted_score, result.label
    )
}

/// Build the prompt for free-form chat
pub fn chat_prompt(message: &str) -> String {
    format!("{}{}", PERSONA_PREAMBLE, message.trim())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::label::WellnessLabel;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_results_prompt_carries_scores_and_label() {
        let result = PredictionResult {
            mental_score: 7.4,
            addicted_score: 3.1,
            label: WellnessLabel::Moderate,
        };

        let prompt = results_prompt(&result);

        assert!(prompt.starts_with(PERSONA_PREAMBLE));
        assert!(prompt.ends_with("Mental health score: 7.4, Addiction score: 3.1, Label: Moderate."));
    }

    #[test]
    fn test_chat_prompt_appends_trimmed_message() {
        let prompt = chat_prompt("  how do I cut back on scrolling?  ");

        assert!(prompt.starts_with(PERSONA_PREAMBLE));
        assert!(prompt.ends_with("how do I cut back on scrolling?"));
    }

    #[test]
    fn test_preamble_appears_once() {
        let prompt = chat_prompt("hello");
        assert_eq!(prompt.matches("You are SociaLytix").count(), 1);
    }
}

//! Wellness label rule
//!
//! Maps the two predicted scores plus two answer-derived inputs onto a
//! coarse three-level wellness label through a fixed point rubric. The rule
//! is pure and total.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarse wellness assessment derived from the point rubric
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WellnessLabel {
    Healthy,
    Moderate,
    Unwell,
}

impl WellnessLabel {
    /// Label text as shown to the user
    pub fn as_str(&self) -> &'static str {
        match self {
            WellnessLabel::Healthy => "Healthy",
            WellnessLabel::Moderate => "Moderate",
            WellnessLabel::Unwell => "Unwell",
        }
    }
}

impl fmt::Display for WellnessLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Derive the wellness label from predicted scores and answers.
///
/// Each input contributes 0-2 points independently; the summed total is
/// thresholded: >= 7 gives Healthy, >= 4 gives Moderate, anything lower
/// gives Unwell.
///
/// # Arguments
/// * `mental_score` - Predicted mental health score
/// * `addicted_score` - Predicted addiction score
/// * `sleep_hours` - Reported nightly sleep hours
/// * `conflicts` - Reported count of recent conflicts over social media
pub fn derive_wellness_label(
    mental_score: f64,
    addicted_score: f64,
    sleep_hours: f64,
    conflicts: i64,
) -> WellnessLabel {
    let total = mental_health_points(mental_score)
        + addiction_points(addicted_score)
        + sleep_points(sleep_hours)
        + conflict_points(conflicts);

    if total >= 7 {
        WellnessLabel::Healthy
    } else if total >= 4 {
        WellnessLabel::Moderate
    } else {
        WellnessLabel::Unwell
    }
}

/// Points for the predicted mental health score: >= 8 earns 2, >= 6 earns 1
fn mental_health_points(score: f64) -> u32 {
    if score >= 8.0 {
        2
    } else if score >= 6.0 {
        1
    } else {
        0
    }
}

/// Points for the predicted addiction score: <= 3 earns 2, <= 6 earns 1
fn addiction_points(score: f64) -> u32 {
    if score <= 3.0 {
        2
    } else if score <= 6.0 {
        1
    } else {
        0
    }
}

/// Points for nightly sleep: >= 7 hours earns 2, >= 6 earns 1
fn sleep_points(hours: f64) -> u32 {
    if hours >= 7.0 {
        2
    } else if hours >= 6.0 {
        1
    } else {
        0
    }
}

/// Points for recent conflicts: none earns 2, one or two earn 1
fn conflict_points(conflicts: i64) -> u32 {
    if conflicts == 0 {
        2
    } else if conflicts <= 2 {
        1
    } else {
        0
    }
}

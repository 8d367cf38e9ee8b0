//! Scoring pipeline
//!
//! Orchestrates one completed questionnaire through the trained artifacts:
//! feature vector construction, the two regressors, then the wellness label
//! rule.

use crate::artifacts::ScoringArtifacts;
use crate::error::EngineError;
use crate::features::{build_feature_vector, FeatureVector};
use crate::label::{derive_wellness_label, WellnessLabel};
use crate::model::{Predictor, TreeEnsembleModel};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

/// Column the label rule reads nightly sleep hours from
const SLEEP_COLUMN: &str = "Sleep_Hours_Per_Night";

/// Column the label rule reads the conflict count from
const CONFLICTS_COLUMN: &str = "Conflicts_Over_Social_Media";

/// Outcome of scoring one completed questionnaire
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    /// Predicted mental health score
    pub mental_score: f64,
    /// Predicted addiction score
    pub addicted_score: f64,
    /// Wellness label derived from the point rubric
    pub label: WellnessLabel,
}

impl PredictionResult {
    /// The three user-facing result lines, in emit order
    pub fn message_lines(&self) -> Vec<String> {
        vec![
            format!("Predicted Mental Health Score: {:.1}", self.mental_score),
            format!("Predicted Addiction Score: {:.1}", self.addicted_score),
            format!("Mental Wellness Label: {}", self.label),
        ]
    }
}

/// Scoring pipeline bound to one set of artifacts
#[derive(Debug, Clone)]
pub struct ScoringPipeline {
    artifacts: Arc<ScoringArtifacts>,
}

impl ScoringPipeline {
    /// Create a pipeline over shared artifacts
    pub fn new(artifacts: Arc<ScoringArtifacts>) -> Self {
        Self { artifacts }
    }

    /// The artifacts this pipeline scores with
    pub fn artifacts(&self) -> &ScoringArtifacts {
        &self.artifacts
    }

    /// Score one completed answer set.
    ///
    /// # Arguments
    /// * `answers` - Raw answers keyed by question key
    ///
    /// # Returns
    /// The two predicted scores and the derived wellness label
    ///
    /// # Errors
    /// [`EngineError::FeatureMismatch`] when either model's declared feature
    /// count disagrees with the built vector
    pub fn score(
        &self,
        answers: &HashMap<String, String>,
    ) -> Result<PredictionResult, EngineError> {
        let features = build_feature_vector(
            answers,
            &self.artifacts.encoders,
            &self.artifacts.feature_columns,
        );

        check_feature_width(&self.artifacts.mental_model, &features)?;
        check_feature_width(&self.artifacts.addiction_model, &features)?;

        let mental_score = self.artifacts.mental_model.predict(&features);
        let addicted_score = self.artifacts.addiction_model.predict(&features);

        let sleep_hours = self.column_value(&features, SLEEP_COLUMN);
        let conflicts = self.column_value(&features, CONFLICTS_COLUMN) as i64;

        let label = derive_wellness_label(mental_score, addicted_score, sleep_hours, conflicts);

        Ok(PredictionResult {
            mental_score,
            addicted_score,
            label,
        })
    }

    /// Feature value for a named column, 0.0 when the column is absent
    fn column_value(&self, features: &FeatureVector, column: &str) -> f64 {
        self.artifacts
            .column_index(column)
            .map(|index| features.get(index))
            .unwrap_or(0.0)
    }
}

/// Reject a model whose declared width disagrees with the built vector
fn check_feature_width(
    model: &TreeEnsembleModel,
    features: &FeatureVector,
) -> Result<(), EngineError> {
    if model.n_features() != features.len() {
        return Err(EngineError::FeatureMismatch {
            target: model.target().to_string(),
            expected: model.n_features(),
            got: features.len(),
        });
    }
    Ok(())
}

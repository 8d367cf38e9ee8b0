//! Scoring artifacts
//!
//! The immutable bundle of training outputs the chatbot needs at inference
//! time: the feature column order, the per-field category encoders, and the
//! two fitted regressors. Artifacts are produced offline, loaded once at
//! startup, and shared by reference.

use crate::encoder::CategoryEncoder;
use crate::error::EngineError;
use crate::model::TreeEnsembleModel;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Schema tag expected in artifact documents
pub const ARTIFACT_SCHEMA: &str = "socialytix.artifacts.v1";

/// Everything the scoring pipeline needs, frozen at training time
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringArtifacts {
    /// Schema tag, must equal [`ARTIFACT_SCHEMA`]
    pub schema: String,
    /// Feature columns in the order the models were trained with
    pub feature_columns: Vec<String>,
    /// Category encoders keyed by column name
    pub encoders: BTreeMap<String, CategoryEncoder>,
    /// Regressor for the mental health score
    pub mental_model: TreeEnsembleModel,
    /// Regressor for the addiction score
    pub addiction_model: TreeEnsembleModel,
}

impl ScoringArtifacts {
    /// Load artifacts from JSON and validate them
    pub fn from_json(json: &str) -> Result<Self, EngineError> {
        let artifacts: Self = serde_json::from_str(json)?;
        artifacts.validate()?;
        Ok(artifacts)
    }

    /// Load artifacts from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, EngineError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Serialize artifacts to pretty-printed JSON
    pub fn to_json(&self) -> Result<String, EngineError> {
        serde_json::to_string_pretty(self).map_err(EngineError::JsonError)
    }

    /// Check artifact consistency.
    ///
    /// Verifies the schema tag, a non-empty duplicate-free column list,
    /// canonical encoders covering only known columns, the internal
    /// structure of both regressors, and that each regressor's declared
    /// feature count matches the column list.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.schema != ARTIFACT_SCHEMA {
            return Err(EngineError::InvalidArtifact(format!(
                "unsupported schema '{}', expected '{}'",
                self.schema, ARTIFACT_SCHEMA
            )));
        }

        if self.feature_columns.is_empty() {
            return Err(EngineError::InvalidArtifact(
                "feature column list is empty".to_string(),
            ));
        }

        let mut seen = self.feature_columns.clone();
        seen.sort();
        seen.dedup();
        if seen.len() != self.feature_columns.len() {
            return Err(EngineError::InvalidArtifact(
                "feature column list contains duplicates".to_string(),
            ));
        }

        for (column, encoder) in &self.encoders {
            if !self.feature_columns.contains(column) {
                return Err(EngineError::InvalidArtifact(format!(
                    "encoder for unknown column '{}'",
                    column
                )));
            }
            if encoder.is_empty() {
                return Err(EngineError::InvalidArtifact(format!(
                    "encoder for column '{}' has no classes",
                    column
                )));
            }
            if !encoder.is_canonical() {
                return Err(EngineError::InvalidArtifact(format!(
                    "encoder for column '{}' is not lowercase-sorted",
                    column
                )));
            }
        }

        for model in [&self.mental_model, &self.addiction_model] {
            model.validate()?;
            if model.n_features() != self.feature_columns.len() {
                return Err(EngineError::InvalidArtifact(format!(
                    "model '{}' was fitted with {} features but the column list has {}",
                    model.target(),
                    model.n_features(),
                    self.feature_columns.len()
                )));
            }
        }

        Ok(())
    }

    /// Position of `column` in the feature order, if present
    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.feature_columns.iter().position(|c| c == column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{RegressionTree, TreeNode};
    use pretty_assertions::assert_eq;

    fn make_leaf_model(target: &str, n_features: usize, value: f64) -> TreeEnsembleModel {
        TreeEnsembleModel::new(
            target,
            n_features,
            vec![RegressionTree::new(vec![TreeNode::Leaf { value }])],
        )
    }

    fn make_test_artifacts() -> ScoringArtifacts {
        let mut encoders = BTreeMap::new();
        encoders.insert(
            "Gender".to_string(),
            CategoryEncoder::fit(["female", "male", "other"]),
        );

        ScoringArtifacts {
            schema: ARTIFACT_SCHEMA.to_string(),
            feature_columns: vec![
                "Age".to_string(),
                "Gender".to_string(),
                "Sleep_Hours_Per_Night".to_string(),
            ],
            encoders,
            mental_model: make_leaf_model("mental_health_score", 3, 7.0),
            addiction_model: make_leaf_model("addiction_score", 3, 4.0),
        }
    }

    #[test]
    fn test_valid_artifacts_pass_validation() {
        assert!(make_test_artifacts().validate().is_ok());
    }

    #[test]
    fn test_json_round_trip() {
        let artifacts = make_test_artifacts();
        let json = artifacts.to_json().unwrap();
        let loaded = ScoringArtifacts::from_json(&json).unwrap();

        assert_eq!(loaded.schema, ARTIFACT_SCHEMA);
        assert_eq!(loaded.feature_columns, artifacts.feature_columns);
        assert_eq!(loaded.encoders.len(), 1);
        assert_eq!(loaded.mental_model.target(), "mental_health_score");
    }

    #[test]
    fn test_unknown_schema_is_rejected() {
        let mut artifacts = make_test_artifacts();
        artifacts.schema = "socialytix.artifacts.v9".to_string();
        assert!(matches!(
            artifacts.validate(),
            Err(EngineError::InvalidArtifact(_))
        ));
    }

    #[test]
    fn test_duplicate_columns_are_rejected() {
        let mut artifacts = make_test_artifacts();
        artifacts.feature_columns.push("Age".to_string());
        assert!(artifacts.validate().is_err());
    }

    #[test]
    fn test_encoder_for_unknown_column_is_rejected() {
        let mut artifacts = make_test_artifacts();
        artifacts.encoders.insert(
            "Favorite_Color".to_string(),
            CategoryEncoder::fit(["red", "blue"]),
        );
        assert!(artifacts.validate().is_err());
    }

    #[test]
    fn test_model_width_mismatch_is_rejected() {
        let mut artifacts = make_test_artifacts();
        artifacts.addiction_model = make_leaf_model("addiction_score", 12, 4.0);
        assert!(artifacts.validate().is_err());
    }

    #[test]
    fn test_from_json_rejects_malformed_document() {
        assert!(ScoringArtifacts::from_json("not json").is_err());
        assert!(ScoringArtifacts::from_json(r#"{"schema": "x"}"#).is_err());
    }

    #[test]
    fn test_column_index() {
        let artifacts = make_test_artifacts();
        assert_eq!(artifacts.column_index("Age"), Some(0));
        assert_eq!(artifacts.column_index("Sleep_Hours_Per_Night"), Some(2));
        assert_eq!(artifacts.column_index("Unknown"), None);
    }
}

//! Regression model evaluation
//!
//! Serialized tree-ensemble regressors and the capability trait the scoring
//! pipeline depends on. Models are fitted offline and shipped inside the
//! scoring artifacts; evaluation here is pure.

use crate::error::EngineError;
use crate::features::FeatureVector;
use serde::{Deserialize, Serialize};

/// Capability interface for a fitted regression model.
///
/// Implementations must be side-effect-free and total for any well-formed
/// feature vector.
pub trait Predictor {
    /// Predict one score for one feature row
    fn predict(&self, features: &FeatureVector) -> f64;
}

/// One node of a serialized regression tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TreeNode {
    /// Internal split: go left when `x[feature] <= threshold`, else right
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    /// Terminal node carrying the predicted value
    Leaf { value: f64 },
}

/// A regression tree stored as a flat node array, rooted at index 0.
///
/// Split children point at higher indices, so a walk always moves forward
/// through the array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegressionTree {
    nodes: Vec<TreeNode>,
}

impl RegressionTree {
    /// Create a tree from its node array
    pub fn new(nodes: Vec<TreeNode>) -> Self {
        Self { nodes }
    }

    /// Number of nodes in the tree
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Walk the tree for one feature row.
    ///
    /// An empty or malformed tree yields 0.0. The walk is bounded by the
    /// node count, so it terminates even when the node array is inconsistent.
    pub fn evaluate(&self, features: &FeatureVector) -> f64 {
        let mut index = 0;
        for _ in 0..=self.nodes.len() {
            match self.nodes.get(index) {
                Some(TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                }) => {
                    index = if features.get(*feature) <= *threshold {
                        *left
                    } else {
                        *right
                    };
                }
                Some(TreeNode::Leaf { value }) => return *value,
                None => return 0.0,
            }
        }
        0.0
    }

    /// Check structural consistency of the tree.
    ///
    /// Every split must reference a feature below `n_features` and children
    /// at in-range indices strictly greater than the split's own index.
    pub fn validate(&self, n_features: usize) -> Result<(), EngineError> {
        for (index, node) in self.nodes.iter().enumerate() {
            if let TreeNode::Split {
                feature,
                left,
                right,
                ..
            } = node
            {
                if *feature >= n_features {
                    return Err(EngineError::InvalidArtifact(format!(
                        "tree node {} splits on feature {} but the model has {} features",
                        index, feature, n_features
                    )));
                }
                if *left <= index || *right <= index {
                    return Err(EngineError::InvalidArtifact(format!(
                        "tree node {} has backward child indices",
                        index
                    )));
                }
                if *left >= self.nodes.len() || *right >= self.nodes.len() {
                    return Err(EngineError::InvalidArtifact(format!(
                        "tree node {} has child indices out of range",
                        index
                    )));
                }
            }
        }
        Ok(())
    }
}

/// Tree-ensemble regressor predicting the mean of all per-tree outputs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeEnsembleModel {
    /// Name of the predicted target
    target: String,
    /// Number of features the ensemble was fitted with
    n_features: usize,
    trees: Vec<RegressionTree>,
}

impl TreeEnsembleModel {
    /// Create an ensemble from fitted trees
    pub fn new(target: impl Into<String>, n_features: usize, trees: Vec<RegressionTree>) -> Self {
        Self {
            target: target.into(),
            n_features,
            trees,
        }
    }

    /// Name of the predicted target
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Number of features the ensemble was fitted with
    pub fn n_features(&self) -> usize {
        self.n_features
    }

    /// Number of trees in the ensemble
    pub fn tree_count(&self) -> usize {
        self.trees.len()
    }

    /// Check structural consistency of every tree in the ensemble
    pub fn validate(&self) -> Result<(), EngineError> {
        for tree in &self.trees {
            tree.validate(self.n_features)?;
        }
        Ok(())
    }
}

impl Predictor for TreeEnsembleModel {
    /// Mean of the per-tree outputs; an ensemble with no trees yields 0.0
    fn predict(&self, features: &FeatureVector) -> f64 {
        if self.trees.is_empty() {
            return 0.0;
        }
        let sum: f64 = self.trees.iter().map(|t| t.evaluate(features)).sum();
        sum / self.trees.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn make_depth_one_tree() -> RegressionTree {
        RegressionTree::new(vec![
            TreeNode::Split {
                feature: 0,
                threshold: 5.0,
                left: 1,
                right: 2,
            },
            TreeNode::Leaf { value: 2.0 },
            TreeNode::Leaf { value: 8.0 },
        ])
    }

    #[test]
    fn test_leaf_only_tree() {
        let tree = RegressionTree::new(vec![TreeNode::Leaf { value: 4.2 }]);
        let features = FeatureVector::new(vec![0.0]);
        assert!((tree.evaluate(&features) - 4.2).abs() < 1e-9);
    }

    #[test]
    fn test_split_goes_left_on_equal_threshold() {
        let tree = make_depth_one_tree();

        let at_threshold = FeatureVector::new(vec![5.0]);
        assert!((tree.evaluate(&at_threshold) - 2.0).abs() < 1e-9);

        let above = FeatureVector::new(vec![5.1]);
        assert!((tree.evaluate(&above) - 8.0).abs() < 1e-9);
    }

    #[test]
    fn test_missing_feature_reads_zero() {
        // Vector shorter than the split's feature index; the walk uses 0.0
        let tree = RegressionTree::new(vec![
            TreeNode::Split {
                feature: 3,
                threshold: 1.0,
                left: 1,
                right: 2,
            },
            TreeNode::Leaf { value: 1.0 },
            TreeNode::Leaf { value: -1.0 },
        ]);
        let features = FeatureVector::new(vec![9.0]);
        assert!((tree.evaluate(&features) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_tree_yields_zero() {
        let tree = RegressionTree::new(vec![]);
        let features = FeatureVector::new(vec![1.0]);
        assert_eq!(tree.evaluate(&features), 0.0);
    }

    #[test]
    fn test_ensemble_predicts_mean_of_trees() {
        let model = TreeEnsembleModel::new(
            "mental_health_score",
            1,
            vec![
                RegressionTree::new(vec![TreeNode::Leaf { value: 6.0 }]),
                RegressionTree::new(vec![TreeNode::Leaf { value: 8.0 }]),
            ],
        );
        let features = FeatureVector::new(vec![0.0]);
        assert!((model.predict(&features) - 7.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_ensemble_yields_zero() {
        let model = TreeEnsembleModel::new("addiction_score", 1, vec![]);
        let features = FeatureVector::new(vec![1.0]);
        assert_eq!(model.predict(&features), 0.0);
    }

    #[test]
    fn test_predict_through_trait_object() {
        let model = TreeEnsembleModel::new(
            "mental_health_score",
            1,
            vec![make_depth_one_tree()],
        );
        let predictor: &dyn Predictor = &model;
        let features = FeatureVector::new(vec![2.0]);
        assert!((predictor.predict(&features) - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_validate_accepts_well_formed_tree() {
        let model = TreeEnsembleModel::new("mental_health_score", 1, vec![make_depth_one_tree()]);
        assert!(model.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_out_of_range_feature() {
        let model = TreeEnsembleModel::new("mental_health_score", 1, vec![
            RegressionTree::new(vec![
                TreeNode::Split {
                    feature: 7,
                    threshold: 0.0,
                    left: 1,
                    right: 2,
                },
                TreeNode::Leaf { value: 0.0 },
                TreeNode::Leaf { value: 1.0 },
            ]),
        ]);
        assert!(matches!(
            model.validate(),
            Err(EngineError::InvalidArtifact(_))
        ));
    }

    #[test]
    fn test_validate_rejects_backward_children() {
        let tree = RegressionTree::new(vec![
            TreeNode::Leaf { value: 0.0 },
            TreeNode::Split {
                feature: 0,
                threshold: 0.0,
                left: 0,
                right: 2,
            },
            TreeNode::Leaf { value: 1.0 },
        ]);
        assert!(tree.validate(1).is_err());
    }

    #[test]
    fn test_validate_rejects_dangling_children() {
        let tree = RegressionTree::new(vec![TreeNode::Split {
            feature: 0,
            threshold: 0.0,
            left: 1,
            right: 9,
        }]);
        assert!(tree.validate(1).is_err());
    }

    #[test]
    fn test_node_json_shapes() {
        let split: TreeNode = serde_json::from_str(
            r#"{"feature": 2, "threshold": 4.5, "left": 1, "right": 2}"#,
        )
        .unwrap();
        assert!(matches!(split, TreeNode::Split { feature: 2, .. }));

        let leaf: TreeNode = serde_json::from_str(r#"{"value": 3.25}"#).unwrap();
        assert!(matches!(leaf, TreeNode::Leaf { .. }));
    }

    #[test]
    fn test_model_serialization_round_trip() {
        let model = TreeEnsembleModel::new("addiction_score", 2, vec![make_depth_one_tree()]);
        let json = serde_json::to_string(&model).unwrap();
        let loaded: TreeEnsembleModel = serde_json::from_str(&json).unwrap();
        assert_eq!(model, loaded);
    }
}

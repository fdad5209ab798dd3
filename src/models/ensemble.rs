//! Gradient-boosted regression tree ensemble.
//!
//! The trained regressor is an additive ensemble:
//!
//! ```text
//! y(x) = base_score + Σ_t tree_t(x)
//! ```
//!
//! Each tree is stored as a flat node array with the root at index 0. A split
//! sends `x[feature] <= threshold` left and everything else (including NaN)
//! right. Children always sit at larger indices than their parent, which
//! `validate` enforces so evaluation cannot loop.

use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};

/// Anything that maps a feature matrix (one row per sample) to predictions.
pub trait Regressor: Send + Sync + std::fmt::Debug {
    /// Number of columns the regressor expects.
    fn n_features(&self) -> usize;

    /// Predict one value per row of `features`.
    fn predict(&self, features: &DMatrix<f64>) -> DVector<f64>;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TreeNode {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        leaf: f64,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegressionTree {
    pub nodes: Vec<TreeNode>,
}

impl RegressionTree {
    fn validate(&self, n_features: usize) -> Result<(), String> {
        if self.nodes.is_empty() {
            return Err("tree has no nodes".into());
        }
        for (idx, node) in self.nodes.iter().enumerate() {
            match *node {
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    if feature >= n_features {
                        return Err(format!(
                            "node {idx} splits on feature {feature}, but only {n_features} features exist"
                        ));
                    }
                    if threshold.is_nan() {
                        return Err(format!("node {idx} has a NaN threshold"));
                    }
                    for child in [left, right] {
                        if child <= idx || child >= self.nodes.len() {
                            return Err(format!("node {idx} has invalid child index {child}"));
                        }
                    }
                }
                TreeNode::Leaf { leaf } => {
                    if !leaf.is_finite() {
                        return Err(format!("node {idx} has a non-finite leaf value"));
                    }
                }
            }
        }
        Ok(())
    }

    /// Evaluate the tree for a single row.
    ///
    /// Relies on the invariants checked by `validate`.
    fn evaluate(&self, row: &[f64]) -> f64 {
        let mut idx = 0;
        loop {
            match self.nodes[idx] {
                TreeNode::Leaf { leaf } => return leaf,
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    idx = if row[feature] <= threshold { left } else { right };
                }
            }
        }
    }
}

/// Serialized regressor artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradientBoostedTrees {
    /// Column order the ensemble was trained on.
    pub feature_names: Vec<String>,
    /// Target was `ln(1 + revenue)`.
    #[serde(default)]
    pub log_target: bool,
    #[serde(default)]
    pub base_score: f64,
    pub trees: Vec<RegressionTree>,
}

impl GradientBoostedTrees {
    pub fn validate(&self) -> Result<(), String> {
        if !self.base_score.is_finite() {
            return Err("base_score must be finite".into());
        }
        let n = self.feature_names.len();
        for (t, tree) in self.trees.iter().enumerate() {
            tree.validate(n).map_err(|e| format!("tree {t}: {e}"))?;
        }
        Ok(())
    }

    fn predict_row(&self, row: &[f64]) -> f64 {
        self.base_score + self.trees.iter().map(|t| t.evaluate(row)).sum::<f64>()
    }
}

impl Regressor for GradientBoostedTrees {
    fn n_features(&self) -> usize {
        self.feature_names.len()
    }

    fn predict(&self, features: &DMatrix<f64>) -> DVector<f64> {
        let mut row = vec![0.0; features.ncols()];
        DVector::from_iterator(
            features.nrows(),
            (0..features.nrows()).map(|i| {
                for (j, v) in features.row(i).iter().enumerate() {
                    row[j] = *v;
                }
                self.predict_row(&row)
            }),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stump() -> GradientBoostedTrees {
        GradientBoostedTrees {
            feature_names: vec!["a".into(), "b".into()],
            log_target: false,
            base_score: 10.0,
            trees: vec![
                RegressionTree {
                    nodes: vec![
                        TreeNode::Split {
                            feature: 0,
                            threshold: 1.5,
                            left: 1,
                            right: 2,
                        },
                        TreeNode::Leaf { leaf: -1.0 },
                        TreeNode::Leaf { leaf: 2.0 },
                    ],
                },
                RegressionTree {
                    nodes: vec![TreeNode::Leaf { leaf: 0.5 }],
                },
            ],
        }
    }

    #[test]
    fn predicts_sum_of_trees_per_row() {
        let model = stump();
        assert!(model.validate().is_ok());
        let x = DMatrix::from_row_slice(3, 2, &[1.0, 0.0, 1.5, 0.0, 4.0, 0.0]);
        let y = model.predict(&x);
        assert_eq!(y.len(), 3);
        assert_eq!(y[0], 9.5);
        assert_eq!(y[1], 9.5);
        assert_eq!(y[2], 12.5);
    }

    #[test]
    fn nan_feature_goes_right() {
        let model = stump();
        let x = DMatrix::from_row_slice(1, 2, &[f64::NAN, 0.0]);
        assert_eq!(model.predict(&x)[0], 12.5);
    }

    #[test]
    fn parses_node_shapes_from_json() {
        let json = r#"{
            "feature_names": ["a"],
            "trees": [{"nodes": [
                {"feature": 0, "threshold": 3.0, "left": 1, "right": 2},
                {"leaf": 1.0},
                {"leaf": 2.0}
            ]}]
        }"#;
        let model: GradientBoostedTrees = serde_json::from_str(json).unwrap();
        assert!(!model.log_target);
        assert_eq!(model.base_score, 0.0);
        assert_eq!(model.trees[0].nodes[2], TreeNode::Leaf { leaf: 2.0 });
    }

    #[test]
    fn validate_rejects_backward_child_and_bad_feature() {
        let mut model = stump();
        model.trees[0].nodes[0] = TreeNode::Split {
            feature: 0,
            threshold: 1.0,
            left: 0,
            right: 2,
        };
        assert!(model.validate().unwrap_err().contains("invalid child index"));

        let mut model = stump();
        model.trees[0].nodes[0] = TreeNode::Split {
            feature: 7,
            threshold: 1.0,
            left: 1,
            right: 2,
        };
        assert!(model.validate().unwrap_err().contains("feature 7"));
    }
}

//! Random forest regression evaluated from stored trees

use crate::error::{ForecastError, Result};
use crate::features::FeatureMatrix;
use crate::models::RegressionModel;
use serde::{Deserialize, Serialize};

/// Node of a fitted regression tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TreeNode {
    /// Go to `left` when `x[feature] <= threshold`, otherwise to `right`
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    /// Terminal node
    Leaf { value: f64 },
}

/// A fitted regression tree stored as a flat node array, root first
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegressionTree {
    pub nodes: Vec<TreeNode>,
}

impl RegressionTree {
    /// Create a tree from its node array
    pub fn new(nodes: Vec<TreeNode>) -> Self {
        Self { nodes }
    }

    /// A single-leaf tree
    pub fn constant(value: f64) -> Self {
        Self::new(vec![TreeNode::Leaf { value }])
    }

    /// Children must point forward, which also rules out cycles
    fn validate(&self, n_features: usize) -> Result<()> {
        if self.nodes.is_empty() {
            return Err(ForecastError::ModelError("Tree has no nodes".to_string()));
        }

        for (index, node) in self.nodes.iter().enumerate() {
            if let TreeNode::Split {
                feature,
                left,
                right,
                ..
            } = *node
            {
                if feature >= n_features {
                    return Err(ForecastError::ModelError(format!(
                        "Node {} splits on feature {} but the model has {} features",
                        index, feature, n_features
                    )));
                }
                for child in [left, right] {
                    if child <= index || child >= self.nodes.len() {
                        return Err(ForecastError::ModelError(format!(
                            "Node {} has invalid child {}",
                            index, child
                        )));
                    }
                }
            }
        }

        Ok(())
    }

    /// Walk the tree for one row. A `NaN` at a visited split yields `NaN`.
    ///
    /// Fails when the walk leaves the node array or reads past the row.
    pub fn evaluate(&self, row: &[f64]) -> Result<f64> {
        let mut index = 0;
        loop {
            let node = self.nodes.get(index).ok_or_else(|| {
                ForecastError::ModelError(format!("Tree has no node {}", index))
            })?;
            match *node {
                TreeNode::Leaf { value } => return Ok(value),
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    let x = *row.get(feature).ok_or_else(|| {
                        ForecastError::ModelError(format!(
                            "Split on feature {} but the row has {} values",
                            feature,
                            row.len()
                        ))
                    })?;
                    if x.is_nan() {
                        return Ok(f64::NAN);
                    }
                    index = if x <= threshold { left } else { right };
                }
            }
        }
    }
}

/// Mean of several regression trees
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RandomForestRegressor {
    /// Number of input columns
    pub n_features: usize,
    /// Fitted trees
    pub trees: Vec<RegressionTree>,
    /// Training-time column order
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feature_names: Option<Vec<String>>,
}

impl RandomForestRegressor {
    /// Create a forest over `n_features` inputs
    pub fn new(n_features: usize, trees: Vec<RegressionTree>) -> Self {
        Self {
            n_features,
            trees,
            feature_names: None,
        }
    }

    /// Record the training-time column order
    pub fn with_feature_names(mut self, names: Vec<String>) -> Self {
        self.feature_names = Some(names);
        self
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.trees.is_empty() {
            return Err(ForecastError::ModelError("Forest has no trees".to_string()));
        }
        if let Some(names) = &self.feature_names {
            if names.len() != self.n_features {
                return Err(ForecastError::ModelError(format!(
                    "Forest names {} features but declares {}",
                    names.len(),
                    self.n_features
                )));
            }
        }
        self.trees
            .iter()
            .try_for_each(|tree| tree.validate(self.n_features))
    }
}

impl RegressionModel for RandomForestRegressor {
    fn predict(&self, features: &FeatureMatrix) -> Result<Vec<f64>> {
        self.check_features(features)?;
        self.validate()?;

        let n_trees = self.trees.len() as f64;
        features
            .rows()
            .iter()
            .map(|row| {
                let total = self
                    .trees
                    .iter()
                    .map(|t| t.evaluate(row))
                    .sum::<Result<f64>>()?;
                Ok(total / n_trees)
            })
            .collect()
    }

    fn name(&self) -> &str {
        "Random Forest"
    }

    fn n_features(&self) -> usize {
        self.n_features
    }

    fn feature_names(&self) -> Option<&[String]> {
        self.feature_names.as_deref()
    }
}

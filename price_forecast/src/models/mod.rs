//! Pre-trained regression models
//!
//! Models are trained elsewhere and shipped as JSON artifacts. This module
//! only deserializes and evaluates them.

use crate::error::{ForecastError, Result};
use crate::features::FeatureMatrix;
use log::info;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

pub mod forest;
pub mod linear;

pub use forest::{RandomForestRegressor, RegressionTree, TreeNode};
pub use linear::LinearRegressor;

/// A fitted model mapping feature rows to one scalar each
pub trait RegressionModel: Debug + Send + Sync {
    /// Predict one value per row, preserving row order
    fn predict(&self, features: &FeatureMatrix) -> Result<Vec<f64>>;

    /// Name of the model
    fn name(&self) -> &str;

    /// Number of input columns the model was fitted on
    fn n_features(&self) -> usize;

    /// Column names recorded at training time, if the artifact carries them
    fn feature_names(&self) -> Option<&[String]> {
        None
    }

    /// Reject matrices that do not line up with the training-time columns
    fn check_features(&self, features: &FeatureMatrix) -> Result<()> {
        if features.width() != self.n_features() {
            return Err(ForecastError::FeatureMismatch {
                expected: format!("{} columns", self.n_features()),
                found: format!("{} columns", features.width()),
            });
        }

        if let Some(row) = features.rows().iter().find(|r| r.len() != self.n_features()) {
            return Err(ForecastError::FeatureMismatch {
                expected: format!("{} values per row", self.n_features()),
                found: format!("a row with {} values", row.len()),
            });
        }

        if let Some(names) = self.feature_names() {
            if names != features.columns() {
                return Err(ForecastError::FeatureMismatch {
                    expected: names.join(", "),
                    found: features.columns().join(", "),
                });
            }
        }

        Ok(())
    }
}

/// Serialized form of a fitted model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelArtifact {
    /// Ordinary linear model
    Linear(LinearRegressor),
    /// Averaged ensemble of regression trees
    RandomForest(RandomForestRegressor),
}

impl ModelArtifact {
    /// Validate the artifact and turn it into a usable model
    pub fn into_model(self) -> Result<Box<dyn RegressionModel>> {
        match self {
            ModelArtifact::Linear(model) => {
                model.validate()?;
                Ok(Box::new(model))
            }
            ModelArtifact::RandomForest(model) => {
                model.validate()?;
                Ok(Box::new(model))
            }
        }
    }

    /// Write the artifact as pretty-printed JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }
}

/// Load a model artifact from a JSON file
pub fn load_model<P: AsRef<Path>>(path: P) -> Result<Box<dyn RegressionModel>> {
    let path = path.as_ref();
    let reader = BufReader::new(File::open(path)?);
    let artifact: ModelArtifact = serde_json::from_reader(reader)?;
    let model = artifact.into_model()?;

    info!("Loaded {} from {}", model.name(), path.display());
    Ok(model)
}

//! Linear regression evaluated from stored coefficients

use crate::error::{ForecastError, Result};
use crate::features::FeatureMatrix;
use crate::models::RegressionModel;
use serde::{Deserialize, Serialize};

/// `y = intercept + coefficients · x`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearRegressor {
    /// Constant term
    pub intercept: f64,
    /// One weight per feature
    pub coefficients: Vec<f64>,
    /// Training-time column order
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feature_names: Option<Vec<String>>,
}

impl LinearRegressor {
    /// Create a linear model
    pub fn new(intercept: f64, coefficients: Vec<f64>) -> Self {
        Self {
            intercept,
            coefficients,
            feature_names: None,
        }
    }

    /// Record the training-time column order
    pub fn with_feature_names(mut self, names: Vec<String>) -> Self {
        self.feature_names = Some(names);
        self
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.coefficients.is_empty() {
            return Err(ForecastError::ModelError(
                "Linear model has no coefficients".to_string(),
            ));
        }
        if let Some(names) = &self.feature_names {
            if names.len() != self.coefficients.len() {
                return Err(ForecastError::ModelError(format!(
                    "Linear model names {} features but has {} coefficients",
                    names.len(),
                    self.coefficients.len()
                )));
            }
        }
        Ok(())
    }
}

impl RegressionModel for LinearRegressor {
    fn predict(&self, features: &FeatureMatrix) -> Result<Vec<f64>> {
        self.check_features(features)?;

        Ok(features
            .rows()
            .iter()
            .map(|row| {
                self.intercept
                    + row
                        .iter()
                        .zip(&self.coefficients)
                        .map(|(x, w)| x * w)
                        .sum::<f64>()
            })
            .collect())
    }

    fn name(&self) -> &str {
        "Linear Regression"
    }

    fn n_features(&self) -> usize {
        self.coefficients.len()
    }

    fn feature_names(&self) -> Option<&[String]> {
        self.feature_names.as_deref()
    }
}

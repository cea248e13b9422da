//! Running a model over a projection

use crate::error::{ForecastError, Result};
use crate::models::RegressionModel;
use crate::report::{Prediction, PredictionTable};
use crate::simulation::Projection;
use log::debug;

/// Predict one price per projected business day.
///
/// Column order follows the training-time contract of the model; a model
/// that returns the wrong number of values is reported as a model error.
pub fn predict(model: &dyn RegressionModel, projection: &Projection) -> Result<PredictionTable> {
    let matrix = projection.to_matrix();
    let values = model.predict(&matrix)?;

    if values.len() != projection.len() {
        return Err(ForecastError::ModelError(format!(
            "{} returned {} predictions for {} rows",
            model.name(),
            values.len(),
            projection.len()
        )));
    }

    debug!("{} predicted {} prices", model.name(), values.len());

    let rows = projection
        .rows()
        .iter()
        .zip(values)
        .map(|(row, predicted_stock_price)| Prediction {
            timestamp: row.timestamp,
            predicted_stock_price,
        })
        .collect();

    Ok(PredictionTable::new(rows))
}

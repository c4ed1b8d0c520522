use ndarray::{Array1, Array2};

use crate::error::Result;

/// Contract shared by the regressors of the model bank and the scaled
/// pipelines that wrap them.
pub trait RegressorModel {
    /// Fit on `x` (samples x features) and targets `y`.
    fn fit(&mut self, x: &Array2<f64>, y: &Array1<f64>) -> Result<()>;

    /// Predict one value per row of `x`. Errors if the model is not fitted.
    fn predict(&self, x: &Array2<f64>) -> Result<Array1<f64>>;

    /// Name used in log lines and result records.
    fn name(&self) -> &str;
}

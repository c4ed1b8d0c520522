use ndarray::Array1;
use statrs::statistics::Statistics;

use crate::error::{BaselineError, Result};

fn check_lengths(truth: &Array1<f64>, pred: &Array1<f64>) -> Result<()> {
    if truth.len() != pred.len() {
        return Err(BaselineError::ShapeMismatch(format!(
            "{} targets but {} predictions",
            truth.len(),
            pred.len()
        )));
    }
    if truth.is_empty() {
        return Err(BaselineError::ShapeMismatch("no samples to score".into()));
    }
    Ok(())
}

/// Mean of squared residuals.
pub fn mean_squared_error(truth: &Array1<f64>, pred: &Array1<f64>) -> Result<f64> {
    check_lengths(truth, pred)?;
    let sse: f64 = truth
        .iter()
        .zip(pred.iter())
        .map(|(t, p)| (t - p) * (t - p))
        .sum();
    Ok(sse / truth.len() as f64)
}

/// Pearson correlation coefficient between predictions and truth.
///
/// NaN when either side is constant or there are fewer than two samples.
pub fn pearson(truth: &Array1<f64>, pred: &Array1<f64>) -> Result<f64> {
    check_lengths(truth, pred)?;
    if truth.len() < 2 {
        return Ok(f64::NAN);
    }
    let cov = truth.iter().covariance(pred.iter());
    let sd_t = truth.iter().std_dev();
    let sd_p = pred.iter().std_dev();
    if sd_t == 0.0 || sd_p == 0.0 {
        return Ok(f64::NAN);
    }
    Ok((cov / (sd_t * sd_p)).clamp(-1.0, 1.0))
}

/// Round to a fixed number of decimals; NaN stays NaN.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

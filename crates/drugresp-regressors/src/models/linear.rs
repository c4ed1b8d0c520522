//! Ordinary least squares.
//!
//! The coefficients are the minimum-norm least-squares solution. The normal
//! equations are solved in the smaller of the sample and feature dimensions,
//! so wide designs (more features than samples) stay cheap, and a vanishing
//! ridge term keeps rank-deficient designs solvable.
use ndarray::{Array1, Array2, Axis};

use crate::error::{BaselineError, Result};
use crate::models::regressor_trait::RegressorModel;
use crate::models::utils::{check_fit_input, check_predict_input, not_fitted};

/// Relative size of the ridge term added to the Gram matrix diagonal.
const RIDGE_EPS: f64 = 1e-10;

pub struct LinearRegression {
    coef: Option<Array1<f64>>,
    intercept: f64,
    fit_intercept: bool,
}

impl LinearRegression {
    pub fn new(fit_intercept: bool) -> Self {
        LinearRegression {
            coef: None,
            intercept: 0.0,
            fit_intercept,
        }
    }

    pub fn coef(&self) -> Option<&Array1<f64>> {
        self.coef.as_ref()
    }

    pub fn intercept(&self) -> f64 {
        self.intercept
    }
}

impl Default for LinearRegression {
    fn default() -> Self {
        Self::new(true)
    }
}

/// Solve `a * x = b` for a symmetric positive definite `a` via Cholesky.
fn cholesky_solve(a: &Array2<f64>, b: &Array1<f64>) -> Option<Array1<f64>> {
    let n = a.nrows();
    let mut l = Array2::<f64>::zeros((n, n));
    for i in 0..n {
        for j in 0..=i {
            let mut sum = a[(i, j)];
            for k in 0..j {
                sum -= l[(i, k)] * l[(j, k)];
            }
            if i == j {
                if sum <= 0.0 || !sum.is_finite() {
                    return None;
                }
                l[(i, i)] = sum.sqrt();
            } else {
                l[(i, j)] = sum / l[(j, j)];
            }
        }
    }

    // forward: L z = b
    let mut z = Array1::<f64>::zeros(n);
    for i in 0..n {
        let mut sum = b[i];
        for k in 0..i {
            sum -= l[(i, k)] * z[k];
        }
        z[i] = sum / l[(i, i)];
    }
    // backward: L^T x = z
    let mut x = Array1::<f64>::zeros(n);
    for i in (0..n).rev() {
        let mut sum = z[i];
        for k in (i + 1)..n {
            sum -= l[(k, i)] * x[k];
        }
        x[i] = sum / l[(i, i)];
    }
    Some(x)
}

/// Add `RIDGE_EPS * mean(diag)` to the diagonal of a Gram matrix.
fn regularize(mut gram: Array2<f64>) -> Array2<f64> {
    let n = gram.nrows();
    let mean_diag = gram.diag().sum() / n as f64;
    let ridge = RIDGE_EPS * mean_diag.max(1.0);
    gram.diag_mut().iter_mut().for_each(|d| *d += ridge);
    gram
}

impl RegressorModel for LinearRegression {
    fn fit(&mut self, x: &Array2<f64>, y: &Array1<f64>) -> Result<()> {
        check_fit_input(self.name(), x, y)?;
        let (n, p) = x.dim();

        let (x_mean, y_mean) = if self.fit_intercept {
            let xm = x
                .mean_axis(Axis(0))
                .ok_or_else(|| BaselineError::fit(self.name(), "empty training matrix"))?;
            (xm, y.sum() / n as f64)
        } else {
            (Array1::zeros(p), 0.0)
        };
        let xc = x - &x_mean;
        let yc = y - y_mean;

        let coef = if n < p {
            // beta = Xc^T (Xc Xc^T)^-1 yc
            let gram = regularize(xc.dot(&xc.t()));
            let alpha = cholesky_solve(&gram, &yc)
                .ok_or_else(|| BaselineError::fit(self.name(), "singular design matrix"))?;
            xc.t().dot(&alpha)
        } else {
            // beta = (Xc^T Xc)^-1 Xc^T yc
            let gram = regularize(xc.t().dot(&xc));
            cholesky_solve(&gram, &xc.t().dot(&yc))
                .ok_or_else(|| BaselineError::fit(self.name(), "singular design matrix"))?
        };

        self.intercept = y_mean - x_mean.dot(&coef);
        self.coef = Some(coef);
        Ok(())
    }

    fn predict(&self, x: &Array2<f64>) -> Result<Array1<f64>> {
        let coef = self.coef.as_ref().ok_or_else(|| not_fitted(self.name()))?;
        check_predict_input(self.name(), coef.len(), x)?;
        Ok(x.dot(coef) + self.intercept)
    }

    fn name(&self) -> &str {
        "linearregression"
    }
}

use linfa::traits::{Fit, Predict};
use linfa::Dataset;
use linfa_svm::Svm;
use ndarray::{Array1, Array2};

use crate::config::Gamma;
use crate::error::{BaselineError, Result};
use crate::models::regressor_trait::RegressorModel;
use crate::models::utils::{check_fit_input, check_predict_input, not_fitted};

/// Epsilon-SVR with a gaussian (RBF) kernel, backed by `linfa-svm`.
pub struct SVRegressor {
    model: Option<Svm<f64, f64>>,
    n_features: usize,
    c: f64,
    epsilon: f64,
    gamma: Gamma,
}

impl SVRegressor {
    pub fn new(c: f64, epsilon: f64, gamma: Gamma) -> Self {
        SVRegressor {
            model: None,
            n_features: 0,
            c,
            epsilon,
            gamma,
        }
    }
}

/// Resolve `gamma`; `Scale` is `1 / (n_features * Var(X))`, or 1.0 when X
/// has no variance.
pub fn resolve_gamma(gamma: Gamma, x: &Array2<f64>) -> f64 {
    match gamma {
        Gamma::Value(g) => g,
        Gamma::Scale => {
            let n = x.len() as f64;
            let mean = x.sum() / n;
            let var = x.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / n;
            if var > 0.0 {
                1.0 / (x.ncols() as f64 * var)
            } else {
                1.0
            }
        }
    }
}

impl RegressorModel for SVRegressor {
    fn fit(&mut self, x: &Array2<f64>, y: &Array1<f64>) -> Result<()> {
        check_fit_input(self.name(), x, y)?;

        // linfa's gaussian kernel is exp(-|a - b|^2 / eps), so eps = 1 / gamma.
        let gamma = resolve_gamma(self.gamma, x);
        let kernel_eps = 1.0 / gamma;
        log::trace!("SVR gamma = {:.6}, C = {}, epsilon = {}", gamma, self.c, self.epsilon);

        let dataset = Dataset::new(x.to_owned(), y.to_owned());
        let model = Svm::<f64, f64>::params()
            .c_svr(self.c, Some(self.epsilon))
            .gaussian_kernel(kernel_eps)
            .fit(&dataset)
            .map_err(|e| BaselineError::fit(self.name(), e.to_string()))?;

        self.n_features = x.ncols();
        self.model = Some(model);
        Ok(())
    }

    fn predict(&self, x: &Array2<f64>) -> Result<Array1<f64>> {
        let model = self.model.as_ref().ok_or_else(|| not_fitted(self.name()))?;
        check_predict_input(self.name(), self.n_features, x)?;
        let pred: Array1<f64> = model.predict(x);
        Ok(pred)
    }

    fn name(&self) -> &str {
        "svr"
    }
}

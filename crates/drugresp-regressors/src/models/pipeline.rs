use ndarray::{Array1, Array2};

use crate::error::Result;
use crate::models::regressor_trait::RegressorModel;
use crate::preprocessing::StandardScaler;

/// A regressor preceded by optional feature standardization.
///
/// The scaler is fit on the training matrix only and reused unchanged for
/// every later prediction.
pub struct ScaledPipeline {
    name: String,
    scale_features: bool,
    scaler: Option<StandardScaler>,
    regressor: Box<dyn RegressorModel>,
}

impl ScaledPipeline {
    pub fn new(name: &str, scale_features: bool, regressor: Box<dyn RegressorModel>) -> Self {
        Self {
            name: name.to_string(),
            scale_features,
            scaler: None,
            regressor,
        }
    }

    pub fn regressor(&self) -> &dyn RegressorModel {
        self.regressor.as_ref()
    }
}

impl RegressorModel for ScaledPipeline {
    fn fit(&mut self, x: &Array2<f64>, y: &Array1<f64>) -> Result<()> {
        if self.scale_features {
            let (scaler, x_scaled) = StandardScaler::fit_transform(x)?;
            self.scaler = Some(scaler);
            self.regressor.fit(&x_scaled, y)
        } else {
            self.regressor.fit(x, y)
        }
    }

    fn predict(&self, x: &Array2<f64>) -> Result<Array1<f64>> {
        match &self.scaler {
            Some(scaler) => self.regressor.predict(&scaler.transform(x)?),
            None => self.regressor.predict(x),
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::linear::LinearRegression;
    use ndarray::Array;

    fn pipeline(scale_features: bool) -> ScaledPipeline {
        ScaledPipeline::new(
            "Scaled_LinearRegression",
            scale_features,
            Box::new(LinearRegression::new(true)),
        )
    }

    #[test]
    fn pipeline_reports_its_own_name() {
        let p = pipeline(true);
        assert_eq!(p.name(), "Scaled_LinearRegression");
        assert_eq!(p.regressor().name(), "linearregression");
    }

    #[test]
    fn scaling_does_not_change_ols_predictions() {
        let x = Array::from_shape_fn((12, 2), |(i, j)| match j {
            0 => i as f64,
            _ => ((i * i) % 7) as f64 + 100.0,
        });
        let y = x.column(0).mapv(|v| 0.5 * v) + 4.0;

        let mut scaled = pipeline(true);
        let mut raw = pipeline(false);
        scaled.fit(&x, &y).unwrap();
        raw.fit(&x, &y).unwrap();

        let a = scaled.predict(&x).unwrap();
        let b = raw.predict(&x).unwrap();
        for (p, q) in a.iter().zip(b.iter()) {
            assert!((p - q).abs() < 1e-6, "{} vs {}", p, q);
        }
    }
}

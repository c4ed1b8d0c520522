//! Feature standardization shared by every pipeline of the model bank.
//!
//! `StandardScaler` learns per-column mean and population standard deviation
//! on the training matrix and applies the same affine map to any later
//! matrix. Columns without variance are only centered.

use ndarray::{Array1, Array2, Axis};

use crate::error::{BaselineError, Result};

/// Per-column mean/std standardizer.
#[derive(Clone, Debug)]
pub struct StandardScaler {
    pub mean: Array1<f64>,
    pub scale: Array1<f64>,
}

impl StandardScaler {
    /// Columns whose std falls below this are treated as constant.
    const MIN_STD: f64 = 1e-12;

    /// Fit on a matrix where rows are samples and columns are features.
    pub fn fit(x: &Array2<f64>) -> Result<Self> {
        let (nrows, ncols) = x.dim();
        if nrows == 0 || ncols == 0 {
            return Err(BaselineError::ShapeMismatch(format!(
                "cannot fit a scaler on a {} x {} matrix",
                nrows, ncols
            )));
        }

        let mean = x
            .mean_axis(Axis(0))
            .ok_or_else(|| BaselineError::ShapeMismatch("empty matrix".into()))?;
        let scale = x
            .std_axis(Axis(0), 0.0)
            .mapv(|s| if s < Self::MIN_STD { 1.0 } else { s });

        Ok(Self { mean, scale })
    }

    pub fn transform(&self, x: &Array2<f64>) -> Result<Array2<f64>> {
        if x.ncols() != self.mean.len() {
            return Err(BaselineError::ShapeMismatch(format!(
                "scaler was fit on {} features, got {}",
                self.mean.len(),
                x.ncols()
            )));
        }
        Ok((x - &self.mean) / &self.scale)
    }

    pub fn fit_transform(x: &Array2<f64>) -> Result<(Self, Array2<f64>)> {
        let sc = Self::fit(x)?;
        let out = sc.transform(x)?;
        Ok((sc, out))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn standardizes_columns() {
        let x = array![[1.0, 10.0], [2.0, 20.0], [3.0, 30.0], [4.0, 40.0]];
        let (sc, t) = StandardScaler::fit_transform(&x).unwrap();
        assert!((sc.mean[0] - 2.5).abs() < 1e-12);
        assert!((sc.mean[1] - 25.0).abs() < 1e-12);
        for col in t.axis_iter(Axis(1)) {
            let m = col.sum() / 4.0;
            let v = col.mapv(|v| (v - m) * (v - m)).sum() / 4.0;
            assert!(m.abs() < 1e-12);
            assert!((v - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn constant_column_is_only_centered() {
        let x = array![[5.0, 1.0], [5.0, 2.0]];
        let sc = StandardScaler::fit(&x).unwrap();
        assert_eq!(sc.scale[0], 1.0);
        let t = sc.transform(&array![[7.0, 1.5]]).unwrap();
        assert_eq!(t[(0, 0)], 2.0);
    }

    #[test]
    fn transform_checks_width() {
        let sc = StandardScaler::fit(&array![[1.0, 2.0], [3.0, 4.0]]).unwrap();
        assert!(sc.transform(&array![[1.0]]).is_err());
    }
}

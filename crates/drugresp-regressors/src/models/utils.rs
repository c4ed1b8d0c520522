//! Conversions between ndarray matrices and the `gbdt` crate's data vectors,
//! plus the regression-tree builder shared by the tree ensembles.
use gbdt::config::Loss;
use gbdt::decision_tree::{Data, DataVec, DecisionTree, TrainingCache};
use ndarray::{Array1, Array2};

use crate::error::{BaselineError, Result};

/// Cache level passed to `TrainingCache::get_cache`.
pub const TRAINING_OPTIMIZATION_LEVEL: u8 = 2;

/// Rows of `x` as `f32` feature vectors.
pub fn to_rows(x: &Array2<f64>) -> Vec<Vec<f32>> {
    x.outer_iter()
        .map(|row| row.iter().map(|&v| v as f32).collect())
        .collect()
}

pub fn to_training_data(x: &Array2<f64>, y: &Array1<f64>) -> DataVec {
    x.outer_iter()
        .zip(y.iter())
        .map(|(row, &target)| {
            let features = row.iter().map(|&v| v as f32).collect();
            Data::new_training_data(features, 1.0, target as f32, None)
        })
        .collect()
}

/// Test rows carry a dummy label; only the features are read at predict time.
pub fn to_test_data(x: &Array2<f64>) -> DataVec {
    to_rows(x)
        .into_iter()
        .map(|features| Data::new_training_data(features, 1.0, 0.0, None))
        .collect()
}

pub fn to_prediction(pred: Vec<f32>) -> Array1<f64> {
    pred.into_iter().map(f64::from).collect()
}

/// Fit one squared-error regression tree on `data`.
pub fn fit_regression_tree(
    data: &DataVec,
    feature_size: usize,
    max_depth: u32,
    min_samples_leaf: usize,
) -> DecisionTree {
    let mut tree = DecisionTree::new();
    tree.set_feature_size(feature_size);
    tree.set_max_depth(max_depth);
    tree.set_min_leaf_size(min_samples_leaf);
    tree.set_loss(Loss::SquaredError);

    let mut cache = TrainingCache::get_cache(feature_size, data, TRAINING_OPTIMIZATION_LEVEL);
    tree.fit(data, &mut cache);
    tree
}

pub fn check_fit_input(model: &str, x: &Array2<f64>, y: &Array1<f64>) -> Result<()> {
    if x.nrows() == 0 || x.ncols() == 0 {
        return Err(BaselineError::fit(model, "empty training matrix"));
    }
    if x.nrows() != y.len() {
        return Err(BaselineError::ShapeMismatch(format!(
            "{}: {} rows but {} targets",
            model,
            x.nrows(),
            y.len()
        )));
    }
    Ok(())
}

pub fn check_predict_input(model: &str, expected: usize, x: &Array2<f64>) -> Result<()> {
    if x.ncols() != expected {
        return Err(BaselineError::ShapeMismatch(format!(
            "{} was fit on {} features, got {}",
            model,
            expected,
            x.ncols()
        )));
    }
    Ok(())
}

pub fn not_fitted(model: &str) -> BaselineError {
    BaselineError::fit(model, "model has not been fitted")
}

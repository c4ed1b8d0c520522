use gbdt::decision_tree::{Data, DataVec, DecisionTree};
use ndarray::{Array1, Array2};
use rand::distributions::{Distribution, WeightedIndex};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::error::{BaselineError, Result};
use crate::models::regressor_trait::RegressorModel;
use crate::models::utils::{
    check_fit_input, check_predict_input, fit_regression_tree, not_fitted, to_rows, to_test_data,
};

/// AdaBoost.R2 regressor (Drucker, 1997) with linear loss over shallow
/// regression trees.
///
/// Each round fits a tree on a bootstrap sample drawn with the current sample
/// weights, then re-weights the samples by how badly the tree predicted them.
/// Predictions are the weighted median of the trees' outputs.
pub struct AdaBoostRegressor {
    estimators: Vec<DecisionTree>,
    estimator_weights: Vec<f64>,
    n_features: usize,
    n_estimators: usize,
    learning_rate: f64,
    max_depth: u32,
    seed: u64,
}

impl AdaBoostRegressor {
    pub fn new(n_estimators: usize, learning_rate: f64, max_depth: u32, seed: u64) -> Self {
        AdaBoostRegressor {
            estimators: Vec::new(),
            estimator_weights: Vec::new(),
            n_features: 0,
            n_estimators,
            learning_rate,
            max_depth,
            seed,
        }
    }

    pub fn estimator_weights(&self) -> &[f64] {
        &self.estimator_weights
    }
}

/// Weighted median of one sample's predictions across estimators.
fn weighted_median(values: &[f64], weights: &[f64]) -> f64 {
    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by(|&a, &b| values[a].total_cmp(&values[b]));

    let total: f64 = weights.iter().sum();
    let mut cum = 0.0;
    for &i in &order {
        cum += weights[i];
        if cum >= 0.5 * total {
            return values[i];
        }
    }
    values[order[order.len() - 1]]
}

impl RegressorModel for AdaBoostRegressor {
    fn fit(&mut self, x: &Array2<f64>, y: &Array1<f64>) -> Result<()> {
        check_fit_input(self.name(), x, y)?;
        let n = x.nrows();
        let feature_size = x.ncols();
        let rows = to_rows(x);
        let full = to_test_data(x);
        let lr = self.learning_rate;

        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut sample_weight = vec![1.0 / n as f64; n];
        self.estimators.clear();
        self.estimator_weights.clear();

        for iboost in 0..self.n_estimators {
            let dist = WeightedIndex::new(&sample_weight)
                .map_err(|e| BaselineError::fit(self.name(), format!("invalid sample weights: {}", e)))?;
            let sample: DataVec = (0..n)
                .map(|_| {
                    let idx = dist.sample(&mut rng);
                    Data::new_training_data(rows[idx].clone(), 1.0, y[idx] as f32, None)
                })
                .collect();
            let tree = fit_regression_tree(&sample, feature_size, self.max_depth, 1);

            let pred = tree.predict(&full);
            let mut loss: Vec<f64> = pred
                .iter()
                .zip(y.iter())
                .map(|(&p, &t)| (f64::from(p) - t).abs())
                .collect();
            let max_err = loss
                .iter()
                .zip(&sample_weight)
                .filter(|(_, w)| **w > 0.0)
                .map(|(&e, _)| e)
                .fold(0.0, f64::max);
            if max_err > 0.0 {
                loss.iter_mut().for_each(|e| *e /= max_err);
            }

            let estimator_error: f64 = loss.iter().zip(&sample_weight).map(|(e, w)| e * w).sum();

            if estimator_error <= 0.0 {
                // Perfect fit on the training set.
                self.estimators.push(tree);
                self.estimator_weights.push(1.0);
                log::trace!("AdaBoost stopped at round {}: zero error", iboost);
                break;
            }
            if estimator_error >= 0.5 {
                if self.estimators.is_empty() {
                    self.estimators.push(tree);
                    self.estimator_weights.push(1.0);
                }
                log::trace!(
                    "AdaBoost stopped at round {}: error {:.4} >= 0.5",
                    iboost,
                    estimator_error
                );
                break;
            }

            let beta = estimator_error / (1.0 - estimator_error);
            self.estimators.push(tree);
            self.estimator_weights.push(lr * (1.0 / beta).ln());

            if iboost + 1 < self.n_estimators {
                for (w, e) in sample_weight.iter_mut().zip(&loss) {
                    *w *= beta.powf((1.0 - e) * lr);
                }
                let total: f64 = sample_weight.iter().sum();
                if !(total > 0.0) {
                    break;
                }
                sample_weight.iter_mut().for_each(|w| *w /= total);
            }
        }

        self.n_features = feature_size;
        Ok(())
    }

    fn predict(&self, x: &Array2<f64>) -> Result<Array1<f64>> {
        if self.estimators.is_empty() {
            return Err(not_fitted(self.name()));
        }
        check_predict_input(self.name(), self.n_features, x)?;
        let test_x = to_test_data(x);

        let per_estimator: Vec<Vec<f32>> = self.estimators.iter().map(|t| t.predict(&test_x)).collect();

        let out = (0..x.nrows())
            .map(|i| {
                let values: Vec<f64> = per_estimator.iter().map(|p| f64::from(p[i])).collect();
                weighted_median(&values, &self.estimator_weights)
            })
            .collect();
        Ok(out)
    }

    fn name(&self) -> &str {
        "adaboost"
    }
}

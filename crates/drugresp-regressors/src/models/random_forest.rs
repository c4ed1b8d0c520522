use gbdt::decision_tree::{Data, DataVec, DecisionTree};
use ndarray::{Array1, Array2};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use rayon::ThreadPool;

use crate::error::{BaselineError, Result};
use crate::models::regressor_trait::RegressorModel;
use crate::models::utils::{
    check_fit_input, check_predict_input, fit_regression_tree, not_fitted, to_rows, to_test_data,
};

/// Bagged regression trees, built in parallel on a dedicated rayon pool.
///
/// Tree `i` draws its bootstrap sample from an RNG seeded with `seed + i`,
/// so the fitted forest does not depend on thread scheduling.
pub struct RandomForestRegressor {
    trees: Vec<DecisionTree>,
    n_features: usize,
    n_estimators: usize,
    max_depth: u32,
    min_samples_leaf: usize,
    n_jobs: usize,
    seed: u64,
}

impl RandomForestRegressor {
    pub fn new(n_estimators: usize, max_depth: u32, min_samples_leaf: usize, n_jobs: usize, seed: u64) -> Self {
        RandomForestRegressor {
            trees: Vec::new(),
            n_features: 0,
            n_estimators,
            max_depth,
            min_samples_leaf,
            n_jobs,
            seed,
        }
    }

    fn pool(&self) -> Result<ThreadPool> {
        rayon::ThreadPoolBuilder::new()
            .num_threads(self.n_jobs)
            .build()
            .map_err(|e| BaselineError::fit(self.name(), format!("cannot start worker pool: {}", e)))
    }

    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }
}

impl RegressorModel for RandomForestRegressor {
    fn fit(&mut self, x: &Array2<f64>, y: &Array1<f64>) -> Result<()> {
        check_fit_input(self.name(), x, y)?;
        let n = x.nrows();
        let feature_size = x.ncols();
        let rows = to_rows(x);
        let targets: Vec<f32> = y.iter().map(|&v| v as f32).collect();
        let (n_estimators, max_depth, min_leaf, seed) =
            (self.n_estimators, self.max_depth, self.min_samples_leaf, self.seed);

        log::debug!(
            "Fitting {} trees on {} worker(s)",
            self.n_estimators,
            self.n_jobs
        );

        let trees: Vec<DecisionTree> = self.pool()?.install(|| {
            (0..n_estimators)
                .into_par_iter()
                .map(|i| {
                    let mut rng = StdRng::seed_from_u64(seed.wrapping_add(i as u64));
                    let sample: DataVec = (0..n)
                        .map(|_| {
                            let idx = rng.gen_range(0..n);
                            Data::new_training_data(rows[idx].clone(), 1.0, targets[idx], None)
                        })
                        .collect();
                    fit_regression_tree(&sample, feature_size, max_depth, min_leaf)
                })
                .collect()
        });

        self.n_features = feature_size;
        self.trees = trees;
        Ok(())
    }

    fn predict(&self, x: &Array2<f64>) -> Result<Array1<f64>> {
        if self.trees.is_empty() {
            return Err(not_fitted(self.name()));
        }
        check_predict_input(self.name(), self.n_features, x)?;
        let test_x = to_test_data(x);

        // Collect per-tree predictions in tree order so the sum is reproducible.
        let per_tree: Vec<Vec<f32>> = self
            .pool()?
            .install(|| self.trees.par_iter().map(|tree| tree.predict(&test_x)).collect());

        let mut sums = vec![0f64; x.nrows()];
        for pred in per_tree {
            for (acc, p) in sums.iter_mut().zip(pred) {
                *acc += f64::from(p);
            }
        }

        let n_trees = self.trees.len() as f64;
        Ok(sums.into_iter().map(|s| s / n_trees).collect())
    }

    fn name(&self) -> &str {
        "randomforest"
    }
}

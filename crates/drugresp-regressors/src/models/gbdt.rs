use gbdt::config::Config;
use gbdt::gradient_boost::GBDT;
use ndarray::{Array1, Array2};

use crate::error::Result;
use crate::models::regressor_trait::RegressorModel;
use crate::models::utils::{
    check_fit_input, check_predict_input, not_fitted, to_prediction, to_test_data, to_training_data,
    TRAINING_OPTIMIZATION_LEVEL,
};

/// Gradient Boosting Decision Tree (GBDT) regressor with squared-error loss
pub struct GradientBoostRegressor {
    model: Option<GBDT>,
    n_features: usize,
    n_estimators: usize,
    learning_rate: f32,
    max_depth: u32,
    min_samples_leaf: usize,
}

impl GradientBoostRegressor {
    pub fn new(n_estimators: usize, learning_rate: f32, max_depth: u32, min_samples_leaf: usize) -> Self {
        GradientBoostRegressor {
            model: None,
            n_features: 0,
            n_estimators,
            learning_rate,
            max_depth,
            min_samples_leaf,
        }
    }
}

impl Default for GradientBoostRegressor {
    fn default() -> Self {
        Self::new(100, 0.1, 3, 1)
    }
}

impl RegressorModel for GradientBoostRegressor {
    fn fit(&mut self, x: &Array2<f64>, y: &Array1<f64>) -> Result<()> {
        check_fit_input(self.name(), x, y)?;
        let feature_size = x.ncols();

        let mut config = Config::new();
        config.set_feature_size(feature_size);
        config.set_shrinkage(self.learning_rate);
        config.set_max_depth(self.max_depth);
        config.set_iterations(self.n_estimators);
        config.set_min_leaf_size(self.min_samples_leaf);
        config.set_debug(false);
        config.set_training_optimization_level(TRAINING_OPTIMIZATION_LEVEL);
        config.set_loss("SquaredError");

        let mut gbdt = GBDT::new(&config);
        let mut train_x = to_training_data(x, y);
        gbdt.fit(&mut train_x);

        log::trace!(
            "GBDT fit: {} rounds on {} x {}",
            self.n_estimators,
            x.nrows(),
            feature_size
        );

        self.n_features = feature_size;
        self.model = Some(gbdt);
        Ok(())
    }

    fn predict(&self, x: &Array2<f64>) -> Result<Array1<f64>> {
        let model = self.model.as_ref().ok_or_else(|| not_fitted(self.name()))?;
        check_predict_input(self.name(), self.n_features, x)?;
        let test_x = to_test_data(x);
        Ok(to_prediction(model.predict(&test_x)))
    }

    fn name(&self) -> &str {
        "gradientboost"
    }
}

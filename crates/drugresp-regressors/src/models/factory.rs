use std::str::FromStr;

use crate::config::{ModelConfig, ModelType};
use crate::error::{BaselineError, Result};
use crate::models::adaboost::AdaBoostRegressor;
use crate::models::gbdt::GradientBoostRegressor;
use crate::models::linear::LinearRegression;
use crate::models::pipeline::ScaledPipeline;
use crate::models::random_forest::RandomForestRegressor;
use crate::models::regressor_trait::RegressorModel;
use crate::models::svr::SVRegressor;

/// Build the bare regressor described by `model_type`.
pub fn build_regressor(model_type: &ModelType, seed: u64) -> Result<Box<dyn RegressorModel>> {
    model_type.validate()?;
    let model: Box<dyn RegressorModel> = match model_type {
        ModelType::GradientBoost {
            n_estimators,
            learning_rate,
            max_depth,
            min_samples_leaf,
        } => Box::new(GradientBoostRegressor::new(
            *n_estimators,
            *learning_rate,
            *max_depth,
            *min_samples_leaf,
        )),
        ModelType::RandomForest {
            n_estimators,
            max_depth,
            min_samples_leaf,
            n_jobs,
        } => Box::new(RandomForestRegressor::new(
            *n_estimators,
            *max_depth,
            *min_samples_leaf,
            *n_jobs,
            seed,
        )),
        ModelType::AdaBoost {
            n_estimators,
            learning_rate,
            max_depth,
        } => Box::new(AdaBoostRegressor::new(*n_estimators, *learning_rate, *max_depth, seed)),
        ModelType::SVR { c, epsilon, gamma } => Box::new(SVRegressor::new(*c, *epsilon, *gamma)),
        ModelType::LinearRegression { fit_intercept } => Box::new(LinearRegression::new(*fit_intercept)),
    };
    Ok(model)
}

/// Build a named pipeline (scaler + regressor) from a `ModelConfig`.
pub fn build_model(config: &ModelConfig, seed: u64) -> Result<Box<dyn RegressorModel>> {
    let regressor = build_regressor(&config.model_type, seed)?;
    Ok(Box::new(ScaledPipeline::new(
        &config.name,
        config.scale_features,
        regressor,
    )))
}

/// The five scaled pipelines of the baseline benchmark, in evaluation order.
pub fn model_bank() -> Vec<ModelConfig> {
    ModelType::defaults()
        .into_iter()
        .map(ModelConfig::scaled)
        .collect()
}

/// True when `wanted` is the pipeline's name or one of its kind's aliases.
fn is_named(config: &ModelConfig, wanted: &str) -> bool {
    config.name.eq_ignore_ascii_case(wanted)
        || ModelType::from_str(wanted)
            .map_or(false, |mt| mt.kind() == config.model_type.kind())
}

/// Keep the bank entries named in `names`, preserving bank order.
///
/// Names match either the pipeline name (`Scaled_SVR`) or the model kind
/// and its aliases (`svr`, `svm`), case-insensitively.
pub fn select_models(bank: Vec<ModelConfig>, names: &[String]) -> Result<Vec<ModelConfig>> {
    if names.is_empty() {
        return Ok(bank);
    }
    if let Some(unknown) = names.iter().find(|n| !bank.iter().any(|m| is_named(m, n))) {
        return Err(BaselineError::Config(format!("unknown model '{}'", unknown)));
    }
    Ok(bank
        .into_iter()
        .filter(|m| names.iter().any(|n| is_named(m, n)))
        .collect())
}

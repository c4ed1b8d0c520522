//! The evaluation loop: fit every pipeline of the bank on the train split,
//! score it on the eval split and collect one result record per pipeline.
use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::config::ModelConfig;
use crate::data_handling::{check_compatible, DatasetSplit};
use crate::error::{BaselineError, Result};
use crate::models::factory::build_model;
use crate::models::regressor_trait::RegressorModel;
use crate::stats::{mean_squared_error, pearson, round_to};

/// Decimals kept for MSE and Pearson in result records.
pub const METRIC_DECIMALS: i32 = 5;

/// Scores of one fitted pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelResult {
    pub name: String,
    pub mse: f64,
    pub pearson: f64,
    /// Fit wall time in seconds.
    pub time: f64,
}

/// Fit `model` on `train`, time the fit and score it on `eval`.
pub fn evaluate_model(
    model: &mut dyn RegressorModel,
    train: &DatasetSplit,
    eval: &DatasetSplit,
) -> Result<ModelResult> {
    let name = model.name().to_string();
    // Shape errors are kept as-is, everything else is attributed to the model.
    let attribute = |e: BaselineError| match e {
        BaselineError::ShapeMismatch(_) | BaselineError::Fit { .. } => e,
        other => BaselineError::fit(&name, other.to_string()),
    };

    let start = Instant::now();
    model.fit(&train.x, &train.y).map_err(attribute)?;
    let time = start.elapsed().as_secs_f64();

    let pred = model.predict(&eval.x).map_err(attribute)?;
    if pred.iter().any(|p| !p.is_finite()) {
        return Err(BaselineError::fit(&name, "non-finite predictions"));
    }

    Ok(ModelResult {
        mse: round_to(mean_squared_error(&eval.y, &pred)?, METRIC_DECIMALS),
        pearson: round_to(pearson(&eval.y, &pred)?, METRIC_DECIMALS),
        time,
        name,
    })
}

/// Evaluate every pipeline of `bank` in order. The first failure aborts the
/// loop and no result is returned.
pub fn evaluate_bank(
    bank: &[ModelConfig],
    seed: u64,
    train: &DatasetSplit,
    eval: &DatasetSplit,
) -> Result<Vec<ModelResult>> {
    check_compatible(train, eval)?;
    log::info!(
        "Evaluating {} model(s): {} train / {} eval samples, {} features",
        bank.len(),
        train.n_samples(),
        eval.n_samples(),
        train.n_features()
    );

    let mut results = Vec::with_capacity(bank.len());
    for config in bank {
        log::debug!("Fitting {} ({})", config.name, config.model_type.kind());
        let mut model = build_model(config, seed)?;
        let result = evaluate_model(model.as_mut(), train, eval)?;
        log::info!(
            "{:<24} MSE: {:<10} Pearson: {:<10} Time: {:.3}s",
            result.name,
            result.mse,
            result.pearson,
            result.time
        );
        results.push(result);
    }
    Ok(results)
}

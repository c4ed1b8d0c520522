use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Local;

use drugresp_regressors::data_handling::load_split;
use drugresp_regressors::evaluation::evaluate_bank;

use crate::baseline::input::BaselineConfig;
use crate::baseline::output::write_results;
use crate::util::{validate_output_dir, validate_split_dir};

/// Load both splits, evaluate the configured bank and write the results
/// table. Returns the path of the written CSV.
pub fn run_baseline(config: &BaselineConfig) -> Result<PathBuf> {
    // Fail on a bad output directory before spending time on fitting.
    let output_dir = validate_output_dir(&config.model_path)?;
    let train_dir = validate_split_dir(&config.train_data)?;
    let eval_dir = validate_split_dir(&config.eval_data)?;

    log::info!("[training_baseline] Train split: {}", train_dir.display());
    let train = load_split(train_dir, &config.feature_groups)
        .with_context(|| format!("Failed to load train split from {}", config.train_data))?;

    log::info!("[training_baseline] Eval split: {}", eval_dir.display());
    let eval = load_split(eval_dir, &config.feature_groups)
        .with_context(|| format!("Failed to load eval split from {}", config.eval_data))?;

    let results = evaluate_bank(&config.models, config.seed, &train, &eval)
        .context("Model evaluation failed")?;

    let path = write_results(&output_dir, &results, &Local::now())
        .context("Failed to write results table")?;
    Ok(path)
}

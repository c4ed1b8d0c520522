use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::ArgMatches;
use serde::{Deserialize, Serialize};

use drugresp_regressors::config::{FeatureGroups, ModelConfig};
use drugresp_regressors::error::BaselineError;
use drugresp_regressors::models::factory::{model_bank, select_models};

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct BaselineConfig {
    pub train_data: String,
    pub eval_data: String,
    pub model_path: String,
    pub seed: u64,
    pub feature_groups: FeatureGroups,
    pub models: Vec<ModelConfig>,
}

impl Default for BaselineConfig {
    fn default() -> Self {
        BaselineConfig {
            train_data: String::new(),
            eval_data: String::new(),
            model_path: String::new(),
            seed: 42,
            feature_groups: FeatureGroups::default(),
            models: model_bank(),
        }
    }
}

impl BaselineConfig {
    /// Load a configuration from a JSON file.
    pub fn from_file(config_path: &PathBuf) -> Result<Self> {
        let config_json = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config file: {:?}", config_path))?;
        let config: BaselineConfig = serde_json::from_str(&config_json)
            .with_context(|| format!("Failed to parse config file: {:?}", config_path))?;
        Ok(config)
    }

    /// Build the effective configuration: the JSON file given with
    /// `--config` (or the defaults), then the command line overrides.
    pub fn from_arguments(matches: &ArgMatches) -> Result<Self> {
        let mut config = match matches.get_one::<PathBuf>("config") {
            Some(config_path) => {
                log::debug!("Loading configuration from {:?}", config_path);
                BaselineConfig::from_file(config_path)?
            }
            None => BaselineConfig::default(),
        };

        // Apply CLI overrides
        if let Some(train_data) = matches.get_one::<String>("train_filepath") {
            config.train_data = train_data.clone();
        }
        if let Some(eval_data) = matches.get_one::<String>("eval_filepath") {
            config.eval_data = eval_data.clone();
        }
        if let Some(model_path) = matches.get_one::<String>("model_path") {
            config.model_path = model_path.clone();
        }
        if let Some(seed) = matches.get_one::<u64>("seed") {
            config.seed = *seed;
        }
        if let Some(names) = matches.get_many::<String>("models") {
            let names: Vec<String> = names.cloned().collect();
            config.models = select_models(config.models, &names)?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Reject configurations that cannot be run, before any data is read.
    pub fn validate(&self) -> Result<(), BaselineError> {
        for (field, value) in [
            ("train_data", &self.train_data),
            ("eval_data", &self.eval_data),
            ("model_path", &self.model_path),
        ] {
            if value.trim().is_empty() {
                return Err(BaselineError::Config(format!("{} is not set", field)));
            }
        }
        if self.models.is_empty() {
            return Err(BaselineError::Config("no models to evaluate".into()));
        }
        for model in &self.models {
            model.model_type.validate()?;
        }
        Ok(())
    }
}

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::{BaselineError, Result};

/// File-name markers of the three feature groups of a dataset split.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct FeatureGroups {
    pub target: String,
    pub genes: String,
    pub fingerprints: String,
}

impl Default for FeatureGroups {
    fn default() -> Self {
        Self {
            target: "ic50".to_string(),
            genes: "selected_genes_20".to_string(),
            fingerprints: "fingerprints_512".to_string(),
        }
    }
}

/// One entry of the model bank: a named, optionally scaled regressor.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct ModelConfig {
    pub name: String,

    #[serde(default = "default_scale_features")]
    pub scale_features: bool,

    #[serde(flatten)]
    pub model_type: ModelType,
}

fn default_scale_features() -> bool {
    true
}

/// RBF kernel coefficient for the SVR.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Gamma {
    /// `1 / (n_features * Var(X))`, computed on the scaled training matrix.
    Scale,
    Value(f64),
}

/// Supported regressors and their hyper-parameters.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub enum ModelType {
    GradientBoost {
        n_estimators: usize,
        learning_rate: f32,
        max_depth: u32,
        min_samples_leaf: usize,
    },
    RandomForest {
        n_estimators: usize,
        max_depth: u32,
        min_samples_leaf: usize,
        n_jobs: usize,
    },
    AdaBoost {
        n_estimators: usize,
        learning_rate: f64,
        max_depth: u32,
    },
    SVR {
        c: f64,
        epsilon: f64,
        gamma: Gamma,
    },
    LinearRegression {
        fit_intercept: bool,
    },
}

impl Default for ModelType {
    fn default() -> Self {
        let [gradient_boost, ..] = ModelType::defaults();
        gradient_boost
    }
}

impl ModelType {
    /// Short identifier used on the command line and in log lines.
    pub fn kind(&self) -> &'static str {
        match self {
            ModelType::GradientBoost { .. } => "gradientboost",
            ModelType::RandomForest { .. } => "randomforest",
            ModelType::AdaBoost { .. } => "adaboost",
            ModelType::SVR { .. } => "svr",
            ModelType::LinearRegression { .. } => "linearregression",
        }
    }

    /// Reject hyper-parameters no regressor can be built from.
    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: String| Err(BaselineError::Config(msg));
        match self {
            ModelType::GradientBoost {
                n_estimators,
                learning_rate,
                max_depth,
                ..
            } => {
                if *n_estimators == 0 || *max_depth == 0 {
                    return invalid("GradientBoost needs n_estimators > 0 and max_depth > 0".into());
                }
                if !(*learning_rate > 0.0) {
                    return invalid(format!("GradientBoost learning_rate must be positive, got {}", learning_rate));
                }
            }
            ModelType::RandomForest {
                n_estimators,
                max_depth,
                n_jobs,
                ..
            } => {
                if *n_estimators == 0 || *max_depth == 0 || *n_jobs == 0 {
                    return invalid("RandomForest needs n_estimators, max_depth and n_jobs > 0".into());
                }
            }
            ModelType::AdaBoost {
                n_estimators,
                learning_rate,
                max_depth,
            } => {
                if *n_estimators == 0 || *max_depth == 0 {
                    return invalid("AdaBoost needs n_estimators > 0 and max_depth > 0".into());
                }
                if !(*learning_rate > 0.0) {
                    return invalid(format!("AdaBoost learning_rate must be positive, got {}", learning_rate));
                }
            }
            ModelType::SVR { c, epsilon, gamma } => {
                if !(*c > 0.0) || !(*epsilon >= 0.0) {
                    return invalid(format!("SVR needs c > 0 and epsilon >= 0, got c={} epsilon={}", c, epsilon));
                }
                if let Gamma::Value(g) = gamma {
                    if !(*g > 0.0) {
                        return invalid(format!("SVR gamma must be positive, got {}", g));
                    }
                }
            }
            ModelType::LinearRegression { .. } => {}
        }
        Ok(())
    }

    /// Default hyper-parameters of the five baseline regressors, in bank order.
    pub fn defaults() -> [ModelType; 5] {
        [
            ModelType::GradientBoost {
                n_estimators: 100,
                learning_rate: 0.1,
                max_depth: 3,
                min_samples_leaf: 1,
            },
            ModelType::RandomForest {
                n_estimators: 500,
                max_depth: 16,
                min_samples_leaf: 1,
                n_jobs: 12,
            },
            ModelType::AdaBoost {
                n_estimators: 50,
                learning_rate: 1.0,
                max_depth: 3,
            },
            ModelType::SVR {
                c: 1.0,
                epsilon: 0.2,
                gamma: Gamma::Scale,
            },
            ModelType::LinearRegression {
                fit_intercept: true,
            },
        ]
    }
}

impl FromStr for ModelType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let kind = match s.to_lowercase().as_str() {
            "gradientboost" | "gbdt" => "gradientboost",
            "randomforest" | "rf" => "randomforest",
            "adaboost" => "adaboost",
            "svr" | "svm" => "svr",
            "linearregression" | "ols" => "linearregression",
            _ => {
                return Err(format!(
                    "Unknown model type: {}. Valid options are: gradientboost, randomforest, adaboost, svr, linearregression",
                    s
                ))
            }
        };
        ModelType::defaults()
            .into_iter()
            .find(|m| m.kind() == kind)
            .ok_or_else(|| format!("No defaults for model type: {}", kind))
    }
}

impl ModelConfig {
    pub fn new(name: &str, model_type: ModelType) -> Self {
        Self {
            name: name.to_string(),
            scale_features: true,
            model_type,
        }
    }

    /// Scaled pipeline named after its regressor, e.g. `Scaled_SVR`.
    pub fn scaled(model_type: ModelType) -> Self {
        let name = match model_type {
            ModelType::GradientBoost { .. } => "Scaled_GradientBoost",
            ModelType::RandomForest { .. } => "Scaled_RandomForest",
            ModelType::AdaBoost { .. } => "Scaled_AdaBoost",
            ModelType::SVR { .. } => "Scaled_SVR",
            ModelType::LinearRegression { .. } => "Scaled_LinearRegression",
        };
        Self::new(name, model_type)
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self::new("Scaled_GradientBoost", ModelType::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_str_accepts_aliases() {
        assert_eq!(ModelType::from_str("GBDT").unwrap(), ModelType::default());
        assert!(matches!(ModelType::from_str("ols").unwrap(), ModelType::LinearRegression { .. }));
        assert!(ModelType::from_str("knn").is_err());
    }

    #[test]
    fn scaled_names_follow_kind() {
        let svr = ModelType::from_str("svr").unwrap();
        assert_eq!(ModelConfig::scaled(svr).name, "Scaled_SVR");
        let rf = ModelType::from_str("rf").unwrap();
        assert_eq!(ModelConfig::scaled(rf).name, "Scaled_RandomForest");
    }

    #[test]
    fn validate_rejects_zero_estimators() {
        let mt = ModelType::RandomForest {
            n_estimators: 0,
            max_depth: 4,
            min_samples_leaf: 1,
            n_jobs: 2,
        };
        assert!(matches!(mt.validate(), Err(BaselineError::Config(_))));
    }

    #[test]
    fn validate_rejects_negative_svr_gamma() {
        let mt = ModelType::SVR {
            c: 1.0,
            epsilon: 0.2,
            gamma: Gamma::Value(-1.0),
        };
        assert!(mt.validate().is_err());
    }

    #[test]
    fn model_config_json_uses_flattened_model_type() {
        let json = r#"{ "name": "svr_fixed", "SVR": { "c": 2.0, "epsilon": 0.1, "gamma": { "value": 0.5 } } }"#;
        let config: ModelConfig = serde_json::from_str(json).unwrap();
        assert!(config.scale_features);
        assert_eq!(
            config.model_type,
            ModelType::SVR {
                c: 2.0,
                epsilon: 0.1,
                gamma: Gamma::Value(0.5)
            }
        );

        let value = serde_json::to_value(&config).unwrap();
        assert_eq!(value["SVR"]["gamma"]["value"], 0.5);
        assert_eq!(value["scale_features"], true);
    }

    #[test]
    fn default_bank_entries_survive_json() {
        for mt in ModelType::defaults() {
            let config = ModelConfig::scaled(mt);
            let json = serde_json::to_string(&config).unwrap();
            let back: ModelConfig = serde_json::from_str(&json).unwrap();
            assert_eq!(back.name, config.name);
            assert_eq!(back.model_type, config.model_type);
        }

        let svr = serde_json::to_value(ModelConfig::scaled(ModelType::from_str("svr").unwrap())).unwrap();
        assert_eq!(svr["SVR"]["gamma"], "scale");
    }

    #[test]
    fn feature_groups_fill_missing_markers() {
        let groups: FeatureGroups = serde_json::from_str(r#"{ "target": "auc" }"#).unwrap();
        assert_eq!(groups.target, "auc");
        assert_eq!(groups.genes, "selected_genes_20");
        assert_eq!(groups.fingerprints, "fingerprints_512");
    }
}

//! drugresp-regressors: baseline regression pipelines for IC50 prediction.
//!
//! This crate reads the feature-group CSV files of a dataset split, assembles
//! the gene-expression and fingerprint features, and evaluates a fixed bank of
//! scaled regressors (gradient boosting, random forest, AdaBoost, SVR and
//! ordinary least squares) by mean-squared error and Pearson correlation.
//!
//! Every stage reports failures through [`error::BaselineError`] so that
//! callers can tell a missing input apart from a failing model fit.
pub mod config;
pub mod data_handling;
pub mod error;
pub mod evaluation;
pub mod io;
pub mod models;
pub mod preprocessing;
pub mod stats;

//! Smoke tests for the `training_baseline` binary.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;

fn bin() -> Command {
    let mut cmd = Command::cargo_bin("training_baseline").unwrap();
    cmd.env_remove("DRUGRESP_LOG");
    cmd
}

fn write_matrix(path: &Path, rows: usize, cols: usize, seed: f64) {
    let body: String = (0..rows)
        .map(|r| {
            (0..cols)
                .map(|c| format!("{:.3}", ((r * 31 + c * 7) as f64 * 0.37 + seed).sin()))
                .collect::<Vec<_>>()
                .join(",")
                + "\n"
        })
        .collect();
    fs::write(path, body).unwrap();
}

/// Two samples with IC50 1.0 and 2.0, 20 gene and 512 fingerprint columns.
fn write_split(dir: &Path, seed: f64) {
    fs::write(dir.join("ic50_a.csv"), "1.0\n2.0\n").unwrap();
    write_matrix(&dir.join("selected_genes_20_a.csv"), 2, 20, seed);
    write_matrix(&dir.join("fingerprints_512_a.csv"), 2, 512, seed + 1.0);
}

fn results_files(dir: &Path) -> Vec<std::path::PathBuf> {
    fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().path())
        .filter(|p| {
            p.file_name()
                .and_then(|n| n.to_str())
                .map_or(false, |n| n.starts_with("baseline_") && n.ends_with(".csv"))
        })
        .collect()
}

#[test]
fn help_lists_options() {
    bin()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--models"))
        .stdout(predicate::str::contains("--print-config"));
}

#[test]
fn version_is_printed() {
    bin()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn no_arguments_is_a_usage_error() {
    bin().assert().failure().code(1);
}

#[test]
fn end_to_end_writes_one_row_per_pipeline() {
    let train = tempfile::tempdir().unwrap();
    let eval = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    write_split(train.path(), 0.0);
    write_split(eval.path(), 0.5);

    bin()
        .args([train.path(), eval.path(), out.path()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Scaled_LinearRegression"));

    let files = results_files(out.path());
    assert_eq!(files.len(), 1);

    let mut rdr = csv::ReaderBuilder::new().from_path(&files[0]).unwrap();
    let header: Vec<String> = rdr.headers().unwrap().iter().map(String::from).collect();
    assert_eq!(header, vec!["", "MSE", "Pearson", "Time", "Name"]);

    let names: Vec<String> = rdr
        .records()
        .map(|r| r.unwrap().get(4).unwrap().to_string())
        .collect();
    assert_eq!(
        names,
        vec![
            "Scaled_GradientBoost",
            "Scaled_RandomForest",
            "Scaled_AdaBoost",
            "Scaled_SVR",
            "Scaled_LinearRegression"
        ]
    );
}

#[test]
fn model_subset_is_honoured() {
    let train = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    write_split(train.path(), 0.0);

    bin()
        .args([train.path(), train.path(), out.path()])
        .args(["--models", "ols,svr", "--seed", "1"])
        .assert()
        .success();

    let files = results_files(out.path());
    assert_eq!(files.len(), 1);
    let content = fs::read_to_string(&files[0]).unwrap();
    assert_eq!(content.lines().count(), 3);
    assert!(content.lines().nth(1).unwrap().ends_with(",Scaled_SVR"));
}

#[test]
fn empty_eval_directory_exits_with_load_error() {
    let train = tempfile::tempdir().unwrap();
    let eval = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    write_split(train.path(), 0.0);

    bin()
        .args([train.path(), eval.path(), out.path()])
        .assert()
        .failure()
        .code(3)
        .stdout(predicate::str::contains("Failed to load eval split"));

    assert!(results_files(out.path()).is_empty());
}

#[test]
fn missing_output_directory_fails_before_fitting() {
    let train = tempfile::tempdir().unwrap();
    write_split(train.path(), 0.0);
    let missing = train.path().join("no_such_dir");

    bin()
        .args([train.path(), train.path(), missing.as_path()])
        .assert()
        .failure()
        .code(6)
        .stdout(predicate::str::contains("Evaluating").not());

    assert!(!missing.exists());
}

#[test]
fn mismatched_feature_rows_exit_with_shape_error() {
    let train = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    write_split(train.path(), 0.0);
    write_matrix(&train.path().join("fingerprints_512_b.csv"), 1, 512, 2.0);

    bin()
        .args([train.path(), train.path(), out.path()])
        .assert()
        .failure()
        .code(4);
    assert!(results_files(out.path()).is_empty());
}

#[test]
fn print_config_emits_effective_json() {
    let output = bin()
        .args(["train", "eval", "out", "-s", "9", "-m", "rf"])
        .arg("--print-config")
        .output()
        .unwrap();
    assert!(output.status.success());

    let config: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(config["seed"], 9);
    assert_eq!(config["train_data"], "train");
    assert_eq!(config["models"].as_array().unwrap().len(), 1);
    assert_eq!(config["models"][0]["name"], "Scaled_RandomForest");
}

#[test]
fn print_config_with_config_file_prints_only_json() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("baseline.json");
    let json = serde_json::json!({
        "seed": 5,
        "models": [
            { "name": "ols_only", "LinearRegression": { "fit_intercept": true } }
        ]
    });
    fs::write(&config_path, json.to_string()).unwrap();

    let output = bin()
        .env("DRUGRESP_LOG", "debug")
        .args(["train", "eval", "out", "-c"])
        .arg(&config_path)
        .arg("--print-config")
        .output()
        .unwrap();
    assert!(output.status.success());

    let config: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(config["seed"], 5);
    assert_eq!(config["eval_data"], "eval");
    assert_eq!(config["models"][0]["name"], "ols_only");
}

use std::fmt::Display;
use std::fs::OpenOptions;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use chrono::{DateTime, TimeZone};

use drugresp_regressors::error::BaselineError;
use drugresp_regressors::evaluation::ModelResult;

/// Header of the results table. The unnamed first column is the row index.
pub const RESULTS_HEADER: [&str; 5] = ["", "MSE", "Pearson", "Time", "Name"];

/// `baseline_<YYYY-MM-DD_HH_MM>.csv` for the given timestamp.
pub fn results_file_name<Tz: TimeZone>(now: &DateTime<Tz>) -> String
where
    Tz::Offset: Display,
{
    format!("baseline_{}.csv", now.format("%Y-%m-%d_%H_%M"))
}

/// NaN metrics are written as empty fields.
fn format_metric(value: f64) -> String {
    if value.is_nan() {
        String::new()
    } else {
        value.to_string()
    }
}

/// Write the results table into `dir` and return the path of the new file.
///
/// An existing file of the same name is never replaced; a second run within
/// the same minute fails with `BaselineError::Write`.
pub fn write_results<Tz: TimeZone>(
    dir: &Path,
    results: &[ModelResult],
    now: &DateTime<Tz>,
) -> Result<PathBuf, BaselineError>
where
    Tz::Offset: Display,
{
    let path = dir.join(results_file_name(now));
    let write_err = |source: std::io::Error| BaselineError::Write {
        path: path.clone(),
        source,
    };

    let file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&path)
        .map_err(write_err)?;
    let mut wtr = csv::WriterBuilder::new().from_writer(BufWriter::new(file));
    wtr.write_record(RESULTS_HEADER)
        .map_err(|e| write_err(e.into()))?;
    for (i, r) in results.iter().enumerate() {
        wtr.write_record([
            i.to_string(),
            format_metric(r.mse),
            format_metric(r.pearson),
            r.time.to_string(),
            r.name.clone(),
        ])
        .map_err(|e| write_err(e.into()))?;
    }
    wtr.flush().map_err(write_err)?;

    log::info!("Wrote {} result row(s) to {}", results.len(), path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn result(name: &str, mse: f64, pearson: f64) -> ModelResult {
        ModelResult {
            name: name.to_string(),
            mse,
            pearson,
            time: 0.25,
        }
    }

    #[test]
    fn file_name_uses_minute_resolution() {
        let now = Utc.with_ymd_and_hms(2024, 3, 7, 9, 5, 59).unwrap();
        assert_eq!(results_file_name(&now), "baseline_2024-03-07_09_05.csv");
    }

    #[test]
    fn table_has_index_column_and_one_row_per_model() {
        let dir = tempfile::tempdir().unwrap();
        let now = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 0).unwrap();
        let results = vec![
            result("Scaled_SVR", 0.12345, 0.9),
            result("Scaled_LinearRegression", 1.5, -0.25),
        ];

        let path = write_results(dir.path(), &results, &now).unwrap();
        assert_eq!(path, dir.path().join("baseline_2024-01-02_03_04.csv"));

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines[0], ",MSE,Pearson,Time,Name");
        assert_eq!(lines[1], "0,0.12345,0.9,0.25,Scaled_SVR");
        assert_eq!(lines[2], "1,1.5,-0.25,0.25,Scaled_LinearRegression");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn nan_pearson_is_an_empty_field() {
        let dir = tempfile::tempdir().unwrap();
        let now = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 0).unwrap();
        let path = write_results(dir.path(), &[result("Scaled_SVR", 0.5, f64::NAN)], &now).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().nth(1), Some("0,0.5,,0.25,Scaled_SVR"));
    }

    #[test]
    fn same_minute_rerun_keeps_the_first_table() {
        let dir = tempfile::tempdir().unwrap();
        let now = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 0).unwrap();
        let path = write_results(dir.path(), &[result("Scaled_SVR", 0.5, 0.1)], &now).unwrap();

        let later = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 30).unwrap();
        let err = write_results(dir.path(), &[result("Scaled_LinearRegression", 9.0, 0.2)], &later)
            .unwrap_err();
        assert!(matches!(err, BaselineError::Write { .. }));
        assert_eq!(err.exit_code(), 6);

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().nth(1), Some("0,0.5,0.1,0.25,Scaled_SVR"));
        assert_eq!(content.lines().count(), 2);
    }

    #[test]
    fn missing_directory_is_a_write_error() {
        let now = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 0).unwrap();
        let err = write_results(Path::new("/nonexistent/out"), &[], &now).unwrap_err();
        assert_eq!(err.exit_code(), 6);
    }
}

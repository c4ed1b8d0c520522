//! Headerless numeric CSV readers for the feature groups of a dataset split.
//!
//! A feature group is every `.csv` file in a split directory whose name
//! contains the group marker (e.g. `fingerprints_512`). Files are read in
//! file-name order and stacked row-wise.
use std::fs;
use std::path::{Path, PathBuf};

use csv::ReaderBuilder;
use ndarray::{Array1, Array2};

use crate::error::{BaselineError, Result};

/// List the `.csv` files in `dir` whose name contains `marker`, sorted by name.
pub fn matching_files<P: AsRef<Path>>(dir: P, marker: &str) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    let entries = fs::read_dir(dir)
        .map_err(|e| BaselineError::data_load(dir, format!("cannot read directory: {}", e)))?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| BaselineError::data_load(dir, e.to_string()))?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let matches = path
            .file_name()
            .and_then(|n| n.to_str())
            .map(|n| n.contains(marker) && n.ends_with(".csv"))
            .unwrap_or(false);
        if matches {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Parse one headerless numeric CSV file into rows.
fn read_rows(path: &Path) -> Result<Vec<Vec<f64>>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| BaselineError::data_load(path, e.to_string()))?;

    let mut rows = Vec::new();
    for (line, record) in rdr.records().enumerate() {
        let record = record.map_err(|e| BaselineError::data_load(path, e.to_string()))?;
        let mut row = Vec::with_capacity(record.len());
        for (col, field) in record.iter().enumerate() {
            let value = field.parse::<f64>().map_err(|_| {
                BaselineError::data_load(
                    path,
                    format!("line {}, column {}: '{}' is not a number", line + 1, col + 1, field),
                )
            })?;
            row.push(value);
        }
        rows.push(row);
    }
    Ok(rows)
}

/// Read and row-stack every file of a feature group.
///
/// Fails with `DataLoad` when no file matches or the files hold no rows, and
/// with `ShapeMismatch` when rows disagree on their column count.
pub fn read_feature_group<P: AsRef<Path>>(dir: P, marker: &str) -> Result<Array2<f64>> {
    let dir = dir.as_ref();
    let files = matching_files(dir, marker)?;
    if files.is_empty() {
        return Err(BaselineError::data_load(
            dir,
            format!("no '*{}*.csv' files found", marker),
        ));
    }

    let mut ncols: Option<usize> = None;
    let mut nrows = 0usize;
    let mut data = Vec::new();

    for file in &files {
        let rows = read_rows(file)?;
        log::trace!("{:?}: {} rows", file, rows.len());
        for (i, row) in rows.into_iter().enumerate() {
            match ncols {
                None => ncols = Some(row.len()),
                Some(n) if n != row.len() => {
                    return Err(BaselineError::ShapeMismatch(format!(
                        "{:?} line {} has {} columns, expected {}",
                        file,
                        i + 1,
                        row.len(),
                        n
                    )));
                }
                _ => {}
            }
            data.extend(row);
            nrows += 1;
        }
    }

    let ncols = match ncols {
        Some(n) if nrows > 0 => n,
        _ => {
            return Err(BaselineError::data_load(
                dir,
                format!("'{}' files contain no rows", marker),
            ))
        }
    };

    log::debug!(
        "Loaded '{}' from {} file(s): {} x {}",
        marker,
        files.len(),
        nrows,
        ncols
    );

    Array2::from_shape_vec((nrows, ncols), data)
        .map_err(|e| BaselineError::ShapeMismatch(e.to_string()))
}

/// Collapse a single-row or single-column table to a vector.
pub fn squeeze(table: Array2<f64>) -> Result<Array1<f64>> {
    let (nrows, ncols) = table.dim();
    if ncols == 1 {
        Ok(table.column(0).to_owned())
    } else if nrows == 1 {
        Ok(table.row(0).to_owned())
    } else {
        Err(BaselineError::ShapeMismatch(format!(
            "target table is {} x {}, expected a single row or column",
            nrows, ncols
        )))
    }
}

/// Read a target group (e.g. `ic50`) as a vector.
pub fn read_target<P: AsRef<Path>>(dir: P, marker: &str) -> Result<Array1<f64>> {
    squeeze(read_feature_group(dir, marker)?)
}

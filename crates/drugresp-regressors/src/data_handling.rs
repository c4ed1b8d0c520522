use std::path::Path;

use ndarray::{concatenate, Array1, Array2, Axis};

use crate::config::FeatureGroups;
use crate::error::{BaselineError, Result};
use crate::io::{read_feature_group, read_target};

/// Features and IC50 targets of one dataset split (train or eval).
#[derive(Debug, Clone)]
pub struct DatasetSplit {
    pub x: Array2<f64>,
    pub y: Array1<f64>,
}

impl DatasetSplit {
    pub fn new(x: Array2<f64>, y: Array1<f64>) -> Result<Self> {
        if x.nrows() != y.len() {
            return Err(BaselineError::ShapeMismatch(format!(
                "{} feature rows but {} target values",
                x.nrows(),
                y.len()
            )));
        }
        Ok(Self { x, y })
    }

    pub fn n_samples(&self) -> usize {
        self.x.nrows()
    }

    pub fn n_features(&self) -> usize {
        self.x.ncols()
    }
}

/// Concatenate gene-expression and fingerprint features column-wise.
pub fn assemble_features(genes: &Array2<f64>, fingerprints: &Array2<f64>) -> Result<Array2<f64>> {
    if genes.nrows() != fingerprints.nrows() {
        return Err(BaselineError::ShapeMismatch(format!(
            "gene features have {} rows but fingerprints have {}",
            genes.nrows(),
            fingerprints.nrows()
        )));
    }
    concatenate(Axis(1), &[genes.view(), fingerprints.view()])
        .map_err(|e| BaselineError::ShapeMismatch(e.to_string()))
}

/// Load target, genes and fingerprints of a split directory.
pub fn load_split<P: AsRef<Path>>(dir: P, groups: &FeatureGroups) -> Result<DatasetSplit> {
    let dir = dir.as_ref();
    let y = read_target(dir, &groups.target)?;
    let genes = read_feature_group(dir, &groups.genes)?;
    let fingerprints = read_feature_group(dir, &groups.fingerprints)?;
    let x = assemble_features(&genes, &fingerprints)?;

    log::debug!(
        "{:?}: {} samples, {} gene + {} fingerprint features",
        dir,
        x.nrows(),
        genes.ncols(),
        fingerprints.ncols()
    );

    DatasetSplit::new(x, y)
}

/// Train and eval splits must share the feature layout.
pub fn check_compatible(train: &DatasetSplit, eval: &DatasetSplit) -> Result<()> {
    if train.n_features() != eval.n_features() {
        return Err(BaselineError::ShapeMismatch(format!(
            "train has {} features but eval has {}",
            train.n_features(),
            eval.n_features()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn assembled_columns_add_up() {
        let genes = Array2::<f64>::zeros((3, 20));
        let fps = Array2::<f64>::ones((3, 512));
        let x = assemble_features(&genes, &fps).unwrap();
        assert_eq!(x.dim(), (3, 532));
        assert_eq!(x[(0, 19)], 0.0);
        assert_eq!(x[(0, 20)], 1.0);
    }

    #[test]
    fn assemble_rejects_row_mismatch() {
        let genes = Array2::<f64>::zeros((3, 2));
        let fps = Array2::<f64>::zeros((2, 2));
        assert!(matches!(
            assemble_features(&genes, &fps),
            Err(BaselineError::ShapeMismatch(_))
        ));
    }

    #[test]
    fn split_rejects_target_mismatch() {
        let x = array![[1.0, 2.0], [3.0, 4.0]];
        let y = array![1.0];
        assert!(DatasetSplit::new(x, y).is_err());
    }
}

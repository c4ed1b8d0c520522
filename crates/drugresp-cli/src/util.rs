use std::io;
use std::path::{Path, PathBuf};

use drugresp_regressors::error::BaselineError;

/// Check that `path` names an existing directory the results can be written to.
pub fn validate_output_dir(path: &str) -> Result<PathBuf, BaselineError> {
    let pb = PathBuf::from(path);

    if !pb.exists() {
        return Err(BaselineError::Write {
            path: pb,
            source: io::Error::new(io::ErrorKind::NotFound, "output directory does not exist"),
        });
    }
    if !pb.is_dir() {
        return Err(BaselineError::Write {
            path: pb,
            source: io::Error::new(io::ErrorKind::Other, "output path is not a directory"),
        });
    }

    Ok(pb)
}

/// Check that a split directory exists before any file in it is read.
pub fn validate_split_dir(path: &str) -> Result<&Path, BaselineError> {
    let p = Path::new(path);
    if !p.is_dir() {
        return Err(BaselineError::data_load(p, "split directory does not exist"));
    }
    Ok(p)
}

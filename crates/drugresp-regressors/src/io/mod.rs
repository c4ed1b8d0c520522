pub mod feature_files;

pub use feature_files::{matching_files, read_feature_group, read_target};

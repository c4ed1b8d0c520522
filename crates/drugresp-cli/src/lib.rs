pub mod baseline;
pub mod cli;
pub mod util;

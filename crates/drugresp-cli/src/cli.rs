//! Command line definition and the mapping from failures to exit codes.
use clap::{Arg, ArgAction, Command, ValueHint};

use drugresp_regressors::error::BaselineError;

/// Log filter used when `DRUGRESP_LOG` is not set.
pub const DEFAULT_LOG_FILTER: &str =
    "error,drugresp_regressors=debug,drugresp_cli=debug,training_baseline=debug";

/// Environment variable overriding [`DEFAULT_LOG_FILTER`].
pub const LOG_ENV: &str = "DRUGRESP_LOG";

pub fn build_cli() -> Command {
    Command::new("training_baseline")
        .version(clap::crate_version!())
        .about("\u{1F48A} Benchmark baseline regressors on IC50 drug-response data")
        .arg_required_else_help(true)
        .arg(
            Arg::new("train_filepath")
                .help("Directory holding the train split CSV files")
                .value_parser(clap::builder::NonEmptyStringValueParser::new())
                .value_hint(ValueHint::DirPath),
        )
        .arg(
            Arg::new("eval_filepath")
                .help("Directory holding the eval split CSV files")
                .value_parser(clap::builder::NonEmptyStringValueParser::new())
                .value_hint(ValueHint::DirPath),
        )
        .arg(
            Arg::new("model_path")
                .help("Existing directory the results CSV is written to")
                .value_parser(clap::builder::NonEmptyStringValueParser::new())
                .value_hint(ValueHint::DirPath),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .help(
                    "Path to a JSON baseline configuration file. \
                     Positional arguments override the paths it specifies.",
                )
                .value_parser(clap::value_parser!(std::path::PathBuf))
                .value_hint(ValueHint::FilePath),
        )
        .arg(
            Arg::new("seed")
                .short('s')
                .long("seed")
                .help("Seed for the random forest and AdaBoost [default: 42]")
                .value_parser(clap::value_parser!(u64)),
        )
        .arg(
            Arg::new("models")
                .short('m')
                .long("models")
                .help(
                    "Comma-separated subset of pipelines to evaluate, by name \
                     (Scaled_SVR) or kind (svr). Bank order is kept.",
                )
                .value_delimiter(',')
                .value_parser(clap::builder::NonEmptyStringValueParser::new())
                .value_hint(ValueHint::Other),
        )
        .arg(
            Arg::new("print_config")
                .long("print-config")
                .help("Print the effective configuration as JSON and exit")
                .action(ArgAction::SetTrue),
        )
        .help_template(
            "{usage-heading} {usage}\n\n\
             {about-with-newline}\n\
             Version {version}\n\n\
             {all-args}{after-help}",
        )
}

/// Exit status of a failed run: the code of the first [`BaselineError`] in
/// the error chain, 1 when there is none.
pub fn exit_code(err: &anyhow::Error) -> i32 {
    err.chain()
        .find_map(|e| e.downcast_ref::<BaselineError>())
        .map(BaselineError::exit_code)
        .unwrap_or(1)
}

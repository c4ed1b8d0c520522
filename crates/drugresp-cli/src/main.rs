use log::LevelFilter;

use drugresp_cli::baseline::input::BaselineConfig;
use drugresp_cli::baseline::runner::run_baseline;
use drugresp_cli::cli::{build_cli, exit_code, DEFAULT_LOG_FILTER, LOG_ENV};

/// Logs go to stdout. With `--print-config` only errors are logged, so the
/// printed JSON stays parseable.
fn init_logger(print_config: bool) {
    let mut builder = env_logger::Builder::default();
    builder
        .filter_level(LevelFilter::Error)
        .target(env_logger::Target::Stdout);
    if !print_config {
        builder.parse_env(env_logger::Env::default().filter_or(LOG_ENV, DEFAULT_LOG_FILTER));
    }
    builder.init();
}

fn main() {
    let matches = match build_cli().try_get_matches() {
        Ok(matches) => matches,
        Err(e) => {
            // Help and version go to stdout and are not failures.
            let code = if e.use_stderr() { 1 } else { 0 };
            let _ = e.print();
            std::process::exit(code)
        }
    };
    init_logger(matches.get_flag("print_config"));

    let config = match BaselineConfig::from_arguments(&matches) {
        Ok(config) => config,
        Err(e) => {
            log::error!("Invalid configuration: {:#}", e);
            std::process::exit(exit_code(&e))
        }
    };

    if matches.get_flag("print_config") {
        match serde_json::to_string_pretty(&config) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                log::error!("Failed to serialize configuration: {}", e);
                std::process::exit(1)
            }
        }
        return;
    }

    log::info!(
        "[training_baseline] Running {} model(s) with seed {}",
        config.models.len(),
        config.seed
    );

    match run_baseline(&config) {
        Ok(path) => log::info!("[training_baseline] Results table: {}", path.display()),
        Err(e) => {
            log::error!("Baseline run failed: {:#}", e);
            std::process::exit(exit_code(&e))
        }
    }
}

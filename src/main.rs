use clap::Parser;
use fe_explorer::console;
use fe_explorer::core::DataStore;
use fe_explorer::core::config::{self, LoadedConfig};
use simplelog::{ConfigBuilder, WriteLogger};
use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "fe-explorer", about = "Browse Formula E standings, results and calendars")]
struct Args {
    /// Dataset to load (JSON)
    #[arg(short, long, value_name = "FILE")]
    data: Option<PathBuf>,

    /// Config file to use instead of ~/.fe-explorer/config.toml
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let (loaded, config_error) = match config::load_config(args.config.as_deref()) {
        Ok(loaded) => (loaded, None),
        Err(e) => (LoadedConfig::default(), Some(e)),
    };
    let resolved = config::resolve(&loaded.config, args.data.as_deref());

    // Initialize file logger. Nothing above this point logs.
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create(&resolved.log_file) {
        let _ = WriteLogger::init(resolved.log_level, log_config, log_file);
    }

    log::info!("Formula E Explorer starting with dataset {}", resolved.data_file.display());
    match (&loaded.source, &config_error) {
        (_, Some(e)) => {
            log::warn!("{}; using defaults", e);
            eprintln!("Warning: {e}; using defaults");
        }
        (Some(path), None) => log::info!("Loaded config from {}", path.display()),
        (None, None) => log::info!("No config file found, using defaults"),
    }
    log::debug!("Config: {:?}", loaded.config);
    for warning in &resolved.warnings {
        log::warn!("{}", warning);
        eprintln!("Warning: {warning}");
    }

    let store = match DataStore::load(&resolved.data_file) {
        Ok(store) => store,
        Err(e) => {
            log::error!("Cannot start: {}", e);
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let stdin = io::stdin();
    match console::run(&store, stdin.lock(), io::stdout()) {
        Ok(()) => {
            log::info!("Formula E Explorer exiting");
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("Console I/O failed: {}", e);
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

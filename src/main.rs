//! icylib: generates KiCad libraries from declarative component definitions
//!
//! Reads every component under `<library>/components/` and writes the
//! schematic library, doc library and footprints into the output directory.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info, warn, Level};
use tracing_subscriber::EnvFilter;

use icylib::config;
use icylib::export::export_library;
use icylib::model::{load_component, Library};

/// Generates KiCad symbol, doc and footprint libraries.
///
/// Component definitions are read from `<LIBRARY_DIR>/components/<manufacturer>/<name>.json`.
#[derive(Parser, Debug)]
#[command(name = "icylib")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Library root (defaults to `library_path` from the config, then `.`)
    #[arg(value_name = "LIBRARY_DIR")]
    library_dir: Option<PathBuf>,

    /// Path to configuration file
    #[arg(short, long, value_name = "CONFIG_FILE")]
    config: Option<PathBuf>,

    /// Output directory
    #[arg(short, long, value_name = "DIR")]
    output: Option<PathBuf>,

    /// Base name of the generated library files
    #[arg(long, value_name = "NAME")]
    name: Option<String>,

    /// Increase logging verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Decrease logging verbosity (only show errors)
    #[arg(short, long)]
    quiet: bool,
}

/// Determines the log level from CLI arguments.
#[allow(clippy::match_same_arms)] // Explicit "warn" arm for clarity
fn get_log_level(verbose: u8, quiet: bool, config_level: &str) -> Level {
    if quiet {
        return Level::ERROR;
    }

    match verbose {
        0 => match config_level.to_lowercase().as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "info" => Level::INFO,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::WARN,
        },
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Initialises the tracing subscriber for logging.
fn init_tracing(level: Level) {
    let filter = EnvFilter::from_default_env().add_directive(level.into());

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Entry point for the icylib generator.
fn main() -> ExitCode {
    let args = Args::parse();

    // Load configuration
    let config_path = args.config.as_deref();
    let cfg = match config::load_config(config_path) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            return ExitCode::FAILURE;
        }
    };

    // Initialise logging
    let log_level = get_log_level(args.verbose, args.quiet, &cfg.logging.level);
    init_tracing(log_level);

    // CLI values override the configuration
    let library_dir = args
        .library_dir
        .or(cfg.library_path)
        .unwrap_or_else(|| PathBuf::from("."));
    let output_dir = args.output.unwrap_or(cfg.output.directory);
    let library_name = args.name.unwrap_or(cfg.output.library_name);

    info!(
        version = env!("CARGO_PKG_VERSION"),
        library = %library_dir.display(),
        "Starting icylib"
    );

    let library = Library::open(&library_dir);
    let sources = match library.sources() {
        Ok(sources) => sources,
        Err(e) => {
            error!(error = %e, "Cannot list components");
            return ExitCode::FAILURE;
        }
    };

    let mut components = Vec::with_capacity(sources.len());
    let mut skipped = 0usize;
    for source in &sources {
        match load_component(source) {
            Ok(component) => components.push(component),
            Err(e) if cfg.export.fail_fast => {
                error!(component = %source.name, error = %e, "Invalid component");
                return ExitCode::FAILURE;
            }
            Err(e) => {
                warn!(component = %source.name, error = %e, "Skipping invalid component");
                skipped += 1;
            }
        }
    }

    match export_library(&components, &output_dir, &library_name) {
        Ok(summary) => {
            info!(
                symbols = summary.symbols,
                footprints = summary.footprints,
                skipped,
                "Done"
            );
            if skipped > 0 {
                warn!(skipped, "Some components were skipped");
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "Export failed");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Args::command().debug_assert();
    }

    #[test]
    fn log_level_from_flags() {
        assert_eq!(get_log_level(0, true, "trace"), Level::ERROR);
        assert_eq!(get_log_level(0, false, "debug"), Level::DEBUG);
        assert_eq!(get_log_level(0, false, "bogus"), Level::WARN);
        assert_eq!(get_log_level(2, false, "warn"), Level::DEBUG);
        assert_eq!(get_log_level(5, false, "warn"), Level::TRACE);
    }
}

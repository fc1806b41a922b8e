mod console;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use engine_logging::engine_info;

use console::OutputMode;

/// Terminal front end for the simulated research assistant.
#[derive(Debug, Parser)]
#[command(name = "assistant", version, about)]
struct Args {
    /// RON configuration file. Defaults to ./assistant.ron when present.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Print view models and notices as JSON lines.
    #[arg(long)]
    json: bool,

    /// Override the configured log level (error, warn, info, debug, trace).
    #[arg(long, value_name = "LEVEL")]
    log_level: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let mut config = console::config::load(args.config.as_deref())?;
    if let Some(level) = args.log_level {
        config.logging.level = level;
    }
    engine_logging::initialize(&config.logging);
    engine_info!("Starting assistant with {:?}", config.simulation);

    let mode = if args.json {
        OutputMode::Json
    } else {
        OutputMode::Text
    };
    console::run(&config, mode)
}

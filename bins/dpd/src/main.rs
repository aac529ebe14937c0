//! Dead Pixel Detective build CLI
//!
//! Wraps the Gradle tasks used to build, test, lint and install the Android
//! app, plus an environment check and a full pipeline.

use anyhow::Result;
use clap::Parser;
use dpd_android::{gradle, Command, Orchestrator};
use dpd_cli::output::Status;
use dpd_core::config::Config;
use dpd_core::error::exit_codes;
use dpd_core::health::ProcessEnv;
use dpd_core::process::SystemRunner;
use dpd_telemetry::TelemetryConfig;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};

const EXAMPLES: &str = "\
Examples:
  dpd build          Build debug APK
  dpd test           Run unit tests
  dpd install        Build and install on device
  dpd clean          Clean build outputs
  dpd all            Clean, test, and build";

#[derive(Parser)]
#[command(name = "dpd")]
#[command(about = "Dead Pixel Detective - build and run tool")]
#[command(version)]
#[command(after_help = EXAMPLES)]
struct Cli {
    /// Command to execute
    #[arg(value_enum)]
    command: Command,

    /// Config file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Increase log verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long)]
    quiet: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.no_color {
        owo_colors::set_override(false);
    }
    Status::set_quiet(cli.quiet);

    let mut telemetry = TelemetryConfig::for_verbosity(cli.verbose);
    telemetry.ansi = dpd_telemetry::ansi_enabled(cli.no_color, std::io::stderr().is_terminal());
    dpd_telemetry::init_with_config(telemetry)?;

    let exit_code = run(&cli);
    std::process::exit(exit_code);
}

fn run(cli: &Cli) -> i32 {
    let cwd = match std::env::current_dir() {
        Ok(dir) => dir,
        Err(e) => {
            Status::error(&format!("Cannot read working directory: {e}"));
            return exit_codes::FAILURE;
        }
    };

    let config = match Config::load(cli.config.as_deref(), &cwd) {
        Ok(config) => config,
        Err(e) => {
            Status::error(&e.to_string());
            return exit_codes::FAILURE;
        }
    };

    let project_dir = resolve_project_dir(&config, &cwd);
    let orchestrator = Orchestrator::new(&config.schema, project_dir, &SystemRunner, &ProcessEnv);

    if orchestrator.execute(cli.command) {
        exit_codes::SUCCESS
    } else {
        exit_codes::FAILURE
    }
}

fn resolve_project_dir(config: &Config, cwd: &Path) -> PathBuf {
    config
        .project_root(cwd)
        .unwrap_or_else(|| gradle::find_project_root(cwd))
}

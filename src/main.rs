//! FitScope desktop client.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use fitscope::config::{FitScopeConfig, BACKEND_URL_ENV};
use fitscope::logging::init_logging;
use fitscope::run_fitscope;

#[derive(Parser, Debug)]
#[command(name = "fitscope")]
#[command(about = "Desktop client for a curve-fitting backend")]
struct Args {
    /// YAML config file (default: ./fitscope.yaml when present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Backend base URL; overrides the config file and the environment
    #[arg(long)]
    backend_url: Option<String>,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let cfg = match FitScopeConfig::load(args.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(err) => {
            eprintln!("Error: {err}");
            return ExitCode::FAILURE;
        }
    };
    let cfg = cfg.with_overrides(std::env::var(BACKEND_URL_ENV).ok(), args.backend_url);
    init_logging(&cfg.log_filter);

    match run_fitscope(cfg) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "fitscope exited with an error");
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}

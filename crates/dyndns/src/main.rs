// # dyndns - one-shot DNS record updater
//
// Thin integration layer only: parse the command line, load and validate
// the configuration, set up tracing and the runtime, then hand over to
// `dyndns_core::run`. All reconciliation logic lives in dyndns-core.
//
// Designed to be driven by an external scheduler (cron, a systemd timer);
// each invocation is one stateless run.
//
// ## Exit status
//
// - 0: run completed; per-record and per-domain warnings do not change this
// - 1: configuration unreadable or invalid
// - 2: runtime failure, including "no public IP address could be resolved"

use anyhow::{Context, Result};
use clap::Parser;
use dyndns_core::Config;
use dyndns_ip_http::HttpIpProbe;
use dyndns_provider_digitalocean::DigitalOceanApi;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{Level, error, info};
use tracing_subscriber::FmtSubscriber;

/// Configuration file name used when no path is given
const DEFAULT_CONFIG_FILE: &str = ".dyndns.json";

#[derive(Parser, Debug)]
#[command(name = "dyndns", version)]
#[command(about = "Keep provider DNS records pointed at this host's public IP")]
struct Args {
    /// Path to the configuration file (defaults to ~/.dyndns.json)
    config: Option<PathBuf>,

    /// Print debug messages
    #[arg(short, long)]
    debug: bool,
}

/// Exit codes for different termination scenarios
#[derive(Debug, Clone, Copy)]
enum RunExitCode {
    /// Run completed (warnings included)
    Success = 0,
    /// Configuration error
    ConfigError = 1,
    /// Runtime error (discovery failure, runtime setup failure)
    RuntimeError = 2,
}

impl From<RunExitCode> for ExitCode {
    fn from(code: RunExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    // Diagnostics go to stderr; stdout stays clean for schedulers that
    // capture it
    let level = if args.debug { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("failed to set tracing subscriber: {}", e);
        return RunExitCode::RuntimeError.into();
    }

    let config = match load_config(args.config) {
        Ok(config) => config,
        Err(e) => {
            error!("{:#}", e);
            return RunExitCode::ConfigError.into();
        }
    };

    let rt = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("failed to create tokio runtime: {}", e);
            return RunExitCode::RuntimeError.into();
        }
    };

    match rt.block_on(run(&config)) {
        Ok(()) => RunExitCode::Success.into(),
        Err(e) => {
            error!("{:#}", e);
            RunExitCode::RuntimeError.into()
        }
    }
}

/// Resolve the config path, then load and validate the file
fn load_config(path: Option<PathBuf>) -> Result<Config> {
    let path = match path {
        Some(path) => path,
        None => dirs::home_dir()
            .context("cannot determine the home directory; pass a config path explicitly")?
            .join(DEFAULT_CONFIG_FILE),
    };
    info!("using config file: {}", path.display());

    let config = Config::load(&path)?;
    config.validate()?;
    Ok(config)
}

/// Execute one run against the real transports
async fn run(config: &Config) -> Result<()> {
    let probe = HttpIpProbe::new()?;
    let api = DigitalOceanApi::new(config.api_key.clone())?;

    let summary = dyndns_core::run(config, &probe, &api).await?;
    info!(
        "run complete: {} record(s) updated across {} domain(s)",
        summary.total_updated(),
        summary.domains.len()
    );
    Ok(())
}

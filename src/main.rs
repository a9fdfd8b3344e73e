//! pgready - readiness check front end for test runners.
//!
//! Usage:
//!   pgready [OPTIONS]
//!
//! Runs the readiness flow once and maps the decision to an exit code:
//! proceed and skip exit 0 (an absent environment is not a failure), fail
//! exits 1. Use `--json` for machine-readable output in CI pipelines.

use anyhow::{Context, Result};
use clap::Parser;
use pgready::{
    config::{HarnessConfig, LogFormat},
    fixture::evaluate,
    Decision,
};
use serde::Serialize;
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::{fmt, EnvFilter};

/// pgready - database readiness check for integration test runs
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Connection URL override
    #[arg(long, value_name = "URL")]
    url: Option<String>,

    /// Fail instead of skipping when the database is unavailable
    #[arg(long)]
    require_db: bool,

    /// Overall readiness deadline in seconds
    #[arg(long, value_name = "SECS")]
    max_wait_secs: Option<f64>,

    /// Pause between readiness attempts in seconds
    #[arg(long, value_name = "SECS")]
    retry_interval_secs: Option<f64>,

    /// Bound on a single connection attempt in seconds
    #[arg(long, value_name = "SECS")]
    connect_timeout_secs: Option<u64>,

    /// Print the decision as JSON
    #[arg(long)]
    json: bool,

    /// Enable verbose logging (debug level)
    #[arg(short, long)]
    verbose: bool,

    /// Output logs in JSON format
    #[arg(long)]
    json_logs: bool,
}

#[derive(Serialize)]
struct DecisionReport<'a> {
    decision: &'static str,
    reason: Option<&'a str>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = load_config(&args)?;

    setup_logging(&args, &config);

    info!(
        version = env!("CARGO_PKG_VERSION"),
        url = %config.url,
        require_db = config.require_db,
        "Starting readiness check"
    );

    let decision = evaluate(&config).await;

    if args.json {
        let report = DecisionReport {
            decision: decision.kind(),
            reason: decision.reason(),
        };
        println!("{}", serde_json::to_string(&report)?);
    } else {
        match &decision {
            Decision::Proceed(_) => println!("ready"),
            Decision::Skip(reason) => {
                println!("skip");
                eprintln!("{reason}");
            }
            Decision::Fail(reason) => {
                println!("fail");
                eprintln!("{reason}");
            }
        }
    }

    if let Decision::Proceed(pool) = &decision {
        pool.close().await;
    }

    if matches!(decision, Decision::Fail(_)) {
        std::process::exit(1);
    }
    Ok(())
}

fn load_config(args: &Args) -> Result<HarnessConfig> {
    let mut config = if let Some(ref path) = args.config {
        HarnessConfig::from_file(path).context(format!("Failed to load config from {path:?}"))?
    } else {
        HarnessConfig::from_env().context("Failed to load config from environment")?
    };

    // CLI flags win over file and environment.
    if let Some(ref url) = args.url {
        config.url = url.clone();
    }
    if args.require_db {
        config.require_db = true;
    }
    if let Some(secs) = args.max_wait_secs {
        config.max_wait_secs = secs;
    }
    if let Some(secs) = args.retry_interval_secs {
        config.retry_interval_secs = secs;
    }
    if let Some(secs) = args.connect_timeout_secs {
        config.connect_timeout_secs = secs;
    }

    config.validate()?;
    Ok(config)
}

fn setup_logging(args: &Args, config: &HarnessConfig) {
    let level = if args.verbose {
        Level::DEBUG
    } else {
        config.logging.level.into()
    };

    let filter = EnvFilter::from_default_env()
        .add_directive(format!("pgready={level}").parse().unwrap())
        .add_directive("sqlx=warn".parse().unwrap());

    let use_json = args.json_logs || config.logging.format == LogFormat::Json;

    if use_json {
        fmt()
            .json()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
    } else {
        fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
    }
}

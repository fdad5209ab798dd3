//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - loads `.env` and installs the log subscriber
//! - parses CLI arguments
//! - reads the record (and optional engine config)
//! - runs predict / simulate / optimize
//! - prints results and writes optional exports

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::{Command, CommonArgs, OptimizeArgs, PredictArgs, SimulateArgs, SweepArgs};
use crate::domain::{EngineConfig, Objective, RawRecord, SweepConfig};
use crate::error::EngineError;

pub mod pipeline;

/// Entry point for the `pricecast` binary.
pub fn run() -> Result<(), EngineError> {
    dotenvy::dotenv().ok();
    init_logging();

    let cli = crate::cli::Cli::parse();
    match cli.command {
        Command::Predict(args) => handle_predict(args),
        Command::Simulate(args) => handle_simulate(args),
        Command::Optimize(args) => handle_optimize(args),
    }
}

/// Log to stderr so stdout stays clean for `--json` output.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    // A subscriber may already be set when embedded; keep the existing one.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn load_inputs(common: &CommonArgs) -> Result<(RawRecord, EngineConfig), EngineError> {
    let record = crate::io::read_record(&common.record)?;
    let config = match &common.config {
        Some(path) => crate::io::read_engine_config(path)?,
        None => EngineConfig::default(),
    };
    Ok((record, config))
}

fn sweep_config(args: &SweepArgs) -> SweepConfig {
    SweepConfig::new(args.min_factor, args.max_factor, args.steps)
}

fn handle_predict(args: PredictArgs) -> Result<(), EngineError> {
    let (record, config) = load_inputs(&args.common)?;
    let result = pipeline::predict_with(&record, &config)?;

    if args.common.json {
        println!("{}", to_json(&result)?);
    } else {
        print!("{}", crate::report::format_prediction(&result));
    }
    Ok(())
}

fn handle_simulate(args: SimulateArgs) -> Result<(), EngineError> {
    let (record, config) = load_inputs(&args.common)?;
    let points = pipeline::simulate_with(&record, &sweep_config(&args.sweep), &config)?;

    if args.common.json {
        println!("{}", to_json(&points)?);
    } else {
        print!("{}", crate::report::format_sweep(&points));
    }

    if let Some(path) = &args.export {
        crate::io::write_sweep_csv(path, &points)?;
    }
    Ok(())
}

fn handle_optimize(args: OptimizeArgs) -> Result<(), EngineError> {
    // Reject a bad metric before touching the record or the model.
    let objective: Objective = args.metric.parse()?;
    let (record, config) = load_inputs(&args.common)?;
    let best = pipeline::optimize_with(&record, objective, &sweep_config(&args.sweep), &config)?;

    if args.common.json {
        println!("{}", to_json(&best)?);
    } else {
        print!("{}", crate::report::format_optimum(best.as_ref(), objective));
    }
    Ok(())
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, EngineError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| EngineError::Unexpected(format!("failed to serialize output: {e}")))
}

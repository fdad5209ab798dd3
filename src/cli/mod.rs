//! Command-line parsing for the `pricecast` front-end.
//!
//! Argument parsing and dispatch stay here; the engine itself never sees
//! clap types.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "pricecast", version, about = "Revenue prediction and what-if price analysis")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Predict revenue, quantity and profit for one sale record.
    Predict(PredictArgs),
    /// Sweep a range of prices around the record's unit price.
    Simulate(SimulateArgs),
    /// Find the price in a sweep that maximizes revenue or profit.
    Optimize(OptimizeArgs),
}

/// Options shared by every subcommand.
#[derive(Debug, Args, Clone)]
pub struct CommonArgs {
    /// Sale record as a JSON object (`-` reads stdin).
    #[arg(long, value_name = "JSON")]
    pub record: PathBuf,

    /// JSON file overriding engine policy (price cap, elasticity tiers, ceilings).
    #[arg(long, value_name = "JSON")]
    pub config: Option<PathBuf>,

    /// Print machine-readable JSON instead of a table.
    #[arg(long)]
    pub json: bool,
}

/// Price sweep options.
#[derive(Debug, Args, Clone)]
pub struct SweepArgs {
    /// Lowest price factor.
    #[arg(long, default_value_t = 0.5)]
    pub min_factor: f64,

    /// Highest price factor.
    #[arg(long, default_value_t = 2.0)]
    pub max_factor: f64,

    /// Number of scenarios.
    #[arg(long, default_value_t = 5)]
    pub steps: usize,
}

#[derive(Debug, Args, Clone)]
pub struct PredictArgs {
    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args, Clone)]
pub struct SimulateArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    #[command(flatten)]
    pub sweep: SweepArgs,

    /// Export the sweep to CSV.
    #[arg(long, value_name = "CSV")]
    pub export: Option<PathBuf>,
}

#[derive(Debug, Args, Clone)]
pub struct OptimizeArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    #[command(flatten)]
    pub sweep: SweepArgs,

    /// Objective to maximize: `revenue` or `profit`.
    #[arg(long, default_value = "profit")]
    pub metric: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn simulate_defaults() {
        let cli = Cli::parse_from(["pricecast", "simulate", "--record", "r.json"]);
        let Command::Simulate(args) = cli.command else {
            panic!("expected simulate");
        };
        assert_eq!(args.sweep.min_factor, 0.5);
        assert_eq!(args.sweep.max_factor, 2.0);
        assert_eq!(args.sweep.steps, 5);
        assert!(!args.common.json);
    }

    #[test]
    fn optimize_metric_is_free_text() {
        let cli = Cli::parse_from(["pricecast", "optimize", "--record", "-", "--metric", "margin"]);
        let Command::Optimize(args) = cli.command else {
            panic!("expected optimize");
        };
        assert_eq!(args.metric, "margin");
    }
}

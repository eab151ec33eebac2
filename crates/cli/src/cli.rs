use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use adpulse_ingest::Scenario;

/// Evaluate ad-campaign metrics against the kill-switch and trend-watch rules.
#[derive(Parser, Debug)]
#[command(name = "adpulse", version, about)]
pub struct CliArgs {
    /// Output format
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Threshold document (YAML); overrides THRESHOLDS_FILE
    #[arg(long, global = true)]
    pub thresholds: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Evaluate a precomputed metrics bundle (JSON file)
    Evaluate {
        #[arg(long)]
        bundle: PathBuf,
    },
    /// Aggregate raw interval rows (JSON array or JSON lines) and evaluate
    Rows {
        #[arg(long)]
        file: PathBuf,
        /// Daily budget; defaults to DAILY_BUDGET
        #[arg(long)]
        budget: Option<f64>,
    },
    /// Generate a synthetic day with an injected failure and evaluate it
    Simulate {
        /// normal, zero-conversions, pacing-breach, cost-spike, quality-drop
        #[arg(long, default_value = "normal")]
        scenario: Scenario,
        #[arg(long, default_value_t = 42)]
        seed: u64,
        /// Print the newest N raw rows
        #[arg(long, default_value_t = 0)]
        show_rows: usize,
    },
    /// Print the active thresholds
    Thresholds,
}

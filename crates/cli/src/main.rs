mod cli;
mod render;
mod terminal;

use std::io::IsTerminal;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use tracing::{debug, info};

use adpulse_core::{Config, MetricRecord, MetricsBundle};
use adpulse_ingest::synthetic::generate_seeded;
use adpulse_ingest::{BundleBuilder, RowImporter, WindowConfig};
use adpulse_rules::loader::resolve_thresholds;
use adpulse_rules::RuleEngine;

use crate::cli::{CliArgs, Command, OutputFormat};
use crate::render::Evaluation;
use crate::terminal::Terminal;

fn read_bundle(path: &Path) -> Result<MetricsBundle> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("invalid bundle in {}", path.display()))
}

fn evaluate(
    engine: &RuleEngine,
    bundle: MetricsBundle,
    live: Option<adpulse_ingest::LiveMetrics>,
) -> Result<Evaluation> {
    let alerts = engine.evaluate(&bundle).context("evaluation failed")?;
    info!(alert_count = alerts.len(), "bundle evaluated");
    Ok(Evaluation {
        scenario: None,
        bundle,
        evidence: engine.evidence(&bundle),
        alerts,
        live,
        recent_rows: Vec::new(),
    })
}

/// Newest `n` rows, newest first.
fn newest(rows: &[MetricRecord], n: usize) -> Vec<MetricRecord> {
    let mut sorted = rows.to_vec();
    sorted.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    sorted.truncate(n);
    sorted
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let args = CliArgs::parse();

    adpulse_core::config::load_dotenv();
    let mut config = Config::from_env();
    if let Some(path) = &args.thresholds {
        config.rules.thresholds_file = Some(path.clone());
    }

    let thresholds =
        resolve_thresholds(&config.rules).context("failed to resolve rule thresholds")?;
    let engine = RuleEngine::new(thresholds)?;
    let builder = BundleBuilder::new(config.rules.daily_budget)
        .with_windows(WindowConfig::from_config(&config.ingest));
    debug!(?thresholds, profile = config.profile_label(), "engine ready");

    let terminal = Terminal::new(!args.no_color && std::io::stdout().is_terminal());

    let evaluation = match args.command {
        Command::Thresholds => {
            return match args.format {
                OutputFormat::Json => terminal.print_json(engine.thresholds()),
                OutputFormat::Text => {
                    terminal.print_lines(&render::threshold_lines(engine.thresholds()))
                }
            };
        }
        Command::Evaluate { bundle } => evaluate(&engine, read_bundle(&bundle)?, None)?,
        Command::Rows { file, budget } => {
            let rows = RowImporter::import(&file)
                .with_context(|| format!("failed to import {}", file.display()))?;
            let builder = match budget {
                Some(b) => builder.with_budget(b),
                None => builder,
            };
            let built = builder.build(&rows)?;
            evaluate(&engine, built.bundle, Some(built.live))?
        }
        Command::Simulate {
            scenario,
            seed,
            show_rows,
        } => {
            let rows = generate_seeded(scenario, Utc::now(), seed);
            let built = builder.build(&rows)?;
            let mut evaluation = evaluate(&engine, built.bundle, Some(built.live))?;
            evaluation.scenario = Some(scenario);
            evaluation.recent_rows = newest(&rows, show_rows);
            evaluation
        }
    };

    match args.format {
        OutputFormat::Json => terminal.print_json(&evaluation),
        OutputFormat::Text => terminal.print_lines(&render::evaluation_lines(&evaluation)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    #[test]
    fn newest_rows_first() {
        let end = Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap();
        let rows: Vec<MetricRecord> = (0..5)
            .map(|i| MetricRecord {
                timestamp: end - Duration::minutes(15 * i),
                spend: i as f64,
                impressions: 1.0,
                clicks: 0.0,
                conversions: 0,
            })
            .rev()
            .collect();
        let shown = newest(&rows, 2);
        assert_eq!(shown.len(), 2);
        assert_eq!(shown[0].timestamp, end);
        assert_eq!(shown[1].spend, 1.0);
        assert!(newest(&rows, 0).is_empty());
    }

    #[test]
    fn reads_bundle_file() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        std::io::Write::write_all(
            &mut file,
            br#"{"spend_last_4h":6000,"conversions_last_4h":0,"daily_spend":1,"daily_budget":2,
                "current_cpm":1,"average_cpm":1,"current_ctr":1,"average_ctr":1}"#,
        )
        .unwrap();
        let path = file.path();
        let bundle = read_bundle(path).unwrap();
        assert_eq!(bundle.spend_last_4h, 6000.0);

        let evaluation = evaluate(&RuleEngine::default(), bundle, None).unwrap();
        assert_eq!(evaluation.alerts.len(), 1);
        assert_eq!(evaluation.evidence.len(), 4);
    }
}

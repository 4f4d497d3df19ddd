//! Evaluate an offering at a chosen amount and report the results
//!
//! Loads scenario definitions from JSON (or falls back to the built-in
//! offering), evaluates the selected view, and prints a table or a JSON
//! response for API integration. Optionally writes the focused scenario's
//! schedule as CSV.

use anyhow::Context;
use clap::Parser;
use roi_engine::export::{csv_filename, format_aed, schedule_csv};
use roi_engine::schedule::DEFAULT_SCENARIOS_PATH;
use roi_engine::{Evaluation, ScenarioRunner, ScenarioView};
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "roi_report", about = "Evaluate investment scenarios at a target amount")]
struct Args {
    /// Scenario definitions JSON; defaults to data/roi-scenarios.json,
    /// or the built-in offering when that file is absent
    #[arg(long)]
    scenarios: Option<PathBuf>,

    /// Target investment amount in AED
    #[arg(long, default_value_t = 50_000.0)]
    amount: f64,

    /// Scenario view: conservative, realistic, optimistic, or all
    #[arg(long, default_value = "realistic")]
    view: ScenarioView,

    /// Write the focused scenario's schedule CSV to this directory
    #[arg(long)]
    csv_dir: Option<PathBuf>,

    /// Emit the full report as JSON instead of a table
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct Report {
    amount: f64,
    view: String,
    evaluations: Vec<Evaluation>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let runner = match &args.scenarios {
        Some(path) => ScenarioRunner::from_json_path(path)
            .with_context(|| format!("loading scenarios from {}", path.display()))?,
        None if Path::new(DEFAULT_SCENARIOS_PATH).exists() => {
            ScenarioRunner::from_default_json().context("loading default scenario definitions")?
        }
        None => ScenarioRunner::new(),
    };

    let evaluations = runner.run(args.view, args.amount)?;

    if args.json {
        let report = Report {
            amount: args.amount,
            view: format!("{:?}", args.view).to_lowercase(),
            evaluations,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Amount: {}\n", format_aed(args.amount));
        for eval in &evaluations {
            let rate = eval
                .rate
                .map(|r| format!("{:.2}%", r * 100.0))
                .unwrap_or_else(|| "—".to_string());
            let moic = eval
                .moic
                .map(|m| format!("{:.2}x", m))
                .unwrap_or_else(|| "—".to_string());
            let payback = eval
                .payback_date
                .map(|d| d.to_string())
                .unwrap_or_else(|| "not reached".to_string());
            println!(
                "{:<14} XIRR {:>8}  MOIC {:>6}  Net {:>14}  Payback {}",
                eval.label,
                rate,
                moic,
                format_aed(eval.net_profit),
                payback,
            );
        }
    }

    if let Some(dir) = &args.csv_dir {
        let key = args.view.anchor();
        let eval = runner.evaluate_scenario(key, args.amount)?;
        let path = dir.join(csv_filename(key));
        std::fs::write(&path, schedule_csv(&eval.rows))
            .with_context(|| format!("writing {}", path.display()))?;
        eprintln!("CSV written to {}", path.display());
    }

    Ok(())
}

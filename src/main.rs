//! ROI Engine CLI
//!
//! Runs the built-in offering at a sample amount and prints the evaluation

use roi_engine::export::{format_aed, format_aed_cents, schedule_csv};
use roi_engine::{ScenarioRunner, ScenarioView};
use std::fs::File;
use std::io::Write;

fn main() {
    env_logger::init();

    println!("ROI Engine v0.1.0");
    println!("=================\n");

    let amount = 100_000.0;
    let view = ScenarioView::All;

    let runner = ScenarioRunner::new();
    let evals = runner.run(view, amount).expect("amount is positive");

    println!("Investment amount: {}", format_aed(amount));
    println!();

    // KPI comparison across scenarios
    println!(
        "{:<14} {:>9} {:>7} {:>16} {:>16} {:>12}",
        "Scenario", "XIRR", "MOIC", "Invested", "Returned", "Payback"
    );
    println!("{}", "-".repeat(80));
    for eval in &evals {
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
            "{:<14} {:>9} {:>7} {:>16} {:>16} {:>12}",
            eval.label,
            rate,
            moic,
            format_aed(eval.total_invested),
            format_aed(eval.total_returned),
            payback,
        );
    }

    // Milestone schedule for the focused scenario
    let anchor = runner
        .evaluate_scenario(view.anchor(), amount)
        .expect("amount is positive");
    println!("\nSchedule — {}:", anchor.label);
    println!(
        "{:>12} {:>16} {:>16}  {}",
        "Date", "Cash Flow", "Cumulative", "Milestone"
    );
    println!("{}", "-".repeat(80));
    for row in &anchor.rows {
        let amount_str = if row.amount == 0.0 {
            "—".to_string()
        } else {
            format_aed_cents(row.amount)
        };
        println!(
            "{:>12} {:>16} {:>16}  {}",
            row.date.to_string(),
            amount_str,
            format_aed_cents(row.cumulative),
            row.note.as_deref().unwrap_or(""),
        );
    }

    println!("\nNet profit ({}): {}", anchor.label, format_aed(anchor.net_profit));

    // Write the focused scenario's schedule to CSV
    let csv_path = "roi_schedule.csv";
    let mut file = File::create(csv_path).expect("Unable to create CSV file");
    write!(file, "{}", schedule_csv(&anchor.rows)).expect("Unable to write CSV file");
    println!("Schedule written to: {}", csv_path);
}

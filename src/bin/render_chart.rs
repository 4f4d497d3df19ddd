//! Render the scenario-comparison chart as a standalone SVG
//!
//! Exercises the chart projection end to end: shared axes across all three
//! scenarios, break-even reference line, one polyline per scenario.

use anyhow::Context;
use clap::Parser;
use roi_engine::schedule::DEFAULT_SCENARIOS_PATH;
use roi_engine::{ChartGeometry, ChartProjection, ScenarioRunner, ScenarioView};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "render_chart", about = "Render the cumulative cash-flow chart as SVG")]
struct Args {
    /// Scenario definitions JSON; defaults to data/roi-scenarios.json,
    /// or the built-in offering when that file is absent
    #[arg(long)]
    scenarios: Option<PathBuf>,

    /// Target investment amount in AED
    #[arg(long, default_value_t = 50_000.0)]
    amount: f64,

    /// Output SVG path
    #[arg(long, default_value = "roi_chart.svg")]
    out: PathBuf,
}

const COLORS: [&str; 3] = ["#8a8f98", "#c6a15b", "#4f7a5a"];

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

    let evals = runner.run(ScenarioView::All, args.amount)?;
    let refs: Vec<_> = evals.iter().collect();
    let geometry = ChartGeometry::default();
    let proj = ChartProjection::fit(geometry, &refs);

    let mut svg = String::new();
    writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {} {}">"#,
        geometry.width, geometry.height
    )?;

    // Axes and break-even line
    let plot_bottom = geometry.height - geometry.axis_pad;
    writeln!(
        svg,
        r##"  <line x1="{}" y1="{}" x2="{}" y2="{}" stroke="#444" stroke-width="2"/>"##,
        geometry.pad,
        plot_bottom,
        geometry.width - geometry.pad,
        plot_bottom
    )?;
    writeln!(
        svg,
        r##"  <line x1="{}" y1="{}" x2="{}" y2="{}" stroke="#444" stroke-width="1"/>"##,
        geometry.pad, geometry.pad, geometry.pad, plot_bottom
    )?;
    writeln!(
        svg,
        r##"  <line x1="{}" y1="{:.2}" x2="{}" y2="{:.2}" stroke="#888" stroke-width="1.5" stroke-dasharray="4,4"/>"##,
        geometry.pad,
        proj.zero_line_y(),
        geometry.width - geometry.pad,
        proj.zero_line_y()
    )?;

    // One polyline per scenario, points marked
    for (eval, color) in evals.iter().zip(COLORS) {
        let points = proj.project(eval);
        writeln!(
            svg,
            r#"  <path d="{}" fill="none" stroke="{}" stroke-width="2.25" stroke-linecap="round" stroke-linejoin="round"/>"#,
            ChartProjection::path_data(&points),
            color
        )?;
        for p in &points {
            writeln!(
                svg,
                r#"  <circle cx="{:.2}" cy="{:.2}" r="3.5" fill="{}" stroke="white" stroke-width="1.5"/>"#,
                p.x, p.y, color
            )?;
        }
    }

    // Thinned x-axis date labels, anchored on the focused scenario
    let anchor = runner.evaluate_scenario(ScenarioView::All.anchor(), args.amount)?;
    let step = proj.label_step(anchor.rows.len());
    for (i, row) in anchor.rows.iter().enumerate() {
        if i % step != 0 && i != anchor.rows.len() - 1 {
            continue;
        }
        writeln!(
            svg,
            r##"  <text x="{:.2}" y="{:.2}" text-anchor="middle" font-size="11" fill="#666">{}</text>"##,
            proj.x_for(row.months_from_start),
            plot_bottom + 18.0,
            row.date.format("%b %y")
        )?;
    }

    writeln!(svg, "</svg>")?;

    std::fs::write(&args.out, svg).with_context(|| format!("writing {}", args.out.display()))?;
    println!("Chart written to {}", args.out.display());

    Ok(())
}

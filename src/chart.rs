//! Chart projection for cumulative cash-flow series
//!
//! Maps evaluated (elapsed months, cumulative balance) pairs onto a fixed
//! canvas. All displayed scenarios share one set of axis bounds so the
//! comparison view lines up on a common time axis and value range.

use crate::evaluation::Evaluation;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Minimum value span; a flat or single-point series must not divide by zero
const MIN_SPAN: f64 = 1e-9;

/// Approximate rendered width of one x-axis date label, in pixels
const LABEL_WIDTH: f64 = 70.0;

/// Canvas dimensions and padding
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ChartGeometry {
    pub width: f64,
    pub height: f64,
    /// Padding on all sides of the plot area
    pub pad: f64,
    /// Extra space reserved below the plot for the x-axis labels
    pub axis_pad: f64,
}

impl Default for ChartGeometry {
    fn default() -> Self {
        Self {
            width: 900.0,
            height: 320.0,
            pad: 56.0,
            axis_pad: 40.0,
        }
    }
}

/// One projected point, keeping its source row data for labels/tooltips
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartPoint {
    pub x: f64,
    pub y: f64,
    pub date: NaiveDate,
    pub cumulative: f64,
}

/// Shared linear projection for one or more evaluations
#[derive(Debug, Clone)]
pub struct ChartProjection {
    pub geometry: ChartGeometry,
    /// Horizontal axis span: max elapsed months across all displayed series
    pub max_months: f64,
    /// Vertical bounds, always padded to include zero
    pub min_cumulative: f64,
    pub max_cumulative: f64,
    y_span: f64,
}

impl ChartProjection {
    /// Derive shared axis bounds from every evaluation being displayed
    pub fn fit(geometry: ChartGeometry, evaluations: &[&Evaluation]) -> Self {
        let mut max_months = 1.0_f64;
        let mut min_cum = 0.0_f64;
        let mut max_cum = 0.0_f64;

        for eval in evaluations {
            for row in &eval.rows {
                max_months = max_months.max(row.months_from_start);
                min_cum = min_cum.min(row.cumulative);
                max_cum = max_cum.max(row.cumulative);
            }
        }

        Self {
            geometry,
            max_months,
            min_cumulative: min_cum,
            max_cumulative: max_cum,
            y_span: (max_cum - min_cum).max(MIN_SPAN),
        }
    }

    /// Map elapsed months onto the horizontal pixel range
    pub fn x_for(&self, months: f64) -> f64 {
        let g = &self.geometry;
        g.pad + (months / self.max_months) * (g.width - 2.0 * g.pad)
    }

    /// Map a cumulative balance onto the vertical pixel range
    pub fn y_for(&self, value: f64) -> f64 {
        let g = &self.geometry;
        let t = (value - self.min_cumulative) / self.y_span;
        g.pad + (1.0 - t) * (g.height - 2.0 * g.pad - g.axis_pad)
    }

    /// Pixel y of the break-even (zero balance) reference line
    pub fn zero_line_y(&self) -> f64 {
        self.y_for(0.0)
    }

    /// Project every row of an evaluation into chart coordinates
    pub fn project(&self, evaluation: &Evaluation) -> Vec<ChartPoint> {
        evaluation
            .rows
            .iter()
            .map(|row| ChartPoint {
                x: self.x_for(row.months_from_start),
                y: self.y_for(row.cumulative),
                date: row.date,
                cumulative: row.cumulative,
            })
            .collect()
    }

    /// SVG line-path data ("M x y L x y ...") for a projected series
    pub fn path_data(points: &[ChartPoint]) -> String {
        points
            .iter()
            .enumerate()
            .map(|(i, p)| {
                let cmd = if i == 0 { "M" } else { "L" };
                format!("{} {:.2} {:.2}", cmd, p.x, p.y)
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Label thinning: draw every n-th x-axis date label so labels of
    /// ~LABEL_WIDTH px never overlap
    pub fn label_step(&self, n_rows: usize) -> usize {
        let g = &self.geometry;
        let max_labels = (((g.width - 2.0 * g.pad) / LABEL_WIDTH).floor() as usize).max(3);
        ((n_rows + max_labels - 1) / max_labels).max(1)
    }
}

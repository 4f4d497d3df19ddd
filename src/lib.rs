//! ROI Engine - Cash-flow return engine for scenario-based investment offerings
//!
//! This library provides:
//! - Dated cash-flow schedules defined at a fixed reference ticket, with
//!   linear scaling to an investor's chosen amount
//! - An annualized XIRR solver (Newton-Raphson with bisection fallback)
//! - Schedule evaluation (cumulative balance, MOIC, net profit, payback date)
//! - Chart projection of cumulative series into 2D plotting coordinates
//! - CSV export and AED display formatting

pub mod schedule;
pub mod evaluation;
pub mod chart;
pub mod export;
pub mod runner;

// Re-export commonly used types
pub use schedule::{CashFlowEvent, Schedule, ScaledSchedule, ScenarioKey, ScenarioSet};
pub use evaluation::{evaluate, Evaluation, EvaluatedRow};
pub use chart::{ChartGeometry, ChartPoint, ChartProjection};
pub use runner::{ScenarioRunner, ScenarioView};

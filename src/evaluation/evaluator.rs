//! Schedule evaluation: cumulative balance, totals, MOIC, XIRR, payback
//!
//! Evaluation is a pure function from (schedule, target amount) to an
//! immutable result; nothing is cached or mutated between calls, so every
//! input change simply recomputes from scratch.

use super::xirr::xirr;
use crate::schedule::{ScaledSchedule, Schedule};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Average Gregorian month in days, used for chart elapsed-time labeling.
/// The XIRR solver uses a fixed 365-day year instead; both conventions are
/// kept to match the published calculator's figures.
const DAYS_PER_MONTH: f64 = 365.2425 / 12.0;

/// One evaluated schedule row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluatedRow {
    pub date: NaiveDate,
    /// Scaled signed amount (AED)
    pub amount: f64,
    pub note: Option<String>,
    /// Running sum of scaled amounts up to and including this row
    pub cumulative: f64,
    /// Elapsed time from the schedule's first event, in fractional months.
    /// Charting only; the rate computation never uses this.
    pub months_from_start: f64,
}

/// Complete evaluation of one scenario at one target amount
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Evaluation {
    pub label: String,
    pub rows: Vec<EvaluatedRow>,

    /// Sum of absolute values of all outflows (AED)
    pub total_invested: f64,
    /// Sum of all inflows (AED)
    pub total_returned: f64,
    pub net_profit: f64,

    /// Multiple on invested capital; `None` when nothing was invested
    pub moic: Option<f64>,
    /// Annualized XIRR; `None` when no rate is defined
    pub rate: Option<f64>,
    /// First date the cumulative balance turns non-negative; `None` if the
    /// schedule never recovers the invested capital
    pub payback_date: Option<NaiveDate>,
}

/// Evaluate a schedule at the given target investment amount
pub fn evaluate(schedule: &Schedule, target_amount: f64) -> Evaluation {
    evaluate_scaled(&schedule.scale(target_amount))
}

/// Evaluate an already-scaled schedule
pub fn evaluate_scaled(scaled: &ScaledSchedule) -> Evaluation {
    let t0 = scaled.events.first().map(|e| e.date);

    let mut cumulative = 0.0;
    let mut rows = Vec::with_capacity(scaled.events.len());
    for event in &scaled.events {
        cumulative += event.amount;
        let months = t0
            .map(|start| (event.date - start).num_days() as f64 / DAYS_PER_MONTH)
            .unwrap_or(0.0)
            .max(0.0);
        rows.push(EvaluatedRow {
            date: event.date,
            amount: event.amount,
            note: event.note.clone(),
            cumulative,
            months_from_start: months,
        });
    }

    // Zero-amount milestone rows count toward neither total
    let total_invested: f64 = rows
        .iter()
        .filter(|r| r.amount < 0.0)
        .map(|r| r.amount.abs())
        .sum();
    let total_returned: f64 = rows.iter().filter(|r| r.amount > 0.0).map(|r| r.amount).sum();
    let net_profit = total_returned - total_invested;

    let moic = if total_invested != 0.0 {
        Some(total_returned / total_invested)
    } else {
        None
    };

    let flows: Vec<(NaiveDate, f64)> = rows.iter().map(|r| (r.date, r.amount)).collect();
    let rate = xirr(&flows);

    let payback_date = rows.iter().find(|r| r.cumulative >= 0.0).map(|r| r.date);

    Evaluation {
        label: scaled.label.clone(),
        rows,
        total_invested,
        total_returned,
        net_profit,
        moic,
        rate,
        payback_date,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::{CashFlowEvent, ScenarioSet, Schedule, REFERENCE_TICKET};
    use approx::assert_relative_eq;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn schedule(events: Vec<(NaiveDate, f64)>) -> Schedule {
        Schedule::new(
            "Test",
            events
                .into_iter()
                .map(|(date, amount)| CashFlowEvent {
                    date,
                    amount_for_50k: amount,
                    note: None,
                })
                .collect(),
        )
    }

    #[test]
    fn test_cumulative_construction() {
        let eval = evaluate(
            &ScenarioSet::default_offering().realistic,
            REFERENCE_TICKET,
        );
        let mut prev = 0.0;
        for row in &eval.rows {
            assert_relative_eq!(row.cumulative, prev + row.amount, max_relative = 1e-12);
            prev = row.cumulative;
        }
    }

    #[test]
    fn test_payback_boundary() {
        // Cumulative runs -100, -50, +10; payback is the day-60 event
        let s = schedule(vec![
            (d(2025, 1, 1), -100.0),
            (d(2025, 1, 31), 50.0),
            (d(2025, 3, 2), 60.0),
        ]);
        let eval = evaluate(&s, REFERENCE_TICKET);

        assert_relative_eq!(eval.rows[0].cumulative, -100.0);
        assert_relative_eq!(eval.rows[1].cumulative, -50.0);
        assert_relative_eq!(eval.rows[2].cumulative, 10.0);
        assert_eq!(eval.payback_date, Some(d(2025, 3, 2)));
    }

    #[test]
    fn test_payback_never_reached() {
        let s = schedule(vec![(d(2025, 1, 1), -100.0), (d(2026, 1, 1), 40.0)]);
        let eval = evaluate(&s, REFERENCE_TICKET);
        assert_eq!(eval.payback_date, None);
    }

    #[test]
    fn test_moic_consistency() {
        let eval = evaluate(&ScenarioSet::default_offering().optimistic, 200_000.0);
        let moic = eval.moic.expect("invested is non-zero");
        assert_relative_eq!(
            eval.total_returned,
            eval.total_invested * moic,
            max_relative = 1e-12
        );
        assert_relative_eq!(
            eval.net_profit,
            eval.total_returned - eval.total_invested,
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_moic_undefined_when_nothing_invested() {
        let s = schedule(vec![(d(2025, 1, 1), 100.0), (d(2026, 1, 1), 50.0)]);
        let eval = evaluate(&s, REFERENCE_TICKET);
        assert!(eval.moic.is_none());
        assert!(eval.rate.is_none()); // no sign variation either
        assert_relative_eq!(eval.total_invested, 0.0);
    }

    #[test]
    fn test_zero_amount_rows_kept_but_excluded_from_totals() {
        let s = schedule(vec![
            (d(2025, 1, 1), -100.0),
            (d(2025, 6, 1), 0.0),
            (d(2026, 1, 1), 120.0),
        ]);
        let eval = evaluate(&s, REFERENCE_TICKET);
        assert_eq!(eval.rows.len(), 3);
        assert_relative_eq!(eval.total_invested, 100.0);
        assert_relative_eq!(eval.total_returned, 120.0);
    }

    #[test]
    fn test_empty_schedule_is_inert() {
        let eval = evaluate(&schedule(vec![]), REFERENCE_TICKET);
        assert!(eval.rows.is_empty());
        assert!(eval.moic.is_none());
        assert!(eval.rate.is_none());
        assert!(eval.payback_date.is_none());
        assert_relative_eq!(eval.net_profit, 0.0);
    }

    #[test]
    fn test_months_from_start() {
        let s = schedule(vec![(d(2025, 1, 1), -100.0), (d(2026, 1, 1), 110.0)]);
        let eval = evaluate(&s, REFERENCE_TICKET);
        assert_relative_eq!(eval.rows[0].months_from_start, 0.0);
        // 365 days at the average Gregorian month length
        assert_relative_eq!(
            eval.rows[1].months_from_start,
            365.0 / (365.2425 / 12.0),
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_scaling_scales_totals_linearly() {
        let base = evaluate(&ScenarioSet::default_offering().conservative, 50_000.0);
        let scaled = evaluate(&ScenarioSet::default_offering().conservative, 150_000.0);
        assert_relative_eq!(
            scaled.total_invested,
            base.total_invested * 3.0,
            max_relative = 1e-12
        );
        assert_relative_eq!(
            scaled.total_returned,
            base.total_returned * 3.0,
            max_relative = 1e-12
        );
        // Rate is scale-invariant
        assert!((scaled.rate.unwrap() - base.rate.unwrap()).abs() < 1e-9);
    }
}

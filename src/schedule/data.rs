//! Cash-flow schedule data model
//!
//! Schedules are defined at a fixed reference ticket (AED 50,000) and scaled
//! linearly to the investor's chosen amount before evaluation.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Reference investment size all schedule amounts are defined against (AED)
pub const REFERENCE_TICKET: f64 = 50_000.0;

/// A single dated cash-flow milestone, signed from the investor's perspective
/// (negative = capital out, positive = payout back). Amounts are defined at
/// the reference ticket, not the investor's amount.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CashFlowEvent {
    pub date: NaiveDate,
    /// Signed amount at the AED 50,000 reference ticket
    #[serde(rename = "amountFor50k")]
    pub amount_for_50k: f64,
    /// Milestone description (e.g. "Initial Investment Deposit")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl CashFlowEvent {
    pub fn new(date: NaiveDate, amount_for_50k: f64, note: impl Into<String>) -> Self {
        Self {
            date,
            amount_for_50k,
            note: Some(note.into()),
        }
    }
}

/// A named scenario: an ordered sequence of cash-flow events
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Schedule {
    pub label: String,
    #[serde(rename = "cashFlows")]
    pub events: Vec<CashFlowEvent>,
}

impl Schedule {
    pub fn new(label: impl Into<String>, events: Vec<CashFlowEvent>) -> Self {
        Self {
            label: label.into(),
            events,
        }
    }

    /// Scale every event to `target_amount` and sort ascending by date.
    ///
    /// The scaling is a pure linear transform of the reference amounts; no
    /// rounding happens here so downstream aggregation does not compound
    /// rounding error across many small payouts. The sort is stable, so
    /// events on the same date keep their input order.
    pub fn scale(&self, target_amount: f64) -> ScaledSchedule {
        let factor = target_amount / REFERENCE_TICKET;

        let mut events: Vec<ScaledEvent> = self
            .events
            .iter()
            .map(|e| ScaledEvent {
                date: e.date,
                amount: e.amount_for_50k * factor,
                note: e.note.clone(),
            })
            .collect();
        events.sort_by_key(|e| e.date);

        ScaledSchedule {
            label: self.label.clone(),
            events,
        }
    }
}

/// A schedule event after scaling to the target investment amount
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScaledEvent {
    pub date: NaiveDate,
    pub amount: f64,
    pub note: Option<String>,
}

/// A schedule scaled to a target amount, sorted ascending by date.
/// Ephemeral: rebuilt from the `Schedule` on every evaluation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScaledSchedule {
    pub label: String,
    pub events: Vec<ScaledEvent>,
}

/// The three return assumptions offered for comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScenarioKey {
    Conservative,
    Realistic,
    Optimistic,
}

impl ScenarioKey {
    pub const ALL: [ScenarioKey; 3] = [
        ScenarioKey::Conservative,
        ScenarioKey::Realistic,
        ScenarioKey::Optimistic,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ScenarioKey::Conservative => "conservative",
            ScenarioKey::Realistic => "realistic",
            ScenarioKey::Optimistic => "optimistic",
        }
    }
}

impl std::fmt::Display for ScenarioKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Container for the full scenario offering
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioSet {
    pub conservative: Schedule,
    pub realistic: Schedule,
    pub optimistic: Schedule,
}

impl ScenarioSet {
    pub fn get(&self, key: ScenarioKey) -> &Schedule {
        match key {
            ScenarioKey::Conservative => &self.conservative,
            ScenarioKey::Realistic => &self.realistic,
            ScenarioKey::Optimistic => &self.optimistic,
        }
    }

    /// Built-in offering matching the published AED 50k schedules.
    /// Used by the binaries and tests so no external JSON is required.
    pub fn default_offering() -> Self {
        let d = |y, m, dd| NaiveDate::from_ymd_opt(y, m, dd).unwrap();

        let conservative = Schedule::new(
            "Conservative",
            vec![
                CashFlowEvent::new(d(2025, 10, 1), -50_000.0, "Initial Investment Deposit"),
                CashFlowEvent::new(d(2026, 4, 1), 0.0, "Construction Milestone 40%"),
                CashFlowEvent::new(d(2026, 10, 1), 0.0, "Handover"),
                CashFlowEvent::new(d(2027, 1, 1), 1_500.0, "Quarterly Rental Payout"),
                CashFlowEvent::new(d(2027, 4, 1), 1_500.0, "Quarterly Rental Payout"),
                CashFlowEvent::new(d(2027, 7, 1), 1_500.0, "Quarterly Rental Payout"),
                CashFlowEvent::new(d(2027, 10, 1), 1_500.0, "Quarterly Rental Payout"),
                CashFlowEvent::new(d(2028, 10, 1), 56_500.0, "Exit Sale Proceeds"),
            ],
        );

        let realistic = Schedule::new(
            "Realistic",
            vec![
                CashFlowEvent::new(d(2025, 10, 1), -50_000.0, "Initial Investment Deposit"),
                CashFlowEvent::new(d(2026, 4, 1), 0.0, "Construction Milestone 40%"),
                CashFlowEvent::new(d(2026, 10, 1), 0.0, "Handover"),
                CashFlowEvent::new(d(2027, 1, 1), 2_000.0, "Quarterly Rental Payout"),
                CashFlowEvent::new(d(2027, 4, 1), 2_000.0, "Quarterly Rental Payout"),
                CashFlowEvent::new(d(2027, 7, 1), 2_000.0, "Quarterly Rental Payout"),
                CashFlowEvent::new(d(2027, 10, 1), 2_000.0, "Quarterly Rental Payout"),
                CashFlowEvent::new(d(2028, 10, 1), 62_000.0, "Exit Sale Proceeds"),
            ],
        );

        let optimistic = Schedule::new(
            "Optimistic",
            vec![
                CashFlowEvent::new(d(2025, 10, 1), -50_000.0, "Initial Investment Deposit"),
                CashFlowEvent::new(d(2026, 4, 1), 0.0, "Construction Milestone 40%"),
                CashFlowEvent::new(d(2026, 10, 1), 0.0, "Handover"),
                CashFlowEvent::new(d(2027, 1, 1), 2_500.0, "Quarterly Rental Payout"),
                CashFlowEvent::new(d(2027, 4, 1), 2_500.0, "Quarterly Rental Payout"),
                CashFlowEvent::new(d(2027, 7, 1), 2_500.0, "Quarterly Rental Payout"),
                CashFlowEvent::new(d(2027, 10, 1), 2_500.0, "Quarterly Rental Payout"),
                CashFlowEvent::new(d(2028, 10, 1), 70_000.0, "Exit Sale Proceeds"),
            ],
        );

        Self {
            conservative,
            realistic,
            optimistic,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_scaling_linearity() {
        let schedule = ScenarioSet::default_offering().realistic;
        let at_100k = schedule.scale(100_000.0);
        let at_250k = schedule.scale(250_000.0);

        for (a, b) in at_100k.events.iter().zip(at_250k.events.iter()) {
            assert_relative_eq!(b.amount, a.amount * 2.5, max_relative = 1e-12);
        }
    }

    #[test]
    fn test_scale_at_reference_is_identity() {
        let schedule = ScenarioSet::default_offering().conservative;
        let scaled = schedule.scale(REFERENCE_TICKET);
        for (orig, scaled) in schedule.events.iter().zip(scaled.events.iter()) {
            assert_relative_eq!(scaled.amount, orig.amount_for_50k, max_relative = 1e-12);
        }
    }

    #[test]
    fn test_scale_sorts_by_date_stably() {
        let schedule = Schedule::new(
            "Unordered",
            vec![
                CashFlowEvent::new(d(2026, 6, 1), 200.0, "later"),
                CashFlowEvent::new(d(2025, 1, 1), -50_000.0, "deposit"),
                CashFlowEvent::new(d(2026, 6, 1), 300.0, "same day, second"),
            ],
        );
        let scaled = schedule.scale(REFERENCE_TICKET);

        assert_eq!(scaled.events[0].date, d(2025, 1, 1));
        // Duplicate dates keep input order
        assert_eq!(scaled.events[1].amount, 200.0);
        assert_eq!(scaled.events[2].amount, 300.0);
    }

    #[test]
    fn test_scaling_preserves_sign() {
        let schedule = ScenarioSet::default_offering().optimistic;
        let scaled = schedule.scale(750_000.0);
        for (orig, scaled) in schedule.events.iter().zip(scaled.events.iter()) {
            assert_eq!(
                orig.amount_for_50k.signum(),
                scaled.amount.signum(),
                "sign flipped for {:?}",
                orig.note
            );
        }
    }
}

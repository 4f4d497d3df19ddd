//! Annualized internal rate of return for irregularly dated cash flows (XIRR)
//!
//! Solves for the rate that zeroes the net present value of the flows,
//! using the Newton-Raphson method with a bisection fallback.

use chrono::NaiveDate;

/// Initial Newton-Raphson guess (15% annual)
pub const DEFAULT_GUESS: f64 = 0.15;

/// Fixed-length year used for elapsed-time discounting
const DAYS_PER_YEAR: f64 = 365.0;

const TOLERANCE: f64 = 1e-7;
const MAX_ITERATIONS: usize = 100;

/// Bisection fallback bounds: -99% to +1000% annual
const RATE_LOW: f64 = -0.99;
const RATE_HIGH: f64 = 10.0;

/// Calculate the annualized XIRR for a series of dated cash flows.
///
/// # Arguments
/// * `flows` - `(date, amount)` pairs; positive = inflow to the investor,
///   negative = outflow. Order does not matter; zero amounts are harmless.
///
/// # Returns
/// * `Option<f64>` - Annual rate as a decimal (0.10 for 10%), or `None` when
///   no rate is defined (fewer than 2 flows, no sign variation, or the
///   iteration produced a non-finite candidate).
pub fn xirr(flows: &[(NaiveDate, f64)]) -> Option<f64> {
    xirr_with_guess(flows, DEFAULT_GUESS)
}

/// XIRR with an explicit starting guess
pub fn xirr_with_guess(flows: &[(NaiveDate, f64)], guess: f64) -> Option<f64> {
    if flows.len() < 2 {
        return None;
    }

    // A root only exists with at least one inflow and one outflow
    let has_positive = flows.iter().any(|&(_, a)| a > 0.0);
    let has_negative = flows.iter().any(|&(_, a)| a < 0.0);
    if !has_positive || !has_negative {
        return None;
    }

    // Elapsed time is measured from the earliest flow
    let t0 = flows.iter().map(|&(d, _)| d).min()?;
    let years: Vec<(f64, f64)> = flows
        .iter()
        .map(|&(d, a)| ((d - t0).num_days() as f64 / DAYS_PER_YEAR, a))
        .collect();

    let mut rate = guess;
    for _ in 0..MAX_ITERATIONS {
        let (npv, dnpv) = npv_and_derivative(&years, rate);

        // Converged, or the derivative stalled; current rate is the answer
        if npv.abs() < TOLERANCE || dnpv.abs() < TOLERANCE {
            return Some(rate);
        }

        let new_rate = rate - npv / dnpv;
        if !new_rate.is_finite() {
            return None;
        }
        if (new_rate - rate).abs() < TOLERANCE {
            return Some(new_rate);
        }

        rate = new_rate;
    }

    // Newton-Raphson didn't converge; try bisection over a sane rate range,
    // falling back to the last iterate (best-effort) if no bracket exists
    bisect(&years).or(Some(rate))
}

/// NPV and its derivative with respect to rate, over (years, amount) pairs
fn npv_and_derivative(years: &[(f64, f64)], rate: f64) -> (f64, f64) {
    let mut npv = 0.0;
    let mut dnpv = 0.0;

    for &(t, amount) in years {
        let discount = (1.0 + rate).powf(t);
        npv += amount / discount;
        dnpv += (-t * amount) / (discount * (1.0 + rate));
    }

    (npv, dnpv)
}

fn npv_at_rate(years: &[(f64, f64)], rate: f64) -> f64 {
    years
        .iter()
        .map(|&(t, amount)| amount / (1.0 + rate).powf(t))
        .sum()
}

/// Bisection fallback over [RATE_LOW, RATE_HIGH]
fn bisect(years: &[(f64, f64)]) -> Option<f64> {
    let mut low = RATE_LOW;
    let mut high = RATE_HIGH;

    let npv_low = npv_at_rate(years, low);
    let npv_high = npv_at_rate(years, high);
    if npv_low * npv_high > 0.0 {
        return None; // no root in this interval
    }

    for _ in 0..200 {
        let mid = (low + high) / 2.0;
        let npv_mid = npv_at_rate(years, mid);

        if npv_mid.abs() < TOLERANCE || (high - low) / 2.0 < TOLERANCE {
            return Some(mid);
        }

        if npv_mid * npv_at_rate(years, low) < 0.0 {
            high = mid;
        } else {
            low = mid;
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_single_round_trip() {
        // -100 today, +110 exactly 365 days later: 10% annual
        let flows = vec![(d(2025, 1, 1), -100.0), (d(2026, 1, 1), 110.0)];
        let rate = xirr(&flows).unwrap();
        assert!((rate - 0.10).abs() < 1e-4, "expected ~10%, got {}", rate);
    }

    #[test]
    fn test_negative_return() {
        let flows = vec![(d(2025, 1, 1), -1000.0), (d(2026, 1, 1), 900.0)];
        let rate = xirr(&flows).unwrap();
        assert!((rate + 0.10).abs() < 1e-3, "expected ~-10%, got {}", rate);
    }

    #[test]
    fn test_multiple_flows() {
        let flows = vec![
            (d(2025, 1, 1), -1000.0),
            (d(2025, 6, 1), -500.0),
            (d(2026, 1, 1), 1700.0),
        ];
        let rate = xirr(&flows).unwrap();
        assert!(rate > 0.10 && rate < 0.20, "got {}", rate);
    }

    #[test]
    fn test_unordered_input() {
        // Earliest date found regardless of order
        let flows = vec![(d(2026, 1, 1), 110.0), (d(2025, 1, 1), -100.0)];
        let rate = xirr(&flows).unwrap();
        assert!((rate - 0.10).abs() < 1e-4);
    }

    #[test]
    fn test_all_positive_is_undefined() {
        let flows = vec![(d(2025, 1, 1), 100.0), (d(2026, 1, 1), 110.0)];
        assert!(xirr(&flows).is_none());
    }

    #[test]
    fn test_all_negative_is_undefined() {
        let flows = vec![(d(2025, 1, 1), -100.0), (d(2026, 1, 1), -110.0)];
        assert!(xirr(&flows).is_none());
    }

    #[test]
    fn test_fewer_than_two_flows_is_undefined() {
        assert!(xirr(&[]).is_none());
        assert!(xirr(&[(d(2025, 1, 1), -100.0)]).is_none());
    }

    #[test]
    fn test_zero_amount_flows_do_not_change_rate() {
        let base = vec![(d(2025, 1, 1), -100.0), (d(2026, 1, 1), 110.0)];
        let with_zeros = vec![
            (d(2025, 1, 1), -100.0),
            (d(2025, 7, 1), 0.0),
            (d(2026, 1, 1), 110.0),
        ];
        let a = xirr(&base).unwrap();
        let b = xirr(&with_zeros).unwrap();
        assert!((a - b).abs() < 1e-9);
    }

    #[test]
    fn test_quarterly_payouts() {
        // -50k, four quarterly 2k payouts, 62k exit after 3 years
        let flows = vec![
            (d(2025, 10, 1), -50_000.0),
            (d(2027, 1, 1), 2_000.0),
            (d(2027, 4, 1), 2_000.0),
            (d(2027, 7, 1), 2_000.0),
            (d(2027, 10, 1), 2_000.0),
            (d(2028, 10, 1), 62_000.0),
        ];
        let rate = xirr(&flows).unwrap();
        // Roughly 13% annualized for this shape
        assert!(rate > 0.08 && rate < 0.20, "got {}", rate);
    }
}

//! CSV export and AED display formatting
//!
//! Pure formatting over evaluated rows; writing the output anywhere is the
//! caller's concern.

use crate::evaluation::EvaluatedRow;
use crate::schedule::ScenarioKey;

/// CSV header for an exported schedule
pub const CSV_HEADER: &str = "Date,Amount (AED),Cumulative (AED),Note";

/// Serialize evaluated rows to CSV: ISO dates, amounts at 2 decimal places,
/// note double-quoted with internal quotes doubled.
pub fn schedule_csv(rows: &[EvaluatedRow]) -> String {
    let mut out = String::from(CSV_HEADER);
    for row in rows {
        let note = row.note.as_deref().unwrap_or("").replace('"', "\"\"");
        out.push('\n');
        out.push_str(&format!(
            "{},{:.2},{:.2},\"{}\"",
            row.date.format("%Y-%m-%d"),
            row.amount,
            row.cumulative,
            note
        ));
    }
    out
}

/// Download filename for a scenario's exported schedule
pub fn csv_filename(key: ScenarioKey) -> String {
    format!("roi-schedule-{}.csv", key)
}

/// Format an AED amount with thousands grouping and no fraction digits
/// (headline KPI style, e.g. `AED 1,250,000`)
pub fn format_aed(amount: f64) -> String {
    let rounded = amount.round();
    let sign = if rounded < 0.0 { "-" } else { "" };
    format!("{}AED {}", sign, group_thousands(rounded.abs() as u64))
}

/// Format an AED amount with thousands grouping and two fraction digits
/// (schedule table style, e.g. `AED 1,250.50`)
pub fn format_aed_cents(amount: f64) -> String {
    let sign = if amount < 0.0 { "-" } else { "" };
    let abs = amount.abs();
    let whole = abs.trunc() as u64;
    let cents = ((abs - abs.trunc()) * 100.0).round() as u64;
    // Carry when the fractional part rounds up to a whole dirham
    let (whole, cents) = if cents == 100 { (whole + 1, 0) } else { (whole, cents) };
    format!("{}AED {}.{:02}", sign, group_thousands(whole), cents)
}

fn group_thousands(mut value: u64) -> String {
    let mut groups = Vec::new();
    loop {
        let group = value % 1000;
        value /= 1000;
        if value == 0 {
            groups.push(group.to_string());
            break;
        }
        groups.push(format!("{:03}", group));
    }
    groups.reverse();
    groups.join(",")
}

use chrono::NaiveDate;

use crate::portal::billing::{Invoice, InvoiceStatus, MonthlyRow};

/// Lookback window the heuristic reads.
pub(crate) const OBSERVATION_MONTHS: usize = 6;

/// Sentinel meaning no unpaid invoice exists, so there is no near-term
/// payment pressure.
pub(crate) const NO_DUE_PRESSURE_DAYS: i64 = 999;

/// Raw observations the score and recommendations are derived from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct RiskObservation {
    pub overdue_ratio: f64,
    pub payment_slope: f64,
    pub days_until_due: i64,
}

pub(crate) fn observe(
    rows: &[MonthlyRow],
    invoices: &[Invoice],
    today: NaiveDate,
) -> RiskObservation {
    let window = trailing_window(rows);

    let charges: u64 = window.iter().map(|row| row.charges).sum();
    let overdue: u64 = window.iter().map(|row| row.overdue).sum();
    let overdue_ratio = overdue as f64 / charges.max(1) as f64;

    let paid: Vec<f64> = window.iter().map(|row| row.paid as f64).collect();
    let payment_slope = least_squares_slope(&paid);

    let days_until_due = invoices
        .iter()
        .find(|invoice| invoice.status != InvoiceStatus::Paid)
        .map(|invoice| (invoice.due - today).num_days())
        .unwrap_or(NO_DUE_PRESSURE_DAYS);

    RiskObservation {
        overdue_ratio,
        payment_slope,
        days_until_due,
    }
}

fn trailing_window(rows: &[MonthlyRow]) -> &[MonthlyRow] {
    &rows[rows.len().saturating_sub(OBSERVATION_MONTHS)..]
}

/// Ordinary-least-squares slope of `values` indexed 1..=n, with the
/// denominator guarded to at least 1. Fewer than two points is flat.
pub(crate) fn least_squares_slope(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }

    let n = values.len() as f64;
    let mut sum_x = 0.0;
    let mut sum_y = 0.0;
    let mut sum_xy = 0.0;
    let mut sum_x2 = 0.0;
    for (index, value) in values.iter().enumerate() {
        let x = (index + 1) as f64;
        sum_x += x;
        sum_y += value;
        sum_xy += x * value;
        sum_x2 += x * x;
    }

    (n * sum_xy - sum_x * sum_y) / (n * sum_x2 - sum_x * sum_x).max(1.0)
}

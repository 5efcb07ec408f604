use serde::{Deserialize, Serialize};

use crate::export::{csv_with_bom, ExportError};

use super::domain::MonthlyRow;

/// Trailing slice of the ledger the dashboard is scoped to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PeriodWindow {
    Month,
    Quarter,
    Year,
}

impl PeriodWindow {
    pub const fn months(self) -> usize {
        match self {
            PeriodWindow::Month => 1,
            PeriodWindow::Quarter => 3,
            PeriodWindow::Year => 12,
        }
    }

    pub fn slice(self, rows: &[MonthlyRow]) -> &[MonthlyRow] {
        &rows[rows.len().saturating_sub(self.months())..]
    }
}

/// Headline figures for the selected window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BillingTotals {
    pub charges: u64,
    pub paid: u64,
    pub overdue: u64,
    pub payment_rate: u32,
}

pub fn totals(rows: &[MonthlyRow]) -> BillingTotals {
    let charges: u64 = rows.iter().map(|row| row.charges).sum();
    let paid: u64 = rows.iter().map(|row| row.paid).sum();
    let overdue: u64 = rows.iter().map(|row| row.overdue).sum();

    BillingTotals {
        charges,
        paid,
        overdue,
        payment_rate: rate_pct(paid, charges),
    }
}

/// Quick trend summary for the usage tab.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UsageSummary {
    pub average_payment_rate: u32,
    pub best_month: Option<String>,
    pub worst_arrears_month: Option<String>,
}

pub fn usage_summary(rows: &[MonthlyRow]) -> UsageSummary {
    let rates: Vec<(&str, u32)> = rows
        .iter()
        .map(|row| (row.period.as_str(), rate_pct(row.paid, row.charges)))
        .collect();

    let last6 = &rates[rates.len().saturating_sub(6)..];
    let average_payment_rate = if last6.is_empty() {
        0
    } else {
        let sum: u64 = last6.iter().map(|(_, rate)| u64::from(*rate)).sum();
        (sum as f64 / last6.len() as f64).round() as u32
    };

    // Ties keep the earliest month, matching the dashboard's reduce.
    let best_month = rates
        .iter()
        .fold(None::<(&str, u32)>, |best, &(period, rate)| match best {
            Some((_, best_rate)) if rate <= best_rate => best,
            _ => Some((period, rate)),
        })
        .map(|(period, _)| period.to_string());

    let worst_arrears_month = rows
        .iter()
        .fold(None::<(&str, u64)>, |worst, row| match worst {
            Some((_, amount)) if row.overdue <= amount => worst,
            _ => Some((row.period.as_str(), row.overdue)),
        })
        .map(|(period, _)| period.to_string());

    UsageSummary {
        average_payment_rate,
        best_month,
        worst_arrears_month,
    }
}

fn rate_pct(paid: u64, charges: u64) -> u32 {
    ((100.0 * paid as f64) / charges.max(1) as f64).round() as u32
}

/// One service line of the where-did-the-money-go breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostBreakdownItem {
    pub label: String,
    pub amount: u64,
}

/// Export the cost breakdown with a trailing total row, as the usage
/// report shows it.
pub fn breakdown_csv(items: &[CostBreakdownItem]) -> Result<String, ExportError> {
    let headers = ["البند", "المبلغ"];
    let mut rows: Vec<Vec<String>> = items
        .iter()
        .map(|item| vec![item.label.clone(), item.amount.to_string()])
        .collect();
    let total: u64 = items.iter().map(|item| item.amount).sum();
    rows.push(vec!["الإجمالي".to_string(), total.to_string()]);

    csv_with_bom(&headers, &rows)
}

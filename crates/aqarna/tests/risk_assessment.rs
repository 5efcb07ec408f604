//! Behavioral checks for the delinquency heuristic against the owner
//! dashboard's published sample ledger.

use aqarna::portal::billing::{Invoice, InvoiceStatus, MonthlyRow};
use aqarna::portal::risk::{RiskEngine, RiskLevel};
use chrono::NaiveDate;

fn sample_year() -> Vec<MonthlyRow> {
    let amounts: [(u64, u64); 12] = [
        (1800, 1800),
        (1800, 1800),
        (1800, 1800),
        (2220, 2220),
        (1800, 1800),
        (1800, 1800),
        (1800, 1800),
        (1800, 1620),
        (1800, 0),
        (1380, 0),
        (1800, 0),
        (1800, 0),
    ];
    amounts
        .into_iter()
        .enumerate()
        .map(|(i, (charges, paid))| {
            MonthlyRow::derived(format!("2025-{:02}", i + 1), charges, paid)
        })
        .collect()
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 10, 1).expect("valid date")
}

#[test]
fn sample_ledger_is_high_risk() {
    let invoices = vec![Invoice {
        id: "INV-240113".to_string(),
        period: "Q3 2025".to_string(),
        total: 1380,
        status: InvoiceStatus::Unpaid,
        due: NaiveDate::from_ymd_opt(2025, 10, 15).expect("valid date"),
    }];

    let assessment = RiskEngine::default().assess(&sample_year(), &invoices, today());

    // Trailing six months carry 6960 overdue on 10380 charged (ratio
    // 0.67), a falling paid series, and a due date 14 days out.
    assert_eq!(assessment.score, 80);
    assert_eq!(assessment.level, RiskLevel::High);
    assert_eq!(assessment.days_until_due, 14);
    assert_eq!(assessment.signals.len(), 3);
    assert!(assessment.signals.iter().all(|signal| !signal.ok));
    assert_eq!(assessment.recommended_actions.len(), 3);
}

#[test]
fn only_the_trailing_six_months_count() {
    // A spotless first half of the year must not dilute the window.
    let mut rows = sample_year();
    let short: Vec<MonthlyRow> = rows.split_off(6);

    let full = RiskEngine::default().assess(&sample_year(), &[], today());
    let windowed = RiskEngine::default().assess(&short, &[], today());
    assert_eq!(full.score, windowed.score);
    assert_eq!(full.overdue_ratio, windowed.overdue_ratio);
}

#[test]
fn assessments_are_reproducible() {
    let engine = RiskEngine::default();
    let rows = sample_year();
    let first = engine.assess(&rows, &[], today());
    let second = engine.assess(&rows, &[], today());
    assert_eq!(first, second);
}

#[test]
fn an_empty_ledger_with_no_invoices_is_calm() {
    let assessment = RiskEngine::default().assess(&[], &[], today());
    // No arrears, nothing due; only the non-rising trend contributes.
    assert_eq!(assessment.score, 20);
    assert_eq!(assessment.level, RiskLevel::Low);
    assert_eq!(assessment.days_until_due, 999);
}

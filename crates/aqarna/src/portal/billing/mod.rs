//! Owner fee ledger: monthly rows, invoices, dashboard totals, and the
//! simulated payment rails.

mod domain;
mod payments;
mod summary;

pub use domain::{Invoice, InvoiceBook, InvoiceLookupError, InvoiceStatus, MonthlyRow};
pub use payments::{
    detect_brand, luhn_valid, mask_card_number, process, quote, validate_card, CardBrand,
    CardDetails, CardSummary, PaymentError, PaymentMethod, PaymentReceipt,
};
pub use summary::{
    breakdown_csv, totals, usage_summary, BillingTotals, CostBreakdownItem, PeriodWindow,
    UsageSummary,
};

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn invoice(id: &str, total: u64, status: InvoiceStatus, due: &str) -> Invoice {
        Invoice {
            id: id.to_string(),
            period: "Q3 2025".to_string(),
            total,
            status,
            due: NaiveDate::parse_from_str(due, "%Y-%m-%d").expect("valid date"),
        }
    }

    fn book() -> InvoiceBook {
        InvoiceBook::new(vec![
            invoice("INV-240113", 1380, InvoiceStatus::Unpaid, "2025-10-15"),
            invoice("INV-240071", 1800, InvoiceStatus::Paid, "2025-07-15"),
            invoice("INV-240120", 900, InvoiceStatus::Unpaid, "2025-09-30"),
        ])
    }

    #[test]
    fn derived_rows_never_go_negative() {
        let row = MonthlyRow::derived("سبتمبر", 1800, 0);
        assert_eq!(row.overdue, 1800);
        let prepaid = MonthlyRow::derived("اكتوبر", 1800, 2000);
        assert_eq!(prepaid.overdue, 0);
    }

    #[test]
    fn invoice_lookup_reports_missing_ids() {
        let book = book();
        assert_eq!(book.find("INV-240113").expect("present").total, 1380);
        let err = book.find("INV-9999").expect_err("absent");
        assert_eq!(err.to_string(), "invoice 'INV-9999' not found");
    }

    #[test]
    fn unpaid_ordering_and_counts() {
        let book = book();
        assert_eq!(book.open_count(), 2);
        assert_eq!(book.first_unpaid().expect("unpaid exists").id, "INV-240113");
        let by_due = book.unpaid_by_due();
        assert_eq!(by_due[0].id, "INV-240120", "soonest due first");
    }

    #[test]
    fn totals_round_the_payment_rate() {
        let rows = vec![
            MonthlyRow::derived("يناير", 1800, 1800),
            MonthlyRow::derived("فبراير", 1800, 900),
        ];
        let t = totals(&rows);
        assert_eq!(t.charges, 3600);
        assert_eq!(t.paid, 2700);
        assert_eq!(t.overdue, 900);
        assert_eq!(t.payment_rate, 75);

        assert_eq!(totals(&[]).payment_rate, 0, "empty ledger divides by one");
    }

    #[test]
    fn window_slices_trailing_months() {
        let rows: Vec<MonthlyRow> = (1..=12)
            .map(|m| MonthlyRow::derived(format!("2025-{m:02}"), 1800, 1800))
            .collect();
        assert_eq!(PeriodWindow::Month.slice(&rows).len(), 1);
        assert_eq!(PeriodWindow::Quarter.slice(&rows).len(), 3);
        assert_eq!(PeriodWindow::Year.slice(&rows).len(), 12);
        assert_eq!(PeriodWindow::Month.slice(&rows)[0].period, "2025-12");
    }

    #[test]
    fn usage_summary_keeps_earliest_month_on_ties() {
        let rows = vec![
            MonthlyRow::derived("يناير", 1000, 1000),
            MonthlyRow::derived("فبراير", 1000, 1000),
            MonthlyRow::derived("مارس", 1000, 400),
        ];
        let summary = usage_summary(&rows);
        assert_eq!(summary.best_month.as_deref(), Some("يناير"));
        assert_eq!(summary.worst_arrears_month.as_deref(), Some("مارس"));
        assert_eq!(summary.average_payment_rate, 80, "mean of 100, 100, 40");
    }

    #[test]
    fn breakdown_export_appends_a_total_row() {
        let items = vec![
            CostBreakdownItem {
                label: "صيانة المصاعد".to_string(),
                amount: 3500,
            },
            CostBreakdownItem {
                label: "أمن وحراسة".to_string(),
                amount: 3000,
            },
        ];
        let csv = breakdown_csv(&items).expect("csv renders");
        let mut lines = csv.trim_start_matches('\u{feff}').lines();
        assert_eq!(lines.next().expect("header"), "\"البند\",\"المبلغ\"");
        assert_eq!(lines.clone().count(), 3, "two items plus the total row");
        assert_eq!(lines.last().expect("total row"), "\"الإجمالي\",\"6500\"");
    }

    #[test]
    fn luhn_accepts_known_test_numbers() {
        assert!(luhn_valid("4242 4242 4242 4242"));
        assert!(luhn_valid("5555555555554444"));
        assert!(!luhn_valid("4242424242424241"));
        assert!(!luhn_valid(""));
    }

    #[test]
    fn brand_detection_uses_prefixes() {
        assert_eq!(detect_brand("4242424242424242"), CardBrand::Visa);
        assert_eq!(detect_brand("5555555555554444"), CardBrand::Mastercard);
        assert_eq!(detect_brand("2221000000000009"), CardBrand::Mastercard);
        assert_eq!(detect_brand("6011000990139424"), CardBrand::Unknown);
    }

    #[test]
    fn masking_groups_digits_by_four() {
        assert_eq!(mask_card_number("4242424242424242"), "4242 4242 4242 4242");
        let summary = CardSummary::from_number("4242-4242-4242-4242");
        assert_eq!(summary.last4, "4242");
        assert_eq!(summary.brand, CardBrand::Visa);
    }

    #[test]
    fn card_validation_reports_the_first_broken_field() {
        let mut card = CardDetails {
            holder: "Raneem A.".to_string(),
            number: "4242424242424242".to_string(),
            expiry: "12/27".to_string(),
            cvc: "123".to_string(),
        };
        assert_eq!(validate_card(&card), Ok(()));

        card.holder = "  ".to_string();
        assert_eq!(validate_card(&card), Err(PaymentError::MissingHolder));

        card.holder = "Raneem A.".to_string();
        card.expiry = "13-27".to_string();
        assert_eq!(validate_card(&card), Err(PaymentError::InvalidExpiry));

        card.expiry = "12/27".to_string();
        card.cvc = "12".to_string();
        assert_eq!(validate_card(&card), Err(PaymentError::InvalidCvc));
    }

    #[test]
    fn fees_depend_on_the_rail() {
        let inv = invoice("INV-240113", 1380, InvoiceStatus::Unpaid, "2025-10-15");
        assert_eq!(quote(&inv, PaymentMethod::Mada).fee, 0);
        assert_eq!(quote(&inv, PaymentMethod::Card).fee, 25, "1.8% rounded");
        assert_eq!(quote(&inv, PaymentMethod::ApplePay).fee, 21, "1.5% rounded");
        assert_eq!(quote(&inv, PaymentMethod::Card).total, 1405);
    }

    #[test]
    fn process_masks_the_card_and_enforces_agreement() {
        let inv = invoice("INV-240113", 1380, InvoiceStatus::Unpaid, "2025-10-15");
        let card = CardDetails {
            holder: "Raneem A.".to_string(),
            number: "4242424242424242".to_string(),
            expiry: "12/27".to_string(),
            cvc: "123".to_string(),
        };

        let err = process(&inv, PaymentMethod::Card, false, Some(&card)).expect_err("must agree");
        assert_eq!(err, PaymentError::TermsNotAccepted);

        let (receipt, summary) =
            process(&inv, PaymentMethod::Card, true, Some(&card)).expect("payment succeeds");
        assert_eq!(receipt.total, 1405);
        let summary = summary.expect("card summary saved");
        assert_eq!(summary.last4, "4242");

        let (_, no_summary) =
            process(&inv, PaymentMethod::ApplePay, true, None).expect("wallet needs no card");
        assert!(no_summary.is_none());

        let err = process(&inv, PaymentMethod::Mada, true, None).expect_err("mada needs a card");
        assert_eq!(err, PaymentError::MissingCardDetails);
    }
}

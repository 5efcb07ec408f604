use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One month of an owner's fee ledger. Amounts are whole riyals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyRow {
    pub period: String,
    pub charges: u64,
    pub paid: u64,
    pub overdue: u64,
}

impl MonthlyRow {
    /// Build a row with `overdue` derived as the unpaid remainder.
    pub fn derived(period: impl Into<String>, charges: u64, paid: u64) -> Self {
        Self {
            period: period.into(),
            charges,
            paid,
            overdue: charges.saturating_sub(paid),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceStatus {
    Paid,
    Unpaid,
}

impl InvoiceStatus {
    pub const fn label(self) -> &'static str {
        match self {
            InvoiceStatus::Paid => "paid",
            InvoiceStatus::Unpaid => "unpaid",
        }
    }
}

/// A billed period awaiting (or past) settlement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invoice {
    pub id: String,
    pub period: String,
    pub total: u64,
    pub status: InvoiceStatus,
    pub due: NaiveDate,
}

/// Lookup error for invoice references coming in from links and forms.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invoice '{0}' not found")]
pub struct InvoiceLookupError(pub String);

/// The session's invoice list with id lookup and due-date ordering.
#[derive(Debug, Clone, Default)]
pub struct InvoiceBook {
    invoices: Vec<Invoice>,
}

impl InvoiceBook {
    pub fn new(invoices: Vec<Invoice>) -> Self {
        Self { invoices }
    }

    pub fn invoices(&self) -> &[Invoice] {
        &self.invoices
    }

    pub fn find(&self, id: &str) -> Result<&Invoice, InvoiceLookupError> {
        self.invoices
            .iter()
            .find(|invoice| invoice.id == id)
            .ok_or_else(|| InvoiceLookupError(id.to_string()))
    }

    /// First invoice still awaiting payment, in ledger order.
    pub fn first_unpaid(&self) -> Option<&Invoice> {
        self.invoices
            .iter()
            .find(|invoice| invoice.status != InvoiceStatus::Paid)
    }

    /// Unpaid invoices, soonest due first, for the priority table.
    pub fn unpaid_by_due(&self) -> Vec<&Invoice> {
        let mut unpaid: Vec<&Invoice> = self
            .invoices
            .iter()
            .filter(|invoice| invoice.status != InvoiceStatus::Paid)
            .collect();
        unpaid.sort_by_key(|invoice| invoice.due);
        unpaid
    }

    pub fn open_count(&self) -> usize {
        self.invoices
            .iter()
            .filter(|invoice| invoice.status != InvoiceStatus::Paid)
            .count()
    }
}

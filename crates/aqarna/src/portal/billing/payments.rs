//! Simulated settlement of an invoice. No gateway is involved; the rules
//! here are the client-side checks and fee arithmetic of the payment form.

use serde::{Deserialize, Serialize};

use super::domain::Invoice;

/// Accepted payment rails and their processing fee rates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Mada,
    Card,
    ApplePay,
}

impl PaymentMethod {
    pub const fn fee_rate(self) -> f64 {
        match self {
            PaymentMethod::Mada => 0.0,
            PaymentMethod::Card => 0.018,
            PaymentMethod::ApplePay => 0.015,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            PaymentMethod::Mada => "mada",
            PaymentMethod::Card => "card",
            PaymentMethod::ApplePay => "apple_pay",
        }
    }

    /// Apple Pay tokenizes on the device; only the card rails need the
    /// PAN-level checks.
    const fn requires_card_details(self) -> bool {
        !matches!(self, PaymentMethod::ApplePay)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardBrand {
    Visa,
    Mastercard,
    Mada,
    Unknown,
}

/// Prefix-based brand detection. Many mada BINs overlap Visa/Mastercard
/// ranges, so mada is selected by the payer, never inferred.
pub fn detect_brand(number: &str) -> CardBrand {
    let digits = digits_of(number);
    if digits.starts_with('4') {
        CardBrand::Visa
    } else if is_mastercard_prefix(&digits) {
        CardBrand::Mastercard
    } else {
        CardBrand::Unknown
    }
}

fn is_mastercard_prefix(digits: &str) -> bool {
    if let Ok(two) = digits.get(..2).unwrap_or_default().parse::<u32>() {
        if (51..=55).contains(&two) {
            return true;
        }
    }
    if let Ok(four) = digits.get(..4).unwrap_or_default().parse::<u32>() {
        if (2221..=2720).contains(&four) {
            return true;
        }
    }
    false
}

/// Luhn checksum over the digit string.
pub fn luhn_valid(number: &str) -> bool {
    let digits = digits_of(number);
    if digits.is_empty() {
        return false;
    }

    let mut sum = 0u32;
    let mut double = false;
    for ch in digits.chars().rev() {
        let mut d = ch.to_digit(10).unwrap_or(0);
        if double {
            d *= 2;
            if d > 9 {
                d -= 9;
            }
        }
        sum += d;
        double = !double;
    }
    sum % 10 == 0
}

/// Render the digits in groups of four for display.
pub fn mask_card_number(number: &str) -> String {
    let digits = digits_of(number);
    digits
        .as_bytes()
        .chunks(4)
        .map(|chunk| std::str::from_utf8(chunk).unwrap_or_default())
        .collect::<Vec<_>>()
        .join(" ")
}

fn digits_of(number: &str) -> String {
    number.chars().filter(char::is_ascii_digit).collect()
}

/// Fields collected by the card form. Held only for the duration of the
/// payment attempt.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CardDetails {
    pub holder: String,
    pub number: String,
    pub expiry: String,
    pub cvc: String,
}

/// Saved-card convenience record: brand, last four, masked display form.
/// The full number and the CVC are never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardSummary {
    pub brand: CardBrand,
    pub last4: String,
    pub masked: String,
}

impl CardSummary {
    pub fn from_number(number: &str) -> Self {
        let digits = digits_of(number);
        let last4 = digits
            .get(digits.len().saturating_sub(4)..)
            .unwrap_or_default()
            .to_string();
        Self {
            brand: detect_brand(&digits),
            last4,
            masked: mask_card_number(&digits),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PaymentError {
    #[error("the terms and privacy policy must be accepted before paying")]
    TermsNotAccepted,
    #[error("cardholder name is required")]
    MissingHolder,
    #[error("card number failed validation")]
    InvalidNumber,
    #[error("expiry must be in MM/YY form")]
    InvalidExpiry,
    #[error("security code must be 3 or 4 digits")]
    InvalidCvc,
    #[error("card details are required for this payment method")]
    MissingCardDetails,
}

/// Field checks for the card form, reported one at a time in form order.
pub fn validate_card(card: &CardDetails) -> Result<(), PaymentError> {
    if card.holder.trim().is_empty() {
        return Err(PaymentError::MissingHolder);
    }

    let digits = digits_of(&card.number);
    if !(13..=19).contains(&digits.len()) || !luhn_valid(&digits) {
        return Err(PaymentError::InvalidNumber);
    }

    if !is_valid_expiry(&card.expiry) {
        return Err(PaymentError::InvalidExpiry);
    }

    let cvc = card.cvc.trim();
    if !(3..=4).contains(&cvc.len()) || !cvc.chars().all(|c| c.is_ascii_digit()) {
        return Err(PaymentError::InvalidCvc);
    }

    Ok(())
}

fn is_valid_expiry(expiry: &str) -> bool {
    let bytes = expiry.trim().as_bytes();
    bytes.len() == 5
        && bytes[2] == b'/'
        && bytes[..2].iter().all(u8::is_ascii_digit)
        && bytes[3..].iter().all(u8::is_ascii_digit)
}

/// Settlement quote and outcome for one invoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaymentReceipt {
    pub invoice_id: String,
    pub method: PaymentMethod,
    pub amount: u64,
    pub fee: u64,
    pub total: u64,
}

/// Fee arithmetic for the chosen rail.
pub fn quote(invoice: &Invoice, method: PaymentMethod) -> PaymentReceipt {
    let fee = (invoice.total as f64 * method.fee_rate()).round() as u64;
    PaymentReceipt {
        invoice_id: invoice.id.clone(),
        method,
        amount: invoice.total,
        fee,
        total: invoice.total + fee,
    }
}

/// Run the form checks and produce a receipt plus the maskable summary of
/// whatever card was used.
pub fn process(
    invoice: &Invoice,
    method: PaymentMethod,
    agree: bool,
    card: Option<&CardDetails>,
) -> Result<(PaymentReceipt, Option<CardSummary>), PaymentError> {
    if !agree {
        return Err(PaymentError::TermsNotAccepted);
    }

    let summary = if method.requires_card_details() {
        let card = card.ok_or(PaymentError::MissingCardDetails)?;
        validate_card(card)?;
        Some(CardSummary::from_number(&card.number))
    } else {
        None
    };

    Ok((quote(invoice, method), summary))
}

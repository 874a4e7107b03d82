// 💸 Payments - One capability, three methods
//
// Card, UPI and PayPal payments share the amount check and the receipt shape;
// only the reference shown on the receipt differs per method.

use crate::attributes::{Attr, AttributeRegistry, FieldValue, MIN_CARD_DIGITS};
use crate::capabilities::Describe;
use crate::entities::report;
use crate::schema::ValidationFailure;
use serde::Serialize;
use std::fmt;
use tracing::info;

// ============================================================================
// PAYABLE CAPABILITY
// ============================================================================

pub trait Payable: Describe {
    fn amount(&self) -> f64;

    /// Settle the payment and produce its receipt
    fn pay(&self) -> Receipt;
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Receipt {
    pub method: &'static str,
    pub amount: f64,
    /// Masked where the method detail is sensitive
    pub reference: String,
}

impl fmt::Display for Receipt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} payment of {:.2} via {}", self.method, self.amount, self.reference)
    }
}

// ============================================================================
// PAYMENT
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum PaymentMethod {
    Card { number: String },
    Upi { id: String },
    Paypal { email: String },
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Card { .. } => "Card",
            PaymentMethod::Upi { .. } => "UPI",
            PaymentMethod::Paypal { .. } => "PayPal",
        }
    }

    /// Attribute the method detail is checked against
    fn detail_attr(&self) -> Attr {
        match self {
            PaymentMethod::Card { .. } => Attr::PaymentCardNumber,
            PaymentMethod::Upi { .. } | PaymentMethod::Paypal { .. } => Attr::PaymentDetail,
        }
    }

    fn detail(&self) -> &str {
        match self {
            PaymentMethod::Card { number } => number.as_str(),
            PaymentMethod::Upi { id } => id.as_str(),
            PaymentMethod::Paypal { email } => email.as_str(),
        }
    }

    /// Reference printed on the receipt
    pub fn reference(&self) -> String {
        match self {
            PaymentMethod::Card { number } => mask_card(number),
            PaymentMethod::Upi { id } => id.clone(),
            PaymentMethod::Paypal { email } => email.clone(),
        }
    }
}

/// Keep only the last 4 digits of a card number
///
/// `Payment` refuses card numbers shorter than `MIN_CARD_DIGITS`, so a
/// receipt never shows a whole number.
///
/// Example: "1234567812345678" → "**** **** **** 5678"
pub fn mask_card(number: &str) -> String {
    let chars: Vec<char> = number.chars().collect();
    let start = chars.len().saturating_sub(4);
    let last4: String = chars[start..].iter().collect();
    format!("**** **** **** {}", last4)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Payment {
    amount: f64,
    method: PaymentMethod,
}

impl Payment {
    pub fn new(amount: f64, method: PaymentMethod) -> Result<Self, ValidationFailure> {
        Self::with_rules(amount, method, &AttributeRegistry::new())
    }

    pub fn with_rules(
        amount: f64,
        method: PaymentMethod,
        rules: &AttributeRegistry,
    ) -> Result<Self, ValidationFailure> {
        let checked = rules
            .validate(Attr::PaymentAmount, FieldValue::Money(amount))
            .and_then(|_| rules.validate(method.detail_attr(), FieldValue::Text(method.detail())));
        report("payment", "new", checked)?;

        Ok(Payment { amount, method })
    }

    pub fn card(amount: f64, number: impl Into<String>) -> Result<Self, ValidationFailure> {
        Self::new(amount, PaymentMethod::Card { number: number.into() })
    }

    pub fn upi(amount: f64, id: impl Into<String>) -> Result<Self, ValidationFailure> {
        Self::new(amount, PaymentMethod::Upi { id: id.into() })
    }

    pub fn paypal(amount: f64, email: impl Into<String>) -> Result<Self, ValidationFailure> {
        Self::new(amount, PaymentMethod::Paypal { email: email.into() })
    }

    pub fn method(&self) -> &PaymentMethod {
        &self.method
    }
}

impl Describe for Payment {
    fn label(&self) -> String {
        format!("{} payment of {:.2}", self.method.as_str(), self.amount)
    }
}

impl Payable for Payment {
    fn amount(&self) -> f64 {
        self.amount
    }

    fn pay(&self) -> Receipt {
        Receipt {
            method: self.method.as_str(),
            amount: self.amount,
            reference: self.method.reference(),
        }
    }
}

// ============================================================================
// PROCESSOR
// ============================================================================

/// Runs any `Payable` and keeps a running tally
#[derive(Debug, Default)]
pub struct PaymentProcessor {
    processed: usize,
    total: f64,
}

impl PaymentProcessor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn process(&mut self, payment: &dyn Payable) -> Receipt {
        let receipt = payment.pay();
        self.processed += 1;
        self.total += receipt.amount;
        info!(payment = %payment.describe(), reference = %receipt.reference, "payment processed");
        receipt
    }

    pub fn process_all<'a, I>(&mut self, payments: I) -> Vec<Receipt>
    where
        I: IntoIterator<Item = &'a dyn Payable>,
    {
        payments.into_iter().map(|p| self.process(p)).collect()
    }

    pub fn processed(&self) -> usize {
        self.processed
    }

    pub fn total(&self) -> f64 {
        self.total
    }
}

// ============================================================================
// TESTS
// ============================================================================

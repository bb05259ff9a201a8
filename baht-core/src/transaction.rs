//! Normalized transaction produced by every statement extractor.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single statement line, bank-agnostic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Date the transaction happened
    pub date: NaiveDate,
    /// Date the bank posted it, when the layout prints one
    pub posting_date: Option<NaiveDate>,
    pub description: String,
    /// Negative = money leaving the account (charge, withdrawal);
    /// positive = money coming in (payment, refund, deposit).
    pub amount: Decimal,
    /// Running balance after this line (deposit statements)
    pub balance: Option<Decimal>,
    /// Channel or reference text supplied by the bank
    pub reference: Option<String>,
}

impl Transaction {
    pub fn new(date: NaiveDate, description: impl Into<String>, amount: Decimal) -> Self {
        Self {
            date,
            posting_date: None,
            description: description.into(),
            amount,
            balance: None,
            reference: None,
        }
    }

    pub fn with_posting_date(mut self, posting_date: NaiveDate) -> Self {
        self.posting_date = Some(posting_date);
        self
    }

    pub fn with_balance(mut self, balance: Decimal) -> Self {
        self.balance = Some(balance);
        self
    }

    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = Some(reference.into());
        self
    }

    /// Returns true if money left the account
    pub fn is_outflow(&self) -> bool {
        self.amount.is_sign_negative() && !self.amount.is_zero()
    }

    /// Returns true if money came in
    pub fn is_inflow(&self) -> bool {
        self.amount.is_sign_positive() && !self.amount.is_zero()
    }

    pub fn abs_amount(&self) -> Decimal {
        self.amount.abs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn d(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_transaction_builders() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        let txn = Transaction::new(date, "GRAB*TAXI", d("-350.00"))
            .with_posting_date(NaiveDate::from_ymd_opt(2024, 1, 16).unwrap())
            .with_balance(d("9650.00"))
            .with_reference("K PLUS");

        assert!(txn.is_outflow());
        assert!(!txn.is_inflow());
        assert_eq!(txn.abs_amount(), d("350.00"));
        assert_eq!(txn.balance, Some(d("9650.00")));
        assert_eq!(txn.reference.as_deref(), Some("K PLUS"));
    }

    #[test]
    fn test_serializes_amount_exactly() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 20).unwrap();
        let txn = Transaction::new(date, "PAYMENT - THANK YOU", d("15000.10"));
        let json = serde_json::to_value(&txn).unwrap();
        assert_eq!(json["amount"], "15000.10");
        assert_eq!(json["date"], "2024-01-20");
    }
}

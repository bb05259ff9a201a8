//! Issuing banks and statement kinds recognized by the classifier.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Issuing bank. Declaration order is the canonical order used to break
/// classification ties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Bank {
    Kasikorn,
    Ktc,
    Citibank,
}

impl Bank {
    /// All banks in canonical order.
    pub const ALL: [Bank; 3] = [Bank::Kasikorn, Bank::Ktc, Bank::Citibank];

    /// Lowercase name token searched for in statement text.
    pub fn name(&self) -> &'static str {
        match self {
            Bank::Kasikorn => "kasikorn",
            Bank::Ktc => "ktc",
            Bank::Citibank => "citibank",
        }
    }
}

impl fmt::Display for Bank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Bank {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_lowercase();
        Bank::ALL
            .into_iter()
            .find(|b| b.name() == s)
            .ok_or_else(|| format!("unknown bank: {s}"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatementType {
    /// Credit-card statement
    Credit,
    /// Deposit/savings account statement
    Account,
}

impl StatementType {
    pub fn name(&self) -> &'static str {
        match self {
            StatementType::Credit => "credit",
            StatementType::Account => "account",
        }
    }
}

impl fmt::Display for StatementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for StatementType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "credit" => Ok(StatementType::Credit),
            "account" => Ok(StatementType::Account),
            other => Err(format!("unknown statement type: {other}")),
        }
    }
}

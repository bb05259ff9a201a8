//! Error types shared by the classifier, the extractors and text adapters.

use thiserror::Error;

use crate::bank::{Bank, StatementType};

/// Everything that can stop a statement from turning into transactions.
#[derive(Error, Debug)]
pub enum StatementError {
    /// The document is password-protected and no candidate unlocked it.
    #[error(
        "document is password-protected and no valid password was resolved ({attempts} tried)"
    )]
    UnlockFailure { attempts: u32 },

    /// No extractor is registered for the detected bank/type pair.
    #[error("unsupported statement format: {bank} {statement_type}")]
    UnsupportedFormat {
        bank: Bank,
        statement_type: StatementType,
    },

    /// A row began like a transaction but its fields could not be parsed.
    #[error("{format}: malformed row {row:?}: {reason}")]
    MalformedRow {
        format: &'static str,
        row: String,
        reason: String,
    },

    /// Document-level data the layout depends on is missing.
    #[error("{format}: {reason}")]
    MalformedStatement { format: &'static str, reason: String },

    /// The document could not be decoded.
    #[error("unreadable document: {0}")]
    Unreadable(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl StatementError {
    pub fn malformed_row(
        format: &'static str,
        row: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::MalformedRow {
            format,
            row: row.into(),
            reason: reason.into(),
        }
    }

    pub fn malformed_statement(format: &'static str, reason: impl Into<String>) -> Self {
        Self::MalformedStatement {
            format,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, StatementError>;

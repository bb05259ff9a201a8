//! Bank-specific statement parsers.
//!
//! Every parser takes the raw page fragments and returns transactions in
//! statement order with the shared sign convention (negative = outflow). A row
//! that starts like a transaction but does not parse fails the whole
//! statement.

pub mod citibank_credit;
pub mod kasikorn_account;
pub mod kasikorn_credit;
pub mod ktc_credit;

use baht_core::{RawChunkGroups, Result, Transaction};
use std::fmt;

pub use citibank_credit::parse_citibank_credit;
pub use kasikorn_account::parse_kasikorn_account;
pub use kasikorn_credit::parse_kasikorn_credit;
pub use ktc_credit::parse_ktc_credit;

/// The closed set of statement layouts this crate can parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Extractor {
    KasikornCredit,
    KtcCredit,
    CitibankCredit,
    KasikornAccount,
}

impl Extractor {
    pub const ALL: [Extractor; 4] = [
        Extractor::KasikornCredit,
        Extractor::KtcCredit,
        Extractor::CitibankCredit,
        Extractor::KasikornAccount,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Extractor::KasikornCredit => kasikorn_credit::FORMAT,
            Extractor::KtcCredit => ktc_credit::FORMAT,
            Extractor::CitibankCredit => citibank_credit::FORMAT,
            Extractor::KasikornAccount => kasikorn_account::FORMAT,
        }
    }

    /// Run this layout's parser over the document's pages.
    pub fn extract(&self, chunks: &RawChunkGroups) -> Result<Vec<Transaction>> {
        match self {
            Extractor::KasikornCredit => parse_kasikorn_credit(chunks),
            Extractor::KtcCredit => parse_ktc_credit(chunks),
            Extractor::CitibankCredit => parse_citibank_credit(chunks),
            Extractor::KasikornAccount => parse_kasikorn_account(chunks),
        }
    }
}

impl fmt::Display for Extractor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

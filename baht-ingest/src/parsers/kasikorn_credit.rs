//! Kasikorn (KBank) credit card statement parser
//!
//! Expected table after text extraction:
//!   TRANS DATE  POSTING DATE  DESCRIPTION                        AMOUNT (BAHT)
//!   PREVIOUS BALANCE                                                12,000.00
//!   15/01/24    16/01/24      GRAB*TAXI BANGKOK                        350.00
//!   18/01/24    19/01/24      AMAZON WEB SERVICES                    1,052.31
//!                             USD 29.99
//!   20/01/24    20/01/24      PAYMENT - THANK YOU                  -15,000.00
//!   TOTAL BALANCE                                                    ...
//!
//! Charges are printed positive and payments/credits with a leading minus.

use baht_core::{RawChunkGroups, Result, StatementError, Transaction};
use regex::{Captures, Regex};
use std::sync::OnceLock;

use crate::normalize::{
    compile, contains_amount, page_text, parse_dmy, parse_signed_amount, section, split_rows,
};

pub const FORMAT: &str = "kasikorn-credit";

struct Layout {
    header: Regex,
    end: Regex,
    start: Regex,
    txn: Regex,
}

fn layout() -> &'static Layout {
    static LAYOUT: OnceLock<Layout> = OnceLock::new();
    LAYOUT.get_or_init(|| Layout {
        header: compile(
            r"TRANS\s*DATE\s*POSTING\s*DATE\s*DESCRIPTION\s*AMOUNT(?:\s*\(BAHT\))?",
        ),
        end: compile(r"TOTAL\s*BALANCE|Page\s*\d+\s*of\s*\d+"),
        start: compile(r"\d{2}/\d{2}/\d{2}\s*\d{2}/\d{2}/\d{2}"),
        txn: compile(concat!(
            r"^(?P<trans>\d{2}/\d{2}/\d{2})\s*",
            r"(?P<post>\d{2}/\d{2}/\d{2})\s*",
            r"(?P<desc>.+?)\s",
            r"(?P<amount>-?[\d,]+\.\d{2})",
            r"(?:\s(?P<fx>[A-Z]{3}\s?[\d,]+\.\d{2}))?$"
        )),
    })
}

fn parse_dd_mm_yy(s: &str) -> Option<chrono::NaiveDate> {
    let mut it = s.split('/');
    parse_dmy(it.next()?, it.next()?, it.next()?)
}

/// Parse a Kasikorn credit card statement into transactions.
pub fn parse_kasikorn_credit(chunks: &RawChunkGroups) -> Result<Vec<Transaction>> {
    let layout = layout();
    let mut found_table = false;
    let mut out = Vec::new();

    for page in chunks.pages() {
        let text = page_text(page);
        let Some(table) = section(&text, &layout.header, &layout.end) else {
            continue;
        };
        found_table = true;

        for row in split_rows(table, &layout.start) {
            let caps = layout.txn.captures(row).ok_or_else(|| {
                StatementError::malformed_row(FORMAT, row, "row does not match layout")
            })?;
            out.push(parse_row(row, &caps)?);
        }
    }

    if !found_table {
        return Err(StatementError::malformed_statement(FORMAT, "transaction table not found"));
    }
    Ok(out)
}

fn parse_row(row: &str, caps: &Captures) -> Result<Transaction> {
    let date = parse_dd_mm_yy(&caps["trans"])
        .ok_or_else(|| StatementError::malformed_row(FORMAT, row, "invalid transaction date"))?;
    let posting = parse_dd_mm_yy(&caps["post"])
        .ok_or_else(|| StatementError::malformed_row(FORMAT, row, "invalid posting date"))?;
    let printed = parse_signed_amount(&caps["amount"])
        .ok_or_else(|| StatementError::malformed_row(FORMAT, row, "invalid amount"))?;

    let mut description = caps["desc"].trim().to_string();
    if contains_amount(&description) {
        return Err(StatementError::malformed_row(FORMAT, row, "description holds an amount"));
    }
    if let Some(fx) = caps.name("fx") {
        description = format!("{description} ({})", fx.as_str());
    }

    Ok(Transaction::new(date, description, -printed).with_posting_date(posting))
}

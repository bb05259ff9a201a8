//! Citibank Thailand credit card statement parser
//!
//! Rows carry day and month only; the year comes from the statement date:
//!   Statement Date 25 Feb 2024
//!   ...
//!   TRANSACTION DETAILS
//!   Trans Date  Post Date  Description                         Amount (THB)
//!   28 Dec      30 Dec     STARBUCKS CENTRAL WORLD                  185.00
//!   05 Jan      06 Jan     PAYMENT RECEIVED - THANK YOU         (5,000.00)
//!   SUB TOTAL                                                         ...
//!
//! Credits are printed in parentheses.

use baht_core::{RawChunkGroups, Result, StatementError, Transaction};
use chrono::{Datelike, NaiveDate};
use regex::{Captures, Regex};
use std::sync::OnceLock;

use crate::normalize::{
    compile, contains_amount, english_month, english_month_pattern, page_text, parse_amount,
    row_start_pattern, section, split_rows,
};

pub const FORMAT: &str = "citibank-credit";

struct Layout {
    statement_date: Regex,
    header: Regex,
    end: Regex,
    start: Regex,
    txn: Regex,
}

fn layout() -> &'static Layout {
    static LAYOUT: OnceLock<Layout> = OnceLock::new();
    LAYOUT.get_or_init(|| {
        let months = english_month_pattern();
        Layout {
            statement_date: compile(&format!(
                concat!(
                    r"(?i:statement\s*date)\s*:?\s*",
                    r"(?P<day>\d{{1,2}})\s*(?P<month>{months})\s*(?P<year>\d{{4}})"
                ),
                months = months
            )),
            header: compile(r"(?i)transaction\s*details"),
            end: compile(r"(?i)sub\s*total|total\s*amount\s*due|page\s*\d+\s*of\s*\d+"),
            start: compile(&row_start_pattern(&format!(
                r"\d{{1,2}}\s*{months}\s*\d{{1,2}}\s*{months}"
            ))),
            txn: compile(&format!(
                concat!(
                    r"^(?P<td>\d{{1,2}})\s*(?P<tm>{months})\s*",
                    r"(?P<pd>\d{{1,2}})\s*(?P<pm>{months})\s*",
                    r"(?P<desc>.+?)\s",
                    r"(?P<amount>\([\d,]+\.\d{{2}}\)|[\d,]+\.\d{{2}})$"
                ),
                months = months
            )),
        }
    })
}

/// Resolve a day/month row date against the statement date. Months later
/// than the statement month belong to the previous year.
fn row_date(day: &str, month: &str, statement: NaiveDate) -> Option<NaiveDate> {
    let d: u32 = day.parse().ok()?;
    let m = english_month(month)?;
    let year = if m > statement.month() {
        statement.year() - 1
    } else {
        statement.year()
    };
    NaiveDate::from_ymd_opt(year, m, d)
}

fn find_statement_date(pages: &[String], re: &Regex) -> Option<NaiveDate> {
    pages.iter().find_map(|text| {
        let caps = re.captures(text)?;
        let d: u32 = caps["day"].parse().ok()?;
        let y: i32 = caps["year"].parse().ok()?;
        NaiveDate::from_ymd_opt(y, english_month(&caps["month"])?, d)
    })
}

/// Parse a Citibank credit card statement into transactions.
pub fn parse_citibank_credit(chunks: &RawChunkGroups) -> Result<Vec<Transaction>> {
    let layout = layout();
    let texts: Vec<String> = chunks.pages().iter().map(|p| page_text(p)).collect();
    let statement_date = find_statement_date(&texts, &layout.statement_date);

    let mut found_table = false;
    let mut out = Vec::new();

    for text in &texts {
        let Some(table) = section(text, &layout.header, &layout.end) else {
            continue;
        };
        found_table = true;

        for row in split_rows(table, &layout.start) {
            let statement = statement_date.ok_or_else(|| {
                StatementError::malformed_statement(FORMAT, "statement date not found")
            })?;
            let caps = layout.txn.captures(row).ok_or_else(|| {
                StatementError::malformed_row(FORMAT, row, "row does not match layout")
            })?;
            out.push(parse_row(row, &caps, statement)?);
        }
    }

    if !found_table {
        return Err(StatementError::malformed_statement(FORMAT, "transaction table not found"));
    }
    Ok(out)
}

fn parse_row(row: &str, caps: &Captures, statement: NaiveDate) -> Result<Transaction> {
    let date = row_date(&caps["td"], &caps["tm"], statement)
        .ok_or_else(|| StatementError::malformed_row(FORMAT, row, "invalid transaction date"))?;
    let posting = row_date(&caps["pd"], &caps["pm"], statement)
        .ok_or_else(|| StatementError::malformed_row(FORMAT, row, "invalid posting date"))?;

    let raw = &caps["amount"];
    let amount = match raw.strip_prefix('(').and_then(|s| s.strip_suffix(')')) {
        Some(inner) => parse_amount(inner),
        None => parse_amount(raw).map(|a| -a),
    }
    .ok_or_else(|| StatementError::malformed_row(FORMAT, row, "invalid amount"))?;

    let description = caps["desc"].trim();
    if contains_amount(description) {
        return Err(StatementError::malformed_row(FORMAT, row, "description holds an amount"));
    }

    Ok(Transaction::new(date, description, amount).with_posting_date(posting))
}

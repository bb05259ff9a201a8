//! Kasikorn (KBank) savings account statement parser
//!
//! Expected table after text extraction (Buddhist Era dates):
//!   วันที่    เวลา/วันที่มีผล  รายการ       ถอนเงิน / ฝากเงิน  ยอดคงเหลือ  ช่องทาง  รายละเอียด
//!   01-01-67  ยอดยกมา                                        10,000.00
//!   02-01-67  08:15          ชำระเงิน          250.00         9,750.00  K PLUS   7-ELEVEN
//!   03-01-67  12:00          รับโอนเงิน      1,000.00        10,750.00  K PLUS   จาก นาย ก
//!   รวมถอนเงิน 1 รายการ 250.00
//!
//! Withdrawals and deposits share one amount column once the text is
//! flattened, so direction comes from the running balance.

use baht_core::{RawChunkGroups, Result, StatementError, Transaction};
use chrono::NaiveDate;
use regex::Regex;
use rust_decimal::Decimal;
use std::sync::OnceLock;

use crate::normalize::{
    buddhist_year, compile, contains_amount, page_text, parse_amount, section, split_rows,
};

pub const FORMAT: &str = "kasikorn-account";

struct Layout {
    header: Regex,
    end: Regex,
    start: Regex,
    opening: Regex,
    txn: Regex,
}

// Rows start at a date followed by a time or the opening-balance label. The
// reference column is free text, so the date may be glued to a letter.
fn layout() -> &'static Layout {
    static LAYOUT: OnceLock<Layout> = OnceLock::new();
    LAYOUT.get_or_init(|| Layout {
        header: compile(r"วันที่\s*เวลา"),
        end: compile(r"รวมถอนเงิน|หน้า\s*\d+\s*/\s*\d+"),
        start: compile(r"\d{2}-\d{2}-\d{2}\s*(?:\d{2}:\d{2}|ยอดยกมา)"),
        opening: compile(
            r"^(?P<date>\d{2}-\d{2}-\d{2})\s*ยอดยกมา\s*(?P<balance>[\d,]+\.\d{2})$",
        ),
        txn: compile(concat!(
            r"^(?P<date>\d{2}-\d{2}-\d{2})\s*",
            r"(?P<time>\d{2}:\d{2})\s*",
            r"(?P<desc>.+?)\s",
            r"(?P<amount>[\d,]+\.\d{2})\s",
            r"(?P<balance>[\d,]+\.\d{2})",
            r"(?:\s?(?P<rest>.*))?$"
        )),
    })
}

fn parse_dd_mm_yy(s: &str) -> Option<NaiveDate> {
    let mut it = s.split('-');
    let d: u32 = it.next()?.parse().ok()?;
    let m: u32 = it.next()?.parse().ok()?;
    NaiveDate::from_ymd_opt(buddhist_year(it.next()?)?, m, d)
}

/// Parse a Kasikorn savings account statement into transactions.
pub fn parse_kasikorn_account(chunks: &RawChunkGroups) -> Result<Vec<Transaction>> {
    let layout = layout();
    let mut running: Option<Decimal> = None;
    let mut found_table = false;
    let mut out = Vec::new();

    for page in chunks.pages() {
        let text = page_text(page);
        let Some(table) = section(&text, &layout.header, &layout.end) else {
            continue;
        };
        found_table = true;

        for row in split_rows(table, &layout.start) {
            if let Some(caps) = layout.opening.captures(row) {
                let balance = parse_amount(&caps["balance"]).ok_or_else(|| {
                    StatementError::malformed_row(FORMAT, row, "invalid opening balance")
                })?;
                running = Some(balance);
                continue;
            }

            let caps = layout.txn.captures(row).ok_or_else(|| {
                StatementError::malformed_row(FORMAT, row, "row does not match layout")
            })?;

            let previous = running.ok_or_else(|| {
                StatementError::malformed_statement(FORMAT, "transaction before opening balance")
            })?;

            let date = parse_dd_mm_yy(&caps["date"])
                .ok_or_else(|| StatementError::malformed_row(FORMAT, row, "invalid date"))?;
            let printed = parse_amount(&caps["amount"])
                .ok_or_else(|| StatementError::malformed_row(FORMAT, row, "invalid amount"))?;
            let balance = parse_amount(&caps["balance"])
                .ok_or_else(|| StatementError::malformed_row(FORMAT, row, "invalid balance"))?;

            let description = caps["desc"].trim();
            if contains_amount(description) {
                return Err(StatementError::malformed_row(
                    FORMAT,
                    row,
                    "description holds an amount",
                ));
            }

            let delta = balance - previous;
            let amount = if delta == printed {
                printed
            } else if delta == -printed {
                -printed
            } else {
                return Err(StatementError::malformed_row(
                    FORMAT,
                    row,
                    format!("balance moved by {delta} but amount is {printed}"),
                ));
            };
            running = Some(balance);

            let mut txn = Transaction::new(date, description, amount).with_balance(balance);
            let rest = caps.name("rest").map(|m| m.as_str().trim()).filter(|s| !s.is_empty());
            if let Some(rest) = rest {
                txn = txn.with_reference(rest);
            }
            out.push(txn);
        }
    }

    if !found_table {
        return Err(StatementError::malformed_statement(FORMAT, "transaction table not found"));
    }
    Ok(out)
}

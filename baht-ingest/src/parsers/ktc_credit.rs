//! KTC (Krungthai Card) credit card statement parser
//!
//! KTC prints the transaction table in Thai with Buddhist Era years:
//!   รายละเอียดรายการ
//!   วันที่ใช้บัตร  วันที่บันทึกรายการ  รายการ                      จำนวนเงิน (บาท)
//!   5 ม.ค. 67     7 ม.ค. 67        TOPS MARKET CENTRAL           1,250.50
//!   12 ม.ค. 67    12 ม.ค. 67       PAYMENT KTC ONLINE            5,000.00 CR
//!   ยอดรวม                                                        ...
//!
//! A trailing `CR` marks payments and refunds; everything else is a charge.

use baht_core::{RawChunkGroups, Result, StatementError, Transaction};
use chrono::NaiveDate;
use regex::{Captures, Regex};
use std::sync::OnceLock;

use crate::normalize::{
    buddhist_year, compile, contains_amount, page_text, parse_amount, row_start_pattern, section,
    split_rows, thai_month, thai_month_pattern,
};

pub const FORMAT: &str = "ktc-credit";

struct Layout {
    header: Regex,
    end: Regex,
    start: Regex,
    txn: Regex,
}

fn layout() -> &'static Layout {
    static LAYOUT: OnceLock<Layout> = OnceLock::new();
    LAYOUT.get_or_init(|| {
        let months = thai_month_pattern();
        let date = format!(r"\d{{1,2}}\s*(?:{months})\s*\d{{2}}");
        Layout {
            header: compile(r"รายละเอียดรายการ"),
            end: compile(r"ยอดรวม|หน้า\s*\d+\s*/\s*\d+"),
            start: compile(&row_start_pattern(&format!(r"{date}\s*{date}"))),
            txn: compile(&format!(
                concat!(
                    r"^(?P<td>\d{{1,2}})\s*(?P<tm>{months})\s*(?P<ty>\d{{2}})\s*",
                    r"(?P<pd>\d{{1,2}})\s*(?P<pm>{months})\s*(?P<py>\d{{2}})\s*",
                    r"(?P<desc>.+?)\s",
                    r"(?P<amount>[\d,]+\.\d{{2}})",
                    r"(?P<cr>\s?CR)?$"
                ),
                months = months
            )),
        }
    })
}

fn thai_date(day: &str, month: &str, yy: &str) -> Option<NaiveDate> {
    let d: u32 = day.parse().ok()?;
    NaiveDate::from_ymd_opt(buddhist_year(yy)?, thai_month(month)?, d)
}

/// Parse a KTC credit card statement into transactions.
pub fn parse_ktc_credit(chunks: &RawChunkGroups) -> Result<Vec<Transaction>> {
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
    let date = thai_date(&caps["td"], &caps["tm"], &caps["ty"])
        .ok_or_else(|| StatementError::malformed_row(FORMAT, row, "invalid transaction date"))?;
    let posting = thai_date(&caps["pd"], &caps["pm"], &caps["py"])
        .ok_or_else(|| StatementError::malformed_row(FORMAT, row, "invalid posting date"))?;
    let printed = parse_amount(&caps["amount"])
        .ok_or_else(|| StatementError::malformed_row(FORMAT, row, "invalid amount"))?;

    let description = caps["desc"].trim();
    if contains_amount(description) {
        return Err(StatementError::malformed_row(FORMAT, row, "description holds an amount"));
    }

    let amount = if caps.name("cr").is_some() { printed } else { -printed };

    Ok(Transaction::new(date, description, amount).with_posting_date(posting))
}

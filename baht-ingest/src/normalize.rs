//! Helpers shared by the bank-specific parsers: rebuilding page text from
//! decoder fragments, cutting the transaction table into rows, and parsing
//! amounts and dates in the formats Thai statements use.

use chrono::NaiveDate;
use regex::Regex;
use rust_decimal::Decimal;
use std::str::FromStr;
use std::sync::OnceLock;

/// Concatenate a page's fragments and collapse whitespace runs.
///
/// Fragments are joined with no separator since the decoder may split inside a
/// word or number; any whitespace it did emit survives as a single space.
pub fn page_text(fragments: &[String]) -> String {
    let joined: String = fragments.iter().map(String::as_str).collect();
    joined.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// The slice of `text` after the first `header` match, up to the next `end`
/// match. `None` when the page has no transaction table.
pub fn section<'a>(text: &'a str, header: &Regex, end: &Regex) -> Option<&'a str> {
    let start = header.find(text)?.end();
    let rest = &text[start..];
    let stop = end.find(rest).map(|m| m.start()).unwrap_or(rest.len());
    Some(rest[..stop].trim())
}

/// Compile a pattern that is fixed at build time.
pub(crate) fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("layout pattern")
}

/// Wrap a row-start pattern so it also matches when the previous row's
/// fragment ended flush against it, as in `1,250.5028 ธ.ค. 66`. The row
/// itself is captured as `row`.
pub fn row_start_pattern(start: &str) -> String {
    format!(r"(?:^|\W|\.\d{{2}})(?P<row>{start})")
}

/// Split a table section into rows, each beginning at a `start` match (or
/// at its `row` group when it has one). Anything before the first marker is
/// preamble and is dropped.
pub fn split_rows<'a>(section: &'a str, start: &Regex) -> Vec<&'a str> {
    let starts: Vec<usize> = start
        .captures_iter(section)
        .filter_map(|caps| caps.name("row").or_else(|| caps.get(0)))
        .map(|m| m.start())
        .collect();
    starts
        .iter()
        .enumerate()
        .map(|(i, &from)| {
            let to = starts.get(i + 1).copied().unwrap_or(section.len());
            section[from..to].trim()
        })
        .collect()
}

fn amount_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| compile(r"^(?:\d{1,3}(?:,\d{3})+|\d+)\.\d{2}$"))
}

/// True when `s` carries something shaped like an amount. A description
/// holding one means two rows were merged.
pub fn contains_amount(s: &str) -> bool {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| compile(r"\d\.\d{2}")).is_match(s)
}

/// Parse an unsigned amount such as `1,234.50`.
pub fn parse_amount(s: &str) -> Option<Decimal> {
    let s = s.trim();
    if !amount_re().is_match(s) {
        return None;
    }
    Decimal::from_str(&s.replace(',', "")).ok()
}

/// Parse an amount with an optional leading minus, such as `-15,000.00`.
pub fn parse_signed_amount(s: &str) -> Option<Decimal> {
    let s = s.trim();
    match s.strip_prefix('-') {
        Some(rest) => parse_amount(rest).map(|d| -d),
        None => parse_amount(s),
    }
}

/// Build a date from day, month and a two-digit Gregorian year.
pub fn parse_dmy(day: &str, month: &str, yy: &str) -> Option<NaiveDate> {
    let d: u32 = day.parse().ok()?;
    let m: u32 = month.parse().ok()?;
    let y: i32 = yy.parse().ok()?;
    NaiveDate::from_ymd_opt(2000 + y, m, d)
}

/// Convert a two-digit Buddhist Era year (`67` = 2567 BE) to Gregorian.
pub fn buddhist_year(yy: &str) -> Option<i32> {
    let y: i32 = yy.parse().ok()?;
    Some(2500 + y - 543)
}

const ENGLISH_MONTHS: [&str; 12] = [
    "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
];

/// Abbreviated English month name, any case.
pub fn english_month(abbr: &str) -> Option<u32> {
    let abbr = abbr.trim().to_lowercase();
    ENGLISH_MONTHS
        .iter()
        .position(|m| *m == abbr)
        .map(|i| i as u32 + 1)
}

/// Case-insensitive regex alternation matching any English month abbreviation.
pub fn english_month_pattern() -> String {
    format!("(?i:{})", ENGLISH_MONTHS.join("|"))
}

/// Thai month abbreviations, January first.
pub const THAI_MONTHS: [&str; 12] = [
    "ม.ค.", "ก.พ.", "มี.ค.", "เม.ย.", "พ.ค.", "มิ.ย.",
    "ก.ค.", "ส.ค.", "ก.ย.", "ต.ค.", "พ.ย.", "ธ.ค.",
];

pub fn thai_month(abbr: &str) -> Option<u32> {
    let abbr = abbr.trim();
    THAI_MONTHS
        .iter()
        .position(|m| *m == abbr)
        .map(|i| i as u32 + 1)
}

/// Regex alternation matching any Thai month abbreviation.
pub fn thai_month_pattern() -> String {
    THAI_MONTHS
        .iter()
        .map(|m| regex::escape(m))
        .collect::<Vec<_>>()
        .join("|")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_text_glues_split_tokens() {
        let frags: Vec<String> = ["15/01/24 ", "GRAB", "  TAXI\n", "1,2", "50.00"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(page_text(&frags), "15/01/24 GRAB TAXI 1,250.00");
    }

    #[test]
    fn test_section_and_rows() {
        let header = Regex::new(r"BEGIN").unwrap();
        let end = Regex::new(r"END").unwrap();
        let start = Regex::new(r"\d{2}/\d{2}").unwrap();

        let text = "noise 01/01 BEGIN preamble 02/01 a 1.00 03/01 b 2.00 END 04/01 tail";
        let sec = section(text, &header, &end).unwrap();
        assert_eq!(sec, "preamble 02/01 a 1.00 03/01 b 2.00");
        assert_eq!(split_rows(sec, &start), vec!["02/01 a 1.00", "03/01 b 2.00"]);

        assert!(section("no table here", &header, &end).is_none());
        assert_eq!(section("BEGIN 05/01 c 3.00", &header, &end), Some("05/01 c 3.00"));
    }

    #[test]
    fn test_row_start_after_glued_amount() {
        let start = Regex::new(&row_start_pattern(r"\d{1,2} [A-Z][a-z]{2}")).unwrap();

        let glued = "01 Jan TAXI 185.0005 Jan SHOP 1,250.5028 Jan PAYMENT (5.00)3 Feb X 1.00";
        assert_eq!(
            split_rows(glued, &start),
            vec![
                "01 Jan TAXI 185.00",
                "05 Jan SHOP 1,250.50",
                "28 Jan PAYMENT (5.00)",
                "3 Feb X 1.00",
            ]
        );
    }

    #[test]
    fn test_contains_amount() {
        assert!(contains_amount("TOPS 1,250.50 LAZADA"));
        assert!(!contains_amount("7-ELEVEN SUKHUMVIT 21"));
        assert!(!contains_amount("V2.0 APP"));
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("1,234.50"), Some(Decimal::new(123450, 2)));
        assert_eq!(parse_amount("350.00"), Some(Decimal::new(35000, 2)));
        assert_eq!(parse_amount("1234.50"), Some(Decimal::new(123450, 2)));
        assert_eq!(parse_signed_amount("-15,000.00"), Some(Decimal::new(-1500000, 2)));
        assert_eq!(parse_amount("3S0.00"), None);
        assert_eq!(parse_amount("1,23.00"), None);
        assert_eq!(parse_amount("12.5"), None);
    }

    #[test]
    fn test_dates() {
        assert_eq!(parse_dmy("15", "01", "24"), NaiveDate::from_ymd_opt(2024, 1, 15));
        assert_eq!(parse_dmy("31", "02", "24"), None);
        assert_eq!(buddhist_year("67"), Some(2024));
        assert_eq!(english_month("DEC"), Some(12));
        assert_eq!(english_month("Sept"), None);
        assert_eq!(thai_month("มี.ค."), Some(3));
        assert_eq!(thai_month("ธ.ค."), Some(12));
    }
}

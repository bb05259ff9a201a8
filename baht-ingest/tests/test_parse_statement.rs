use baht_ingest::{
    Bank, DocumentSource, NoPassword, PasswordList, PasswordResolver, RawChunkGroups,
    StatementError, StatementParser, StatementType, TextExtractor, classify,
};
use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use std::sync::Mutex;

/// Serves canned pages, optionally behind a password, and records every
/// candidate it was offered.
struct FakePdf {
    pages: Vec<Vec<&'static str>>,
    password: Option<&'static str>,
    offered: Mutex<Vec<String>>,
}

impl FakePdf {
    fn new(pages: Vec<Vec<&'static str>>) -> Self {
        Self {
            pages,
            password: None,
            offered: Mutex::new(Vec::new()),
        }
    }

    fn locked(mut self, password: &'static str) -> Self {
        self.password = Some(password);
        self
    }
}

impl TextExtractor for FakePdf {
    async fn extract_chunks<R>(
        &self,
        _source: &DocumentSource,
        passwords: &R,
    ) -> Result<RawChunkGroups, StatementError>
    where
        R: PasswordResolver + ?Sized,
    {
        if let Some(expected) = self.password {
            let mut attempt = 0;
            loop {
                let Some(candidate) = passwords.resolve(attempt) else {
                    return Err(StatementError::UnlockFailure { attempts: attempt });
                };
                attempt += 1;
                self.offered.lock().unwrap().push(candidate.clone());
                if candidate == expected {
                    break;
                }
            }
        }
        Ok(self.pages.iter().cloned().collect())
    }
}

fn source() -> DocumentSource {
    DocumentSource::from(Vec::new())
}

const KASIKORN_CREDIT: &[&str] = &[
    "... KASIKORN",
    "BANK ... CREDIT ",
    "CARD STATEMENT\nTRANS DATE POSTING DATE DESCRIPTION AMOUNT\n",
    "PREVIOUS BALANCE 0.00\n",
    "15/01/24 16/01/24 CENTRAL WORLD 15,0",
    "00.00\n",
    "TOTAL BALANCE 15,000.00 ...",
];

#[tokio::test]
async fn test_kasikorn_credit_end_to_end() {
    let pdf = FakePdf::new(vec![KASIKORN_CREDIT.to_vec()]);

    let text: String = KASIKORN_CREDIT.concat();
    let c = classify(&text);
    assert_eq!((c.bank, c.statement_type), (Bank::Kasikorn, StatementType::Credit));

    let txns = StatementParser::default()
        .parse_statement(&pdf, &source(), &NoPassword)
        .await
        .unwrap();

    assert_eq!(txns.len(), 1);
    assert_eq!(txns[0].date, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
    assert_eq!(txns[0].description, "CENTRAL WORLD");
    assert_eq!(txns[0].amount, Decimal::new(-1500000, 2));
}

#[tokio::test]
async fn test_ktc_without_credit_marker_is_unsupported() {
    let pdf = FakePdf::new(vec![vec![
        "KTC ใบแจ้งยอด ",
        "kasikorn transfer ",
        "รายละเอียดรายการ 5 ม.ค. 67 7 ม.ค. 67 TOPS 100.00",
    ]]);

    let err = StatementParser::default()
        .parse_statement(&pdf, &source(), &NoPassword)
        .await
        .unwrap_err();

    match err {
        StatementError::UnsupportedFormat { bank, statement_type } => {
            assert_eq!(bank, Bank::Ktc);
            assert_eq!(statement_type, StatementType::Account);
        }
        other => panic!("expected UnsupportedFormat, got {other:?}"),
    }
}

#[tokio::test]
async fn test_malformed_row_fails_whole_document() {
    let pdf = FakePdf::new(vec![vec![
        "KASIKORN CREDIT CARD\nTRANS DATE POSTING DATE DESCRIPTION AMOUNT\n",
        "15/01/24 16/01/24 CENTRAL WORLD 1,500.00\n",
        "16/01/24 17/01/24 STARBUCKS 1O5.00\n",
        "TOTAL BALANCE",
    ]]);

    let err = StatementParser::default()
        .parse_statement(&pdf, &source(), &NoPassword)
        .await
        .unwrap_err();

    assert!(matches!(err, StatementError::MalformedRow { format: "kasikorn-credit", .. }));
}

#[tokio::test]
async fn test_password_candidates_are_passed_through() {
    let pdf = FakePdf::new(vec![vec![
        "CITIBANK CREDIT CARD Statement Date 25 Jan 2024\n",
        "TRANSACTION DETAILS 15 Jan 16 Jan GRAB 120.00 SUB TOTAL",
    ]])
    .locked("15011990");

    let passwords = PasswordList::new(["0000", "15011990", "never-tried"]);
    let txns = StatementParser::default()
        .parse_statement(&pdf, &source(), &passwords)
        .await
        .unwrap();

    assert_eq!(txns.len(), 1);
    assert_eq!(txns[0].amount, Decimal::new(-12000, 2));
    assert_eq!(*pdf.offered.lock().unwrap(), vec!["0000", "15011990"]);
}

#[tokio::test]
async fn test_exhausted_passwords_are_unlock_failure() {
    let pdf = FakePdf::new(vec![vec!["CITIBANK CREDIT CARD 1.00"]]).locked("secret");

    let err = StatementParser::default()
        .parse_statement(&pdf, &source(), &PasswordList::new(["a", "b"]))
        .await
        .unwrap_err();

    assert!(matches!(err, StatementError::UnlockFailure { attempts: 2 }));
}

#[tokio::test]
async fn test_concurrent_parses_are_independent() {
    let kasikorn = FakePdf::new(vec![KASIKORN_CREDIT.to_vec()]);
    let ktc = FakePdf::new(vec![vec![
        "KTC CREDIT CARD\nรายละเอียดรายการ\n",
        "5 ม.ค. 67 7 ม.ค. 67 TOPS MARKET 1,250.50\n",
        "12 ม.ค. 67 12 ม.ค. 67 PAYMENT 500.00 CR\nยอดรวม",
    ]]);

    let parser = StatementParser::default();
    let src = source();
    let (a, b) = tokio::join!(
        parser.parse_statement(&kasikorn, &src, &NoPassword),
        parser.parse_statement(&ktc, &src, &NoPassword),
    );

    assert_eq!(a.unwrap().len(), 1);
    let b = b.unwrap();
    assert_eq!(b.len(), 2);
    assert_eq!(b[1].amount, Decimal::new(50000, 2));
}

#[tokio::test]
async fn test_unrelated_document_is_not_an_empty_statement() {
    for pages in [vec![vec!["Electricity bill for March, total due 1,234.50"]], vec![]] {
        let pdf = FakePdf::new(pages);
        let err = StatementParser::default()
            .parse_statement(&pdf, &source(), &NoPassword)
            .await
            .unwrap_err();

        match err {
            StatementError::MalformedStatement { format, .. } => {
                assert_eq!(format, "kasikorn-account");
            }
            other => panic!("expected MalformedStatement, got {other:?}"),
        }
    }
}

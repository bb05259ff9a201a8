//! Token-presence heuristics deciding which bank issued a statement and
//! whether it is a credit-card or deposit-account statement.

use baht_core::{Bank, StatementType};

const CREDIT_MARKER: &str = "CREDIT CARD";

/// Index assigned to a bank whose name never appears. Every unmatched bank
/// compares equal, so a document naming no bank falls through to the first
/// bank in canonical order.
const NOT_FOUND: usize = usize::MAX;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub bank: Bank,
    pub statement_type: StatementType,
    /// False when no bank name occurs in the text and `bank` is only the
    /// canonical default.
    pub bank_matched: bool,
}

/// Classify flattened statement text. Pure; never fails.
pub fn classify(raw: &str) -> Classification {
    let (bank, bank_matched) = find_bank(raw);
    Classification {
        bank,
        statement_type: find_statement_type(raw),
        bank_matched,
    }
}

/// Credit iff the case-sensitive marker is present and the text has at least
/// one '.', which screens out headers with no monetary amounts at all.
pub fn find_statement_type(raw: &str) -> StatementType {
    if raw.contains(CREDIT_MARKER) && raw.contains('.') {
        StatementType::Credit
    } else {
        StatementType::Account
    }
}

/// Earliest bank name in the lowercased text wins; ties go to canonical order.
pub fn find_bank(raw: &str) -> (Bank, bool) {
    let lower = raw.to_lowercase();

    let mut best = (Bank::ALL[0], NOT_FOUND);
    for bank in Bank::ALL {
        let idx = lower.find(bank.name()).unwrap_or(NOT_FOUND);
        if idx < best.1 {
            best = (bank, idx);
        }
    }

    (best.0, best.1 != NOT_FOUND)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credit_requires_marker_and_decimal_point() {
        assert_eq!(find_statement_type("KTC CREDIT CARD 1,000.00"), StatementType::Credit);
        assert_eq!(find_statement_type("KTC CREDIT CARD 1,000"), StatementType::Account);
        assert_eq!(find_statement_type("KTC credit card 1,000.00"), StatementType::Account);
        assert_eq!(find_statement_type("CREDIT  CARD 10.00"), StatementType::Account);
        assert_eq!(find_statement_type(""), StatementType::Account);
    }

    #[test]
    fn test_single_bank_token_wins_regardless_of_noise() {
        let noise = "Statement of account 12/2023 ... page 1/3 ... ";
        for bank in Bank::ALL {
            let text = format!("{noise}{}{noise}", bank.name().to_uppercase());
            let (found, matched) = find_bank(&text);
            assert_eq!(found, bank);
            assert!(matched);
        }
    }

    #[test]
    fn test_earliest_token_wins_irrespective_of_length_and_case() {
        let (bank, _) = find_bank("Pay your CitiBank card via KTC counters");
        assert_eq!(bank, Bank::Citibank);

        let (bank, _) = find_bank("ktc ... KASIKORNBANK");
        assert_eq!(bank, Bank::Ktc);
    }

    #[test]
    fn test_no_bank_token_defaults_to_first_bank() {
        let c = classify("SOME OTHER BANK CREDIT CARD 10.00");
        assert_eq!(c.bank, Bank::Kasikorn);
        assert!(!c.bank_matched);
        assert_eq!(c.statement_type, StatementType::Credit);
    }

    #[test]
    fn test_end_to_end_classification() {
        let c = classify("... KASIKORN ... CREDIT CARD ... 15,000.00 ...");
        assert_eq!(c.bank, Bank::Kasikorn);
        assert_eq!(c.statement_type, StatementType::Credit);
        assert!(c.bank_matched);

        let c = classify("KTC PLATINUM statement ... kasikorn transfer 500.00");
        assert_eq!((c.bank, c.statement_type), (Bank::Ktc, StatementType::Account));
    }
}

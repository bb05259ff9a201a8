//! Statement pipeline: extract text, classify, pick the extractor, parse.

use baht_core::{RawChunkGroups, Result, Transaction};
use tracing::{debug, warn};

use crate::classify::classify;
use crate::password::PasswordResolver;
use crate::pdf::PdfTextExtractor;
use crate::registry::ExtractorRegistry;
use crate::source::{DocumentSource, TextExtractor};

/// Runs documents through classification and the registered extractors.
#[derive(Debug, Clone, Copy)]
pub struct StatementParser<'r> {
    registry: &'r ExtractorRegistry,
}

impl Default for StatementParser<'static> {
    fn default() -> Self {
        Self::new(ExtractorRegistry::builtin())
    }
}

impl<'r> StatementParser<'r> {
    pub fn new(registry: &'r ExtractorRegistry) -> Self {
        Self { registry }
    }

    /// Decode `source` with `extractor` and parse the resulting text.
    ///
    /// The adapter call is the only suspension point.
    pub async fn parse_statement<E, R>(
        &self,
        extractor: &E,
        source: &DocumentSource,
        passwords: &R,
    ) -> Result<Vec<Transaction>>
    where
        E: TextExtractor,
        R: PasswordResolver + ?Sized,
    {
        let chunks = extractor.extract_chunks(source, passwords).await?;
        self.parse_chunks(&chunks)
    }

    /// Classify already-extracted text and run the matching extractor on the
    /// original page fragments.
    pub fn parse_chunks(&self, chunks: &RawChunkGroups) -> Result<Vec<Transaction>> {
        let c = classify(&chunks.flatten());
        if !c.bank_matched {
            warn!(bank = %c.bank, "no bank name found in statement; using default bank");
        }
        debug!(bank = %c.bank, statement_type = %c.statement_type, "classified statement");

        let extractor = self.registry.resolve(c.bank, c.statement_type)?;
        let txns = extractor.extract(chunks)?;

        debug!(format = extractor.name(), count = txns.len(), "extracted transactions");
        Ok(txns)
    }
}

/// Parse a PDF statement with the built-in formats.
pub async fn parse_statement<R>(source: &DocumentSource, passwords: &R) -> Result<Vec<Transaction>>
where
    R: PasswordResolver + ?Sized,
{
    StatementParser::default()
        .parse_statement(&PdfTextExtractor::new(), source, passwords)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use baht_core::{Bank, StatementError, StatementType};
    use crate::parsers::Extractor;

    fn chunks(pages: &[&[&str]]) -> RawChunkGroups {
        pages.iter().map(|p| p.to_vec()).collect()
    }

    #[test]
    fn test_parse_chunks_dispatches_on_classification() {
        let input = chunks(&[&[
            "KASIKORNBANK CREDIT CARD ",
            "TRANS DATE POSTING DATE DESCRIPTION AMOUNT ",
            "15/01/24 16/01/24 CENTRAL WORLD 15,000.00 TOTAL BALANCE",
        ]]);
        let txns = StatementParser::default().parse_chunks(&input).unwrap();
        assert_eq!(txns.len(), 1);
        assert_eq!(txns[0].description, "CENTRAL WORLD");
    }

    #[test]
    fn test_custom_registry_is_used() {
        let mut registry = ExtractorRegistry::new();
        registry.register(Bank::Ktc, StatementType::Account, Extractor::KasikornAccount);

        let input = chunks(&[&[
            "KTC วันที่ เวลา 01-01-67 ยอดยกมา 100.00 ",
            "02-01-67 10:00 ฝาก 5.00 105.00",
        ]]);
        let txns = StatementParser::new(&registry).parse_chunks(&input).unwrap();
        assert_eq!(txns.len(), 1);

        let err = StatementParser::new(&ExtractorRegistry::new())
            .parse_chunks(&input)
            .unwrap_err();
        assert!(matches!(err, StatementError::UnsupportedFormat { .. }));
    }
}

//! Lookup table from (bank, statement type) to the extractor for that layout.

use baht_core::{Bank, Result, StatementError, StatementType};
use std::collections::HashMap;
use std::sync::OnceLock;

use crate::parsers::Extractor;

#[derive(Debug, Clone, Default)]
pub struct ExtractorRegistry {
    table: HashMap<(Bank, StatementType), Extractor>,
}

impl ExtractorRegistry {
    /// An empty registry; every lookup fails until formats are registered.
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in formats, constructed once and shared.
    pub fn builtin() -> &'static ExtractorRegistry {
        static BUILTIN: OnceLock<ExtractorRegistry> = OnceLock::new();
        BUILTIN.get_or_init(|| {
            let mut registry = ExtractorRegistry::new();
            registry.register(Bank::Kasikorn, StatementType::Credit, Extractor::KasikornCredit);
            registry.register(Bank::Ktc, StatementType::Credit, Extractor::KtcCredit);
            registry.register(Bank::Citibank, StatementType::Credit, Extractor::CitibankCredit);
            registry.register(Bank::Kasikorn, StatementType::Account, Extractor::KasikornAccount);
            registry
        })
    }

    /// Register `extractor` for a pair, returning whatever it replaced.
    pub fn register(
        &mut self,
        bank: Bank,
        statement_type: StatementType,
        extractor: Extractor,
    ) -> Option<Extractor> {
        self.table.insert((bank, statement_type), extractor)
    }

    /// Exact lookup; unregistered pairs are an error, never a default.
    pub fn resolve(&self, bank: Bank, statement_type: StatementType) -> Result<Extractor> {
        self.table
            .get(&(bank, statement_type))
            .copied()
            .ok_or(StatementError::UnsupportedFormat {
                bank,
                statement_type,
            })
    }

    /// Registered pairs sorted by bank then type.
    pub fn entries(&self) -> Vec<(Bank, StatementType, Extractor)> {
        let mut entries: Vec<_> = self
            .table
            .iter()
            .map(|(&(bank, st), &ex)| (bank, st, ex))
            .collect();
        entries.sort_by_key(|&(bank, st, _)| (bank, st));
        entries
    }
}

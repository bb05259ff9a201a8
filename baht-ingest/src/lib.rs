//! baht-ingest: statement classification, extractor dispatch, bank-specific
//! parsers and the PDF text adapter.

pub mod classify;
pub mod normalize;
pub mod parsers;
pub mod password;
pub mod pdf;
pub mod pipeline;
pub mod registry;
pub mod source;

pub use baht_core::{Bank, RawChunkGroups, StatementError, StatementType, Transaction};
pub use classify::{Classification, classify};
pub use parsers::Extractor;
pub use password::{NoPassword, PasswordList, PasswordResolver};
pub use pdf::PdfTextExtractor;
pub use pipeline::{StatementParser, parse_statement};
pub use registry::ExtractorRegistry;
pub use source::{DocumentSource, TextExtractor};

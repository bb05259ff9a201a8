//! Where statement bytes come from and the contract for turning them into
//! raw text fragments.

use baht_core::{RawChunkGroups, Result};
use std::path::PathBuf;
use std::sync::Arc;

use crate::password::PasswordResolver;

/// The caller's document. The pipeline only reads it; in-memory bytes are
/// shared, not copied.
#[derive(Debug, Clone)]
pub enum DocumentSource {
    Path(PathBuf),
    Bytes(Arc<[u8]>),
}

impl DocumentSource {
    /// Short label for logs.
    pub fn describe(&self) -> String {
        match self {
            DocumentSource::Path(p) => p.display().to_string(),
            DocumentSource::Bytes(b) => format!("<{} bytes>", b.len()),
        }
    }

    /// Load the document's bytes.
    pub async fn read(&self) -> Result<Arc<[u8]>> {
        match self {
            DocumentSource::Path(p) => Ok(tokio::fs::read(p).await?.into()),
            DocumentSource::Bytes(b) => Ok(Arc::clone(b)),
        }
    }
}

impl From<PathBuf> for DocumentSource {
    fn from(p: PathBuf) -> Self {
        DocumentSource::Path(p)
    }
}

impl From<Vec<u8>> for DocumentSource {
    fn from(b: Vec<u8>) -> Self {
        DocumentSource::Bytes(b.into())
    }
}

impl From<Arc<[u8]>> for DocumentSource {
    fn from(b: Arc<[u8]>) -> Self {
        DocumentSource::Bytes(b)
    }
}

/// Decodes a document into pages of text fragments, unlocking it with the
/// resolver's candidates when it is encrypted.
pub trait TextExtractor {
    fn extract_chunks<R>(
        &self,
        source: &DocumentSource,
        passwords: &R,
    ) -> impl Future<Output = Result<RawChunkGroups>> + Send
    where
        R: PasswordResolver + ?Sized;
}

//! PDF text adapter built on lopdf.

use baht_core::{RawChunkGroups, Result, StatementError};
use lopdf::Document;
use std::sync::Arc;
use tracing::{debug, trace};

use crate::password::PasswordResolver;
use crate::source::{DocumentSource, TextExtractor};

/// Extracts page text with lopdf, one fragment per text line.
///
/// Parsing, decryption and text decoding run on tokio's blocking pool.
/// Password candidates are requested between attempts, never up front.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfTextExtractor;

impl PdfTextExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Load the document, trying password candidates while it stays locked.
    async fn unlock<R>(&self, bytes: Arc<[u8]>, passwords: &R) -> Result<Document>
    where
        R: PasswordResolver + ?Sized,
    {
        let doc = blocking({
            let bytes = Arc::clone(&bytes);
            move || load(&bytes)
        })
        .await?;
        if !doc.is_encrypted() {
            return Ok(doc);
        }

        let mut attempt = 0;
        while let Some(candidate) = passwords.resolve(attempt) {
            attempt += 1;
            let bytes = Arc::clone(&bytes);
            if let Some(doc) = blocking(move || decrypt(&bytes, &candidate)).await? {
                debug!(attempt, "document unlocked");
                return Ok(doc);
            }
            trace!(attempt, "password rejected");
        }

        Err(StatementError::UnlockFailure { attempts: attempt })
    }
}

fn load(bytes: &[u8]) -> Result<Document> {
    Document::load_mem(bytes).map_err(|e| StatementError::Unreadable(e.to_string()))
}

// A failed decrypt may leave the document half-processed, so each candidate
// starts from a fresh load.
fn decrypt(bytes: &[u8], password: &str) -> Result<Option<Document>> {
    let mut doc = load(bytes)?;
    match doc.decrypt(password) {
        Ok(()) => Ok(Some(doc)),
        Err(e) => {
            trace!(error = %e, "decrypt failed");
            Ok(None)
        }
    }
}

/// Decode every page of an unlocked document, in page order.
fn decode_pages(doc: &Document) -> Result<RawChunkGroups> {
    let page_numbers: Vec<u32> = doc.get_pages().keys().copied().collect();
    if page_numbers.is_empty() {
        return Err(StatementError::Unreadable("PDF has no pages".to_string()));
    }

    let mut pages = Vec::with_capacity(page_numbers.len());
    for number in page_numbers {
        let text = doc
            .extract_text(&[number])
            .map_err(|e| StatementError::Unreadable(format!("page {number}: {e}")))?;
        trace!(page = number, chars = text.len(), "extracted page text");
        pages.push(text.split_inclusive('\n').map(str::to_string).collect());
    }

    Ok(RawChunkGroups::new(pages))
}

async fn blocking<T, F>(f: F) -> Result<T>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| StatementError::Unreadable(format!("decoder task failed: {e}")))?
}

impl TextExtractor for PdfTextExtractor {
    async fn extract_chunks<R>(
        &self,
        source: &DocumentSource,
        passwords: &R,
    ) -> Result<RawChunkGroups>
    where
        R: PasswordResolver + ?Sized,
    {
        let bytes = source.read().await?;
        debug!(source = %source.describe(), bytes = bytes.len(), "decoding PDF");

        let doc = self.unlock(bytes, passwords).await?;
        blocking(move || decode_pages(&doc)).await
    }
}

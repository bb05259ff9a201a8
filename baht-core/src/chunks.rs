//! Raw text fragments as emitted by a PDF text decoder.

/// Ordered pages, each an ordered list of text fragments.
///
/// Fragment boundaries are whatever the decoder produced; they do not line up
/// with words, rows or columns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawChunkGroups(Vec<Vec<String>>);

impl RawChunkGroups {
    pub fn new(pages: Vec<Vec<String>>) -> Self {
        Self(pages)
    }

    pub fn pages(&self) -> &[Vec<String>] {
        &self.0
    }

    /// All fragments of all pages concatenated with no separator.
    pub fn flatten(&self) -> String {
        self.0.iter().flatten().map(String::as_str).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.0.iter().all(|page| page.is_empty())
    }
}

impl<S: Into<String>> FromIterator<Vec<S>> for RawChunkGroups {
    fn from_iter<I: IntoIterator<Item = Vec<S>>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|page| page.into_iter().map(Into::into).collect())
                .collect(),
        )
    }
}

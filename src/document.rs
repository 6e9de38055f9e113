//! Document input boundary.
//!
//! The core pipeline works on plain, page-segmented text. Turning a PDF
//! (or anything else) into that text is the job of an external
//! collaborator behind the [`DocumentSource`] trait; this crate ships only
//! [`PlainTextSource`], which reads UTF-8 text files and treats form feeds
//! (`\x0c`) as page breaks.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// One page of extracted text.
///
/// `number` is 1-based and refers back to the source document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageText {
    /// 1-based page number in the source document.
    pub number: usize,
    /// Plain text content of the page.
    pub text: String,
}

impl PageText {
    /// Create a page.
    #[must_use]
    pub fn new(number: usize, text: impl Into<String>) -> Self {
        Self {
            number,
            text: text.into(),
        }
    }
}

/// A page-segmented plain-text document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pages: Vec<PageText>,
}

impl Document {
    /// Create a document from pre-segmented pages.
    #[must_use]
    pub fn new(pages: Vec<PageText>) -> Self {
        Self { pages }
    }

    /// Build a document from raw text, splitting pages on form feeds.
    ///
    /// Empty or whitespace-only input yields a single empty page: the
    /// pipeline reports an absent result for it, not an error. The
    /// terminal no-text condition is reserved for a [`DocumentSource`]
    /// that yields zero pages.
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        if text.trim().is_empty() {
            return Self {
                pages: vec![PageText::new(1, "")],
            };
        }
        let pages = text
            .split('\x0c')
            .enumerate()
            .map(|(i, page)| PageText::new(i + 1, page))
            .collect();
        Self { pages }
    }

    /// Drain a [`DocumentSource`], failing with [`Error::NoText`] if the
    /// source yields no pages.
    pub fn from_source(source: &dyn DocumentSource) -> Result<Self> {
        let pages = source.pages()?;
        if pages.is_empty() {
            return Err(Error::NoText);
        }
        Ok(Self { pages })
    }

    /// The document's pages, in order.
    #[must_use]
    pub fn pages(&self) -> &[PageText] {
        &self.pages
    }

    /// True if the document has no pages at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

/// The document-to-text collaborator boundary.
///
/// Implementations decode some upstream format (PDF, OCR output, ...) into
/// per-page plain text. The pipeline never sees the bytes behind this
/// trait.
pub trait DocumentSource {
    /// Yield the document's pages, in order.
    fn pages(&self) -> Result<Vec<PageText>>;
}

/// Reads a UTF-8 text file; form feeds separate pages.
#[derive(Debug, Clone)]
pub struct PlainTextSource {
    path: PathBuf,
}

impl PlainTextSource {
    /// Create a source for the given file path.
    #[must_use]
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl DocumentSource for PlainTextSource {
    fn pages(&self) -> Result<Vec<PageText>> {
        let text = std::fs::read_to_string(&self.path)?;
        Ok(Document::from_text(&text).pages)
    }
}

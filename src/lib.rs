//! # quantscan
//!
//! Extract every numeric quantity from a document, normalize each to a
//! common unit basis, and report the largest — with source locations.
//!
//! Not every numeral denotes a measurable quantity: page numbers, years,
//! footnote markers, and section numbers are classified out by a
//! deterministic, rule-based context classifier before the unit-aware
//! ranking. Two results are always reported side by side:
//!
//! - **base case** — the literal largest numeral, ignoring units and
//!   context entirely;
//! - **bonus case** — the largest unit-normalized, context-validated
//!   quantity.
//!
//! ## Pipeline
//!
//! ```text
//! document text -> Scanner -> Extractor (UnitTable) -> Classifier
//!               -> Normalizer -> Ranker -> RankedResult
//! ```
//!
//! Each stage is synchronous and ordered; the only shared state is the
//! read-only [`UnitTable`], passed by reference, so independent runs never
//! interfere.
//!
//! ## Quick start
//!
//! ```rust
//! use quantscan::{Document, Pipeline, PipelineConfig, UnitTable};
//!
//! # fn main() -> quantscan::Result<()> {
//! let table = UnitTable::default();
//! let pipeline = Pipeline::new(&table, PipelineConfig::default())?;
//!
//! let doc = Document::from_text("The beam weighs 3,500 kg, see page 12.");
//! let result = pipeline.run(&doc)?;
//!
//! let bonus = result.bonus_case.expect("a unit-bearing quantity");
//! assert_eq!(bonus.normalized_value, Some(3500.0));
//! assert_eq!(bonus.location.page, 1);
//! # Ok(())
//! # }
//! ```
//!
//! ## Best effort, explicitly
//!
//! The classifier is an ordered set of heuristic rules, not a trained
//! model. Uncertain numerals are labeled `AMBIGUOUS` with low confidence
//! rather than silently dropped or included; confidence scores are rule
//! weights, not calibrated probabilities.

#![warn(missing_docs)]

pub mod classify;
pub mod config;
pub mod document;
mod error;
pub mod extract;
pub mod normalize;
pub mod quantity;
pub mod rank;
pub mod report;
pub mod scan;
pub mod types;
pub mod units;

pub use classify::Classifier;
pub use config::PipelineConfig;
pub use document::{Document, DocumentSource, PageText, PlainTextSource};
pub use error::{Error, Result};
pub use extract::Extractor;
pub use quantity::{Label, Location, Quantity};
pub use rank::{RankedResult, Ranker};
pub use scan::{scan_page, Token, TokenKind};
pub use types::Confidence;
pub use units::{Dimension, UnitDef, UnitTable};

/// The assembled extraction pipeline.
///
/// Borrows the read-only unit table; the configuration is validated once
/// at construction. One `Pipeline` can run many documents; each run is
/// independent.
pub struct Pipeline<'a> {
    table: &'a UnitTable,
    config: PipelineConfig,
}

impl<'a> Pipeline<'a> {
    /// Create a pipeline. Fails if the configuration is out of bounds.
    pub fn new(table: &'a UnitTable, config: PipelineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { table, config })
    }

    /// The active configuration.
    #[must_use]
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run the full pipeline over one document.
    ///
    /// A document with zero pages (the upstream collaborator yielded no
    /// text) is the terminal [`Error::NoText`] condition. A document that
    /// has pages but no extractable numerals yields an empty
    /// [`RankedResult`], not an error.
    pub fn run(&self, doc: &Document) -> Result<RankedResult> {
        if doc.is_empty() {
            return Err(Error::NoText);
        }

        let extractor = Extractor::new(self.table, self.config.context_window);
        let mut quantities = extractor.extract(doc);
        log::debug!("extracted {} numerals", quantities.len());

        Classifier::new().classify_all(&mut quantities);
        normalize::normalize_accepted(&mut quantities, self.table);

        let accepted = quantities.iter().filter(|q| q.is_quantity()).count();
        log::debug!("{} of {} classified as quantities", accepted, quantities.len());

        let ranker = Ranker::new(self.config.confidence_threshold, self.config.top_n);
        Ok(ranker.rank(quantities))
    }
}

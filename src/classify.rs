//! Context Classifier — rule-based labeling of numerals.
//!
//! Not every numeral denotes a measurable quantity: page numbers, years,
//! footnote markers, and section numbers must be excluded before ranking.
//! This classifier is a deliberate simplification of "NLP context
//! understanding": an ordered set of pure predicates over the context
//! window, evaluated in fixed priority order, first match wins. It is
//! best-effort and deterministic — uncertain cases surface as
//! [`Label::Ambiguous`] rather than being silently dropped or included.
//!
//! Rule order (first match wins):
//! 1. structural marker immediately preceding  -> NON_QUANTITY, 0.9
//! 2. calendar year with temporal cue          -> NON_QUANTITY, 0.8
//! 3. recognized unit matched by the extractor -> QUANTITY, 0.95
//! 4. quantity cue in the window               -> QUANTITY, 0.6
//! 5. otherwise                                -> AMBIGUOUS, 0.3

use crate::quantity::{Label, Quantity};
use crate::types::Confidence;

/// Structural markers that mark a numeral as document plumbing when they
/// immediately precede it.
const STRUCTURAL_MARKERS: &[&str] = &[
    "page", "figure", "fig", "table", "section", "sec", "§", "chapter", "footnote", "no",
];

/// Temporal cues that, with a 4-digit numeral in the calendar range,
/// indicate a year rather than a quantity.
const TEMPORAL_CUES: &[&str] = &["in", "since", "until", "year", "during"];

/// Cues that suggest a bare numeral is still a quantity.
const QUANTITY_CUES: &[&str] = &[
    "total",
    "approximately",
    "weighs",
    "weighing",
    "costs",
    "cost",
    "measured",
];

/// Plausible calendar-year range for rule 2.
const YEAR_RANGE: std::ops::RangeInclusive<f64> = 1500.0..=2100.0;

/// Rule-based context classifier. Stateless; safe to share.
#[derive(Debug, Clone, Copy, Default)]
pub struct Classifier;

impl Classifier {
    /// Create a classifier.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Annotate one quantity with a label and confidence.
    pub fn classify(&self, q: &mut Quantity) {
        let (label, confidence) = decide(q);
        q.label = Some(label);
        q.confidence = Some(Confidence::saturating(confidence));
    }

    /// Annotate a batch in place.
    pub fn classify_all(&self, quantities: &mut [Quantity]) {
        for q in quantities {
            self.classify(q);
        }
    }
}

/// The ordered rules. Pure function of the quantity's fields.
fn decide(q: &Quantity) -> (Label, f64) {
    if structural_marker_precedes(q) {
        return (Label::NonQuantity, 0.9);
    }
    if looks_like_year(q) {
        return (Label::NonQuantity, 0.8);
    }
    if q.unit_surface.is_some() {
        return (Label::Quantity, 0.95);
    }
    if has_quantity_cue(q) {
        return (Label::Quantity, 0.6);
    }
    (Label::Ambiguous, 0.3)
}

fn structural_marker_precedes(q: &Quantity) -> bool {
    q.preceding_word()
        .map(fold)
        .is_some_and(|w| STRUCTURAL_MARKERS.contains(&w.as_str()))
}

fn looks_like_year(q: &Quantity) -> bool {
    let four_digit = q.raw_numeral.len() == 4 && q.raw_numeral.bytes().all(|b| b.is_ascii_digit());
    four_digit
        && YEAR_RANGE.contains(&q.parsed_value)
        && window_words(q).any(|w| TEMPORAL_CUES.contains(&w.as_str()))
}

fn has_quantity_cue(q: &Quantity) -> bool {
    window_words(q).any(|w| QUANTITY_CUES.contains(&w.as_str()))
}

fn window_words(q: &Quantity) -> impl Iterator<Item = String> + '_ {
    q.words_before
        .iter()
        .chain(q.words_after.iter())
        .map(|w| fold(w))
}

fn fold(word: &str) -> String {
    word.trim_end_matches('.').to_lowercase()
}

//! Quantity data model: the record flowing through the pipeline.

use crate::types::Confidence;
use crate::units::Dimension;
use serde::{Deserialize, Serialize};

/// Classification of a numeral's context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Label {
    /// Denotes a measurable, unit-bearing (or cue-supported) quantity.
    Quantity,
    /// Structural or temporal numeral (page number, year, ...).
    NonQuantity,
    /// No rule fired; surfaced rather than silently dropped or included.
    Ambiguous,
}

impl Label {
    /// Short label for display.
    #[must_use]
    pub fn as_label(&self) -> &'static str {
        match self {
            Label::Quantity => "QUANTITY",
            Label::NonQuantity => "NON_QUANTITY",
            Label::Ambiguous => "AMBIGUOUS",
        }
    }
}

impl std::fmt::Display for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_label())
    }
}

/// Source location of a numeral, referring back to the original document
/// text. Orders by page, then line, then offset.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Location {
    /// 1-based page number.
    pub page: usize,
    /// 1-based line number within the page.
    pub line: usize,
    /// Byte offset of the numeral within the page text.
    pub offset: usize,
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "page {}, line {}, offset {}", self.page, self.line, self.offset)
    }
}

/// One extracted numeral with its unit candidate and context.
///
/// Created by the extractor; the classifier fills `label`/`confidence`,
/// the normalizer fills `normalized_value`. Never mutated after the ranker
/// consumes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quantity {
    /// The numeral's surface text, as it appeared in the document.
    pub raw_numeral: String,
    /// Parsed value, with magnitude words ("million") already applied.
    pub parsed_value: f64,
    /// Surface form of the matched unit, if any.
    pub unit_surface: Option<String>,
    /// Dimension of the matched unit; `Unspecified` if none matched.
    pub dimension: Dimension,
    /// Where the numeral was found.
    pub location: Location,
    /// Context words preceding the numeral, nearest last.
    pub words_before: Vec<String>,
    /// Context words following the numeral, nearest first.
    pub words_after: Vec<String>,
    /// Ambient scale from an enclosing "in millions" table section.
    pub section_scale: f64,
    /// Classifier label; `None` until classified.
    pub label: Option<Label>,
    /// Classifier confidence; `None` until classified.
    pub confidence: Option<Confidence>,
    /// Value in the dimension's base unit; `None` until normalized.
    pub normalized_value: Option<f64>,
}

impl Quantity {
    /// Render the surrounding words and the numeral as one window string.
    #[must_use]
    pub fn context_window(&self) -> String {
        let mut parts: Vec<&str> = self.words_before.iter().map(String::as_str).collect();
        parts.push(&self.raw_numeral);
        parts.extend(self.words_after.iter().map(String::as_str));
        parts.join(" ")
    }

    /// The word immediately preceding the numeral, if any.
    #[must_use]
    pub fn preceding_word(&self) -> Option<&str> {
        self.words_before.last().map(String::as_str)
    }

    /// True once the classifier accepted this as a quantity.
    #[must_use]
    pub fn is_quantity(&self) -> bool {
        self.label == Some(Label::Quantity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Quantity {
        Quantity {
            raw_numeral: "3,500".to_string(),
            parsed_value: 3500.0,
            unit_surface: Some("kg".to_string()),
            dimension: Dimension::Mass,
            location: Location {
                page: 1,
                line: 1,
                offset: 16,
            },
            words_before: vec!["beam".to_string(), "weighs".to_string()],
            words_after: vec!["kg".to_string(), "and".to_string()],
            section_scale: 1.0,
            label: None,
            confidence: None,
            normalized_value: None,
        }
    }

    #[test]
    fn context_window_renders_in_order() {
        assert_eq!(sample().context_window(), "beam weighs 3,500 kg and");
    }

    #[test]
    fn preceding_word_is_nearest() {
        assert_eq!(sample().preceding_word(), Some("weighs"));
    }

    #[test]
    fn location_ordering() {
        let a = Location { page: 1, line: 2, offset: 30 };
        let b = Location { page: 1, line: 3, offset: 0 };
        let c = Location { page: 2, line: 1, offset: 0 };
        assert!(a < b);
        assert!(b < c);
    }

    #[test]
    fn label_display() {
        assert_eq!(Label::NonQuantity.to_string(), "NON_QUANTITY");
    }
}

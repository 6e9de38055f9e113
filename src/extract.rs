//! Quantity Extractor — pairs numerals with adjacent unit candidates.
//!
//! For each numeral token the extractor parses the value, applies any
//! magnitude word ("thousand", "million", ...) immediately following it as
//! a multiplicative modifier, and then looks for a unit: the token
//! immediately following the numeral (after the magnitude word) is
//! preferred; failing that, the token immediately preceding (handles
//! "$ 100"). No match means [`Dimension::Unspecified`].
//!
//! Adjacent numerals are never merged: "3 2" yields two quantities.
//!
//! Numerals that fail to parse (or overflow to non-finite values) are
//! skipped with a debug log — a per-token failure never aborts the run.
//!
//! Table sections opened by "FY 2025" / "Fiscal Year" headings that
//! declare a scale ("in millions", "($M)") establish an ambient
//! `section_scale` recorded on every quantity extracted after the heading;
//! the normalizer applies it.

use crate::document::{Document, PageText};
use crate::quantity::{Location, Quantity};
use crate::scan::{scan_page, Token, TokenKind};
use crate::units::{Dimension, UnitTable};
use once_cell::sync::Lazy;
use regex::Regex;

/// Extracts [`Quantity`] records from a token stream.
pub struct Extractor<'a> {
    table: &'a UnitTable,
    window: usize,
}

impl<'a> Extractor<'a> {
    /// Create an extractor over a read-only unit table.
    ///
    /// `window` is the number of context tokens captured per side.
    #[must_use]
    pub fn new(table: &'a UnitTable, window: usize) -> Self {
        Self { table, window }
    }

    /// Extract all quantities from a document, page by page.
    #[must_use]
    pub fn extract(&self, doc: &Document) -> Vec<Quantity> {
        doc.pages()
            .iter()
            .flat_map(|page| self.extract_page(page))
            .collect()
    }

    /// Extract all quantities from one page.
    #[must_use]
    pub fn extract_page(&self, page: &PageText) -> Vec<Quantity> {
        let tokens: Vec<Token> = scan_page(page).collect();
        let scales = section_scales(&page.text);
        let mut out = Vec::new();

        for (i, token) in tokens.iter().enumerate() {
            if token.kind != TokenKind::Numeral {
                continue;
            }
            let Some(value) = parse_numeral(&token.text) else {
                log::debug!(
                    "skipping unparseable numeral {:?} at page {}, offset {}",
                    token.text,
                    token.page,
                    token.start
                );
                continue;
            };

            // Magnitude word immediately following the numeral.
            let mut multiplier = 1.0;
            let mut unit_idx = i + 1;
            if let Some(next) = tokens.get(i + 1) {
                if next.kind == TokenKind::Word {
                    if let Some(factor) = magnitude_factor(&next.text) {
                        multiplier = factor;
                        unit_idx = i + 2;
                    }
                }
            }

            // Prefer the unit immediately following; fall back to the one
            // immediately preceding.
            let mut unit_surface = None;
            if let Some(next) = tokens.get(unit_idx) {
                if next.kind == TokenKind::Word && self.table.lookup(&next.text).is_some() {
                    unit_surface = Some(next.text.clone());
                }
            }
            if unit_surface.is_none() && i > 0 {
                let prev = &tokens[i - 1];
                if prev.kind == TokenKind::Word && self.table.lookup(&prev.text).is_some() {
                    unit_surface = Some(prev.text.clone());
                }
            }
            let dimension = unit_surface
                .as_deref()
                .and_then(|s| self.table.lookup(s))
                .map_or(Dimension::Unspecified, |def| def.dimension);

            let words_before: Vec<String> = tokens[..i]
                .iter()
                .rev()
                .take(self.window)
                .map(|t| t.text.clone())
                .collect::<Vec<_>>()
                .into_iter()
                .rev()
                .collect();
            let words_after: Vec<String> = tokens[i + 1..]
                .iter()
                .take(self.window)
                .map(|t| t.text.clone())
                .collect();

            let section_scale = scales
                .iter()
                .rev()
                .find(|(pos, _)| *pos <= token.start)
                .map_or(1.0, |(_, factor)| *factor);

            out.push(Quantity {
                raw_numeral: token.text.clone(),
                parsed_value: value * multiplier,
                unit_surface,
                dimension,
                location: Location {
                    page: token.page,
                    line: token.line,
                    offset: token.start,
                },
                words_before,
                words_after,
                section_scale,
                label: None,
                confidence: None,
                normalized_value: None,
            });
        }
        out
    }
}

/// Parse a numeral span: strip comma grouping, accept scientific notation,
/// reject non-finite results.
#[must_use]
pub fn parse_numeral(text: &str) -> Option<f64> {
    text.replace(',', "")
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

/// Multiplicative factor for a magnitude word, plural-insensitive.
#[must_use]
pub fn magnitude_factor(word: &str) -> Option<f64> {
    let folded = word.trim_end_matches('.').to_lowercase();
    let stem = folded.strip_suffix('s').unwrap_or(&folded);
    match stem {
        "thousand" => Some(1e3),
        "million" => Some(1e6),
        "billion" => Some(1e9),
        "trillion" => Some(1e12),
        _ => None,
    }
}

static BOUNDARY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?mi)^\s*(?:FY\s*\d{4}|Fiscal\s+Year)").expect("boundary regex is valid")
});

static SCALE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\bin\s+(thousand|million|billion|trillion)s?\b|\(\s*\$\s*(k|m|bn?)\s*\)")
        .expect("scale regex is valid")
});

/// Find table-section boundaries and the scale each section declares.
///
/// Returns (byte offset of section start, scale factor), in order. Text
/// before the first boundary has no entry (scale 1.0). A section with no
/// scale declaration resets to 1.0.
fn section_scales(text: &str) -> Vec<(usize, f64)> {
    let starts: Vec<usize> = BOUNDARY_RE.find_iter(text).map(|m| m.start()).collect();
    let mut out = Vec::with_capacity(starts.len());
    for (k, &start) in starts.iter().enumerate() {
        let end = starts.get(k + 1).copied().unwrap_or(text.len());
        let factor = SCALE_RE
            .captures(&text[start..end])
            .and_then(|caps| {
                if let Some(word) = caps.get(1) {
                    magnitude_factor(word.as_str())
                } else {
                    caps.get(2).and_then(|letter| {
                        match letter.as_str().to_lowercase().as_str() {
                            "k" => Some(1e3),
                            "m" => Some(1e6),
                            "b" | "bn" => Some(1e9),
                            _ => None,
                        }
                    })
                }
            })
            .unwrap_or(1.0);
        out.push((start, factor));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(text: &str) -> Vec<Quantity> {
        let table = UnitTable::default();
        let extractor = Extractor::new(&table, 5);
        extractor.extract_page(&PageText::new(1, text))
    }

    #[test]
    fn unit_following_preferred() {
        let qs = extract("The beam weighs 3,500 kg and is listed on page 12.");
        assert_eq!(qs.len(), 2);
        assert_eq!(qs[0].raw_numeral, "3,500");
        assert!((qs[0].parsed_value - 3500.0).abs() < 1e-9);
        assert_eq!(qs[0].unit_surface.as_deref(), Some("kg"));
        assert_eq!(qs[0].dimension, Dimension::Mass);
        assert_eq!(qs[1].raw_numeral, "12");
        assert_eq!(qs[1].dimension, Dimension::Unspecified);
    }

    #[test]
    fn unit_preceding_fallback() {
        let qs = extract("It cost $ 100 overall.");
        assert_eq!(qs.len(), 1);
        assert_eq!(qs[0].unit_surface.as_deref(), Some("$"));
        assert_eq!(qs[0].dimension, Dimension::Currency);
    }

    #[test]
    fn magnitude_word_multiplies_before_unit_match() {
        let qs = extract("Revenue reached 2.5 million dollars in 2023.");
        assert_eq!(qs[0].raw_numeral, "2.5");
        assert!((qs[0].parsed_value - 2_500_000.0).abs() < 1e-6);
        assert_eq!(qs[0].unit_surface.as_deref(), Some("dollars"));
        assert_eq!(qs[0].dimension, Dimension::Currency);
    }

    #[test]
    fn magnitude_without_unit_stays_unspecified() {
        let qs = extract("about 3.2 million were affected");
        assert_eq!(qs.len(), 1);
        assert!((qs[0].parsed_value - 3_200_000.0).abs() < 1e-6);
        assert_eq!(qs[0].dimension, Dimension::Unspecified);
    }

    #[test]
    fn adjacent_numerals_never_merge() {
        let qs = extract("values 3 2 follow");
        assert_eq!(qs.len(), 2);
        assert_eq!(qs[0].raw_numeral, "3");
        assert_eq!(qs[1].raw_numeral, "2");
    }

    #[test]
    fn percent_symbol_is_a_unit() {
        let qs = extract("grew by 15% overall");
        assert_eq!(qs[0].dimension, Dimension::Percentage);
        assert_eq!(qs[0].unit_surface.as_deref(), Some("%"));
    }

    #[test]
    fn non_finite_numerals_skipped() {
        // 1e999 overflows f64; the token is skipped, the run continues.
        let qs = extract("bad 1e999 then good 5 kg");
        assert_eq!(qs.len(), 1);
        assert_eq!(qs[0].raw_numeral, "5");
    }

    #[test]
    fn locations_point_back_into_text() {
        let text = "line one\nweight 7 kg";
        let qs = extract(text);
        assert_eq!(qs[0].location.page, 1);
        assert_eq!(qs[0].location.line, 2);
        assert_eq!(&text[qs[0].location.offset..qs[0].location.offset + 1], "7");
    }

    #[test]
    fn section_scale_from_fy_heading() {
        let text = "Intro mentions 10.\nFY 2025 Budget (in millions)\nOutlays 450\nFY 2026 Budget\nOutlays 500";
        let qs = extract(text);
        let by_raw = |raw: &str| qs.iter().find(|q| q.raw_numeral == raw).unwrap();
        assert!((by_raw("10").section_scale - 1.0).abs() < 1e-9);
        assert!((by_raw("450").section_scale - 1e6).abs() < 1e-3);
        // Next section declares no scale: resets to 1.0.
        assert!((by_raw("500").section_scale - 1.0).abs() < 1e-9);
    }

    #[test]
    fn dollar_letter_scale_marker() {
        let scales = section_scales("FY 2024 ($M)\n100\n200");
        assert_eq!(scales.len(), 1);
        assert!((scales[0].1 - 1e6).abs() < 1e-3);
    }

    #[test]
    fn context_window_capped() {
        let table = UnitTable::default();
        let extractor = Extractor::new(&table, 2);
        let qs = extractor.extract_page(&PageText::new(
            1,
            "alpha beta gamma delta 9 epsilon zeta eta",
        ));
        assert_eq!(qs[0].words_before, vec!["gamma", "delta"]);
        assert_eq!(qs[0].words_after, vec!["epsilon", "zeta"]);
    }

    #[test]
    fn parse_numeral_forms() {
        assert_eq!(parse_numeral("3,500"), Some(3500.0));
        assert_eq!(parse_numeral("1.5e6"), Some(1_500_000.0));
        assert_eq!(parse_numeral("-12"), Some(-12.0));
        assert_eq!(parse_numeral("1e999"), None);
        assert_eq!(parse_numeral("abc"), None);
    }

    #[test]
    fn magnitude_factor_plurals() {
        assert_eq!(magnitude_factor("millions"), Some(1e6));
        assert_eq!(magnitude_factor("Billion"), Some(1e9));
        assert_eq!(magnitude_factor("meters"), None);
    }
}

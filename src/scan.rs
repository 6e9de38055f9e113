//! Tokenizer/Scanner — raw page text to position-tagged tokens.
//!
//! The scanner is a pure function of the page text: lazy, finite, and
//! restartable (scanning the same page twice yields identical sequences).
//! It recognizes numeral spans in integer, decimal, comma-grouped, and
//! scientific-notation forms, plus adjacent word spans and the unit/marker
//! symbols `% $ € £ §` needed downstream for unit and context matching.
//!
//! Malformed or empty text yields an empty token sequence, never an error.

use crate::document::PageText;
use once_cell::sync::Lazy;
use regex::Regex;

/// Whether a token is a numeral span or a word span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// A numeral-looking span (not yet parsed).
    Numeral,
    /// A word or unit/marker symbol.
    Word,
}

/// A position-tagged token. Immutable once produced.
///
/// `start`/`end` are byte offsets into the page text; `line` is 1-based
/// within the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// The token's surface text.
    pub text: String,
    /// Byte offset of the token's start within the page text.
    pub start: usize,
    /// Byte offset one past the token's end.
    pub end: usize,
    /// 1-based page number.
    pub page: usize,
    /// 1-based line number within the page.
    pub line: usize,
    /// Numeral or word.
    pub kind: TokenKind,
}

// Numeral alternatives are ordered longest-first: scientific notation,
// then comma-grouped, then plain decimal/integer. Words keep a trailing
// dot so abbreviations like "fig." survive as one token.
static TOKEN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?P<num>[-+]?\d+(?:\.\d+)?[eE][-+]?\d+|[-+]?\d{1,3}(?:,\d{3})+(?:\.\d+)?|[-+]?\d+(?:\.\d+)?)|(?P<word>\p{L}[\p{L}'’\-]*\.?|[%$€£§])",
    )
    .expect("token regex is valid")
});

/// Scan one page into a lazy token sequence.
pub fn scan_page(page: &PageText) -> impl Iterator<Item = Token> + '_ {
    let newlines: Vec<usize> = page
        .text
        .bytes()
        .enumerate()
        .filter(|&(_, b)| b == b'\n')
        .map(|(i, _)| i)
        .collect();
    let number = page.number;
    TOKEN_RE.captures_iter(&page.text).filter_map(move |caps| {
        let (m, kind) = match caps.name("num") {
            Some(m) => (m, TokenKind::Numeral),
            None => (caps.name("word")?, TokenKind::Word),
        };
        let line = newlines.partition_point(|&p| p < m.start()) + 1;
        Some(Token {
            text: m.as_str().to_string(),
            start: m.start(),
            end: m.end(),
            page: number,
            line,
            kind,
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(text: &str) -> PageText {
        PageText::new(1, text)
    }

    fn numerals(text: &str) -> Vec<String> {
        scan_page(&page(text))
            .filter(|t| t.kind == TokenKind::Numeral)
            .map(|t| t.text)
            .collect()
    }

    #[test]
    fn recognizes_numeral_forms() {
        assert_eq!(numerals("42 items"), vec!["42"]);
        assert_eq!(numerals("3.14 and 2.5"), vec!["3.14", "2.5"]);
        assert_eq!(numerals("total 3,500,000"), vec!["3,500,000"]);
        assert_eq!(numerals("1.5e6 or 2E-3"), vec!["1.5e6", "2E-3"]);
        assert_eq!(numerals("-12 and +7"), vec!["-12", "+7"]);
    }

    #[test]
    fn bad_grouping_splits() {
        // "1,23" is not valid comma grouping; it is two numerals.
        assert_eq!(numerals("1,23"), vec!["1", "23"]);
    }

    #[test]
    fn adjacent_numerals_stay_separate() {
        assert_eq!(numerals("3 2"), vec!["3", "2"]);
    }

    #[test]
    fn symbols_are_word_tokens() {
        let tokens: Vec<Token> = scan_page(&page("15% of $100 on p. § 4")).collect();
        let words: Vec<&str> = tokens
            .iter()
            .filter(|t| t.kind == TokenKind::Word)
            .map(|t| t.text.as_str())
            .collect();
        assert!(words.contains(&"%"));
        assert!(words.contains(&"$"));
        assert!(words.contains(&"§"));
    }

    #[test]
    fn tracks_lines_and_offsets() {
        let tokens: Vec<Token> = scan_page(&page("one 1\ntwo 2\nthree 3")).collect();
        let three = tokens.iter().find(|t| t.text == "3").unwrap();
        assert_eq!(three.line, 3);
        assert_eq!(&"one 1\ntwo 2\nthree 3"[three.start..three.end], "3");

        let one = tokens.iter().find(|t| t.text == "1").unwrap();
        assert_eq!(one.line, 1);
    }

    #[test]
    fn empty_text_yields_nothing() {
        assert_eq!(scan_page(&page("")).count(), 0);
        assert_eq!(scan_page(&page("   \n\t")).count(), 0);
    }

    #[test]
    fn restartable() {
        let p = page("The beam weighs 3,500 kg on page 12.");
        let first: Vec<Token> = scan_page(&p).collect();
        let second: Vec<Token> = scan_page(&p).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn abbreviations_keep_trailing_dot() {
        let tokens: Vec<String> = scan_page(&page("see fig. 4")).map(|t| t.text).collect();
        assert!(tokens.contains(&"fig.".to_string()));
    }
}

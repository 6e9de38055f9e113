//! Ranker — select maxima with deterministic tie-breaks.
//!
//! Two independent, equally-reported outputs:
//!
//! - **base case**: maximum `parsed_value` over all extracted numerals,
//!   ignoring classification and units entirely;
//! - **bonus case**: maximum `normalized_value` among QUANTITY-labeled
//!   records above the confidence threshold, with a per-dimension
//!   breakdown.
//!
//! Ties break toward the earliest document location (page, line, offset),
//! independent of input order. An empty document yields absent results,
//! never an error.

use crate::quantity::{Label, Quantity};
use crate::units::Dimension;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// The ranked result set handed to the reporting boundary.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RankedResult {
    /// Largest numeral overall, regardless of unit or label.
    pub base_case: Option<Quantity>,
    /// Largest normalized, QUANTITY-labeled value above threshold.
    pub bonus_case: Option<Quantity>,
    /// Per-dimension maxima among bonus-eligible quantities.
    pub per_dimension_max: BTreeMap<Dimension, Quantity>,
    /// Top-N by raw value (base path), descending.
    pub top_base: Vec<Quantity>,
    /// Top-N by normalized value (bonus path), descending.
    pub top_bonus: Vec<Quantity>,
}

impl RankedResult {
    /// True if nothing was extracted at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.base_case.is_none() && self.bonus_case.is_none()
    }
}

/// Selects maxima from classified, normalized quantities.
#[derive(Debug, Clone, Copy)]
pub struct Ranker {
    threshold: f64,
    top_n: usize,
}

impl Ranker {
    /// Create a ranker with the given bonus-case confidence threshold and
    /// top-N list length.
    #[must_use]
    pub fn new(threshold: f64, top_n: usize) -> Self {
        Self { threshold, top_n }
    }

    /// Rank a batch of quantities.
    #[must_use]
    pub fn rank(&self, quantities: Vec<Quantity>) -> RankedResult {
        let base_case = quantities
            .iter()
            .max_by(|a, b| by_value(a.parsed_value, a, b.parsed_value, b))
            .cloned();

        let eligible: Vec<&Quantity> = quantities
            .iter()
            .filter(|q| self.bonus_eligible(q))
            .collect();

        let bonus_case = eligible
            .iter()
            .max_by(|a, b| by_norm(a, b))
            .map(|q| (*q).clone());

        let mut per_dimension_max: BTreeMap<Dimension, Quantity> = BTreeMap::new();
        for q in &eligible {
            match per_dimension_max.get(&q.dimension) {
                Some(best) if by_norm(best, q) != Ordering::Less => {}
                _ => {
                    per_dimension_max.insert(q.dimension, (*q).clone());
                }
            }
        }

        let mut top_base: Vec<Quantity> = quantities.clone();
        top_base.sort_by(|a, b| by_value(b.parsed_value, b, a.parsed_value, a));
        top_base.truncate(self.top_n);

        let mut top_bonus: Vec<Quantity> = eligible.into_iter().cloned().collect();
        top_bonus.sort_by(|a, b| by_norm(b, a));
        top_bonus.truncate(self.top_n);

        RankedResult {
            base_case,
            bonus_case,
            per_dimension_max,
            top_base,
            top_bonus,
        }
    }

    fn bonus_eligible(&self, q: &Quantity) -> bool {
        q.label == Some(Label::Quantity)
            && q.confidence.is_some_and(|c| c.get() >= self.threshold)
            && q.normalized_value.is_some()
    }
}

/// Larger value wins; equal values prefer the *earlier* location, so the
/// earlier location compares as the greater element here.
fn by_value(va: f64, a: &Quantity, vb: f64, b: &Quantity) -> Ordering {
    match va.partial_cmp(&vb) {
        Some(Ordering::Equal) | None => b.location.cmp(&a.location),
        Some(ord) => ord,
    }
}

fn by_norm(a: &Quantity, b: &Quantity) -> Ordering {
    by_value(
        a.normalized_value.unwrap_or(f64::NEG_INFINITY),
        a,
        b.normalized_value.unwrap_or(f64::NEG_INFINITY),
        b,
    )
}

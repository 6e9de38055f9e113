//! Normalizer — convert quantities into their dimension's base unit.
//!
//! `normalized_value = parsed_value * scale_to_base * section_scale`.
//! Unspecified-dimension quantities pass through (scale 1.0): absence of a
//! unit is handled by passthrough, not error. The value is always
//! recomputed from `parsed_value`, so normalization is idempotent.

use crate::quantity::Quantity;
use crate::units::UnitTable;

/// Fill `normalized_value`. Pure and total; no failure mode.
pub fn normalize(q: &mut Quantity, table: &UnitTable) {
    let unit_scale = q
        .unit_surface
        .as_deref()
        .and_then(|s| table.lookup(s))
        .map_or(1.0, |def| def.scale_to_base);
    q.normalized_value = Some(q.parsed_value * unit_scale * q.section_scale);
}

/// Normalize every quantity the classifier accepted.
///
/// Only QUANTITY-labeled records get a normalized value; the base case
/// ranks on `parsed_value` and needs no conversion.
pub fn normalize_accepted(quantities: &mut [Quantity], table: &UnitTable) {
    for q in quantities.iter_mut().filter(|q| q.is_quantity()) {
        normalize(q, table);
    }
}

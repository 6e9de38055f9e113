//! Unit Table — surface forms to (dimension, scale-to-base).
//!
//! The table maps unit surface forms (strings, abbreviations, symbol
//! variants) to a dimension and a scale factor into that dimension's base
//! unit. Lookups fold case, trailing dots, and regular plurals, so
//! `lookup("KG") == lookup("kg") == lookup("kilograms")`. Irregular
//! plurals ("feet", "inches") are listed explicitly.
//!
//! The table is built once and read-only for the pipeline's lifetime;
//! shared `&UnitTable` access is safe by construction. A lookup miss is
//! not an error — the numeral is tagged [`Dimension::Unspecified`].
//!
//! Deliberately excluded surface forms: bare "in" (collides with the
//! preposition) and bare "t" (stray letters); "inch"/"inches" and
//! "tonne"/"ton" cover those units. "pound" maps to mass; currency keeps
//! "£"/"gbp".

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A category of quantity across which unit conversion is meaningful.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum Dimension {
    /// Mass; base unit kilogram.
    Mass,
    /// Length; base unit meter.
    Length,
    /// Currency; base unit dollar (no FX conversion).
    Currency,
    /// Time; base unit second.
    Time,
    /// Count; base unit item.
    Count,
    /// Percentage; base unit percent.
    Percentage,
    /// No recognized unit. Distinct from an excluded non-quantity.
    Unspecified,
}

impl Dimension {
    /// Short label for display.
    #[must_use]
    pub fn as_label(&self) -> &'static str {
        match self {
            Dimension::Mass => "MASS",
            Dimension::Length => "LENGTH",
            Dimension::Currency => "CURRENCY",
            Dimension::Time => "TIME",
            Dimension::Count => "COUNT",
            Dimension::Percentage => "PERCENTAGE",
            Dimension::Unspecified => "UNSPECIFIED",
        }
    }

    /// The base unit's name, for reports.
    #[must_use]
    pub fn base_unit(&self) -> &'static str {
        match self {
            Dimension::Mass => "kg",
            Dimension::Length => "m",
            Dimension::Currency => "dollar",
            Dimension::Time => "s",
            Dimension::Count => "item",
            Dimension::Percentage => "percent",
            Dimension::Unspecified => "-",
        }
    }
}

impl std::fmt::Display for Dimension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_label())
    }
}

/// Definition of a unit: its dimension and scale into the base unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UnitDef {
    /// The dimension this unit measures.
    pub dimension: Dimension,
    /// Multiplier into the dimension's base unit.
    pub scale_to_base: f64,
}

/// Static unit lookup table. Built once, read-only thereafter.
#[derive(Debug, Clone)]
pub struct UnitTable {
    map: HashMap<String, UnitDef>,
}

impl UnitTable {
    /// An empty table, for building custom unit sets at load time.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            map: HashMap::new(),
        }
    }

    /// Register surface forms for one unit.
    ///
    /// Forms are folded on insert; regular plurals need not be listed.
    pub fn insert(&mut self, forms: &[&str], dimension: Dimension, scale_to_base: f64) {
        let def = UnitDef {
            dimension,
            scale_to_base,
        };
        for form in forms {
            self.map.insert(fold(form), def);
        }
    }

    /// Look up a surface form. `None` means no recognized unit.
    #[must_use]
    pub fn lookup(&self, surface: &str) -> Option<&UnitDef> {
        let folded = fold(surface);
        if let Some(def) = self.map.get(&folded) {
            return Some(def);
        }
        // Regular plural: "kilograms" -> "kilogram", "kgs" -> "kg".
        if folded.len() > 1 {
            if let Some(stem) = folded.strip_suffix('s') {
                return self.map.get(stem);
            }
        }
        None
    }

    /// Number of distinct registered surface forms.
    #[must_use]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// True if no units are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

/// Case-fold and strip a trailing abbreviation dot.
fn fold(surface: &str) -> String {
    surface.trim_end_matches('.').to_lowercase()
}

impl Default for UnitTable {
    /// The standard table: mass, length, currency, time, count, and
    /// percentage units with common abbreviations and symbols.
    fn default() -> Self {
        let mut t = Self::empty();

        // Mass (base: kilogram)
        t.insert(&["mg", "milligram"], Dimension::Mass, 1e-6);
        t.insert(&["g", "gram", "gramme"], Dimension::Mass, 1e-3);
        t.insert(&["kg", "kilogram", "kilogramme"], Dimension::Mass, 1.0);
        t.insert(&["tonne", "ton"], Dimension::Mass, 1_000.0);
        t.insert(&["lb", "pound"], Dimension::Mass, 0.453_592_37);
        t.insert(&["oz", "ounce"], Dimension::Mass, 0.028_349_523_125);

        // Length (base: meter)
        t.insert(&["mm", "millimeter", "millimetre"], Dimension::Length, 1e-3);
        t.insert(&["cm", "centimeter", "centimetre"], Dimension::Length, 1e-2);
        t.insert(&["m", "meter", "metre"], Dimension::Length, 1.0);
        t.insert(&["km", "kilometer", "kilometre"], Dimension::Length, 1e3);
        t.insert(&["inch", "inches"], Dimension::Length, 0.0254);
        t.insert(&["ft", "foot", "feet"], Dimension::Length, 0.3048);
        t.insert(&["yd", "yard"], Dimension::Length, 0.9144);
        t.insert(&["mi", "mile"], Dimension::Length, 1_609.344);

        // Currency (base: dollar; nominal scale for non-USD symbols)
        t.insert(&["$", "usd", "dollar"], Dimension::Currency, 1.0);
        t.insert(&["cent"], Dimension::Currency, 0.01);
        t.insert(&["€", "eur", "euro"], Dimension::Currency, 1.0);
        t.insert(&["£", "gbp"], Dimension::Currency, 1.0);

        // Time (base: second)
        t.insert(&["ms", "millisecond"], Dimension::Time, 1e-3);
        t.insert(&["s", "sec", "second"], Dimension::Time, 1.0);
        t.insert(&["min", "minute"], Dimension::Time, 60.0);
        t.insert(&["h", "hr", "hour"], Dimension::Time, 3_600.0);
        t.insert(&["day"], Dimension::Time, 86_400.0);
        t.insert(&["week"], Dimension::Time, 604_800.0);
        t.insert(&["yr", "year"], Dimension::Time, 31_557_600.0);

        // Count (base: item)
        t.insert(&["item", "piece", "unit"], Dimension::Count, 1.0);
        t.insert(&["pair"], Dimension::Count, 2.0);
        t.insert(&["dozen"], Dimension::Count, 12.0);

        // Percentage (base: percent)
        t.insert(&["%", "percent", "pct", "percentage"], Dimension::Percentage, 1.0);
        t.insert(&["bps", "bp"], Dimension::Percentage, 0.01);

        t
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn case_insensitive() {
        let t = UnitTable::default();
        let kg = t.lookup("kg").unwrap();
        assert_eq!(t.lookup("KG"), Some(kg));
        assert_eq!(t.lookup("Kg"), Some(kg));
    }

    #[test]
    fn plural_insensitive() {
        let t = UnitTable::default();
        let kg = *t.lookup("kg").unwrap();
        assert_eq!(t.lookup("kilograms"), Some(&kg));
        assert_eq!(t.lookup("kgs"), Some(&kg));
        // Irregular plurals are listed explicitly.
        assert!(t.lookup("feet").is_some());
        assert!(t.lookup("inches").is_some());
    }

    #[test]
    fn abbreviation_dot_folds() {
        let t = UnitTable::default();
        assert_eq!(t.lookup("lb."), t.lookup("lb"));
    }

    #[test]
    fn miss_is_none() {
        let t = UnitTable::default();
        assert!(t.lookup("furlong").is_none());
        assert!(t.lookup("").is_none());
        // "in" is deliberately not a unit surface form.
        assert!(t.lookup("in").is_none());
    }

    #[test]
    fn dimensions_and_scales() {
        let t = UnitTable::default();
        let g = t.lookup("grams").unwrap();
        assert_eq!(g.dimension, Dimension::Mass);
        assert!((g.scale_to_base - 1e-3).abs() < 1e-12);

        let dollar = t.lookup("$").unwrap();
        assert_eq!(dollar.dimension, Dimension::Currency);

        let pct = t.lookup("%").unwrap();
        assert_eq!(pct.dimension, Dimension::Percentage);
    }

    #[test]
    fn extensible_at_load_time() {
        let mut t = UnitTable::default();
        let before = t.len();
        t.insert(&["furlong"], Dimension::Length, 201.168);
        assert_eq!(t.len(), before + 1);
        assert!(t.lookup("furlongs").is_some());
    }

    #[test]
    fn seconds_survive_plural_stripping() {
        // "s" itself must not be stripped into an empty key.
        let t = UnitTable::default();
        assert_eq!(t.lookup("s").unwrap().dimension, Dimension::Time);
    }
}

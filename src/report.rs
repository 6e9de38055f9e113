//! Report rendering for the CLI.
//!
//! The library contract ends at [`RankedResult`]; everything here is the
//! external reporting boundary the binary uses.

use crate::quantity::Quantity;
use crate::rank::RankedResult;
use crate::Result;
use colored::Colorize;
use std::fmt::Write as _;
use std::time::Duration;

/// One pipeline run, ready to render.
pub struct RunReport<'a> {
    /// Name of the processed input (file path or "stdin").
    pub source: &'a str,
    /// The ranker's output.
    pub result: &'a RankedResult,
    /// Wall-clock time for the run.
    pub elapsed: Duration,
}

impl RunReport<'_> {
    /// Render a human-readable text report.
    #[must_use]
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{} {}", "==".bold(), self.source.bold());

        match &self.result.base_case {
            Some(q) => {
                let _ = writeln!(
                    out,
                    "{} {} ({})",
                    "largest number (base):".green().bold(),
                    format_value(q.parsed_value),
                    q.location
                );
                let _ = writeln!(out, "  context: {:?}", q.context_window());
            }
            None => {
                let _ = writeln!(out, "{}", "no numbers found (base)".yellow());
            }
        }

        match &self.result.bonus_case {
            Some(q) => {
                let unit = q.unit_surface.as_deref().unwrap_or("-");
                let _ = writeln!(
                    out,
                    "{} {} {} = {} {} ({})",
                    "largest quantity (bonus):".green().bold(),
                    format_value(q.parsed_value),
                    unit,
                    format_value(q.normalized_value.unwrap_or(q.parsed_value)),
                    q.dimension.base_unit(),
                    q.location
                );
                let _ = writeln!(out, "  context: {:?}", q.context_window());
            }
            None => {
                let _ = writeln!(out, "{}", "no quantities found (bonus)".yellow());
            }
        }

        if !self.result.per_dimension_max.is_empty() {
            let _ = writeln!(out, "\n{}", "per-dimension maxima".bold());
            for (dim, q) in &self.result.per_dimension_max {
                let _ = writeln!(
                    out,
                    "  {:<12} {:>18} {}  ({})",
                    dim.as_label(),
                    format_value(q.normalized_value.unwrap_or(q.parsed_value)),
                    dim.base_unit(),
                    q.location
                );
            }
        }

        if !self.result.top_base.is_empty() {
            let _ = writeln!(out, "\n{}", "top numbers (base)".bold());
            render_rows(&mut out, &self.result.top_base, |q| q.parsed_value);
        }
        if !self.result.top_bonus.is_empty() {
            let _ = writeln!(out, "\n{}", "top quantities (bonus)".bold());
            render_rows(&mut out, &self.result.top_bonus, |q| {
                q.normalized_value.unwrap_or(q.parsed_value)
            });
        }

        let _ = writeln!(out, "\nelapsed: {:.2?}", self.elapsed);
        out
    }

    /// Render the result as pretty-printed JSON.
    pub fn render_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self.result)?)
    }
}

fn render_rows(out: &mut String, rows: &[Quantity], value: impl Fn(&Quantity) -> f64) {
    for (i, q) in rows.iter().enumerate() {
        let _ = writeln!(
            out,
            "  {:>2}. {:>18}  {:<8} page {:<4} {:?}",
            i + 1,
            format_value(value(q)),
            q.unit_surface.as_deref().unwrap_or("-"),
            q.location.page,
            q.raw_numeral
        );
    }
}

/// Thousands-grouped value formatting, two decimals for fractions.
fn format_value(v: f64) -> String {
    let formatted = if v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{:.0}", v)
    } else {
        format!("{:.2}", v)
    };
    group_thousands(&formatted)
}

fn group_thousands(s: &str) -> String {
    let (sign, rest) = s.strip_prefix('-').map_or(("", s), |r| ("-", r));
    let (int_part, frac_part) = match rest.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (rest, None),
    };
    let mut grouped = String::new();
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    match frac_part {
        Some(f) => format!("{sign}{grouped}.{f}"),
        None => format!("{sign}{grouped}"),
    }
}

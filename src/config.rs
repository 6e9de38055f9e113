//! Pipeline configuration surface.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Tunables consumed (not owned) by the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Words captured on each side of a numeral for classification.
    pub context_window: usize,
    /// Minimum classifier confidence for bonus-case inclusion.
    pub confidence_threshold: f64,
    /// Number of results kept in the top-N report lists.
    pub top_n: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            context_window: 5,
            confidence_threshold: 0.5,
            top_n: 10,
        }
    }
}

impl PipelineConfig {
    /// Set the context window size (words per side).
    #[must_use]
    pub fn with_context_window(mut self, words: usize) -> Self {
        self.context_window = words;
        self
    }

    /// Set the bonus-case confidence threshold.
    #[must_use]
    pub fn with_confidence_threshold(mut self, threshold: f64) -> Self {
        self.confidence_threshold = threshold;
        self
    }

    /// Set the top-N report list length.
    #[must_use]
    pub fn with_top_n(mut self, n: usize) -> Self {
        self.top_n = n;
        self
    }

    /// Check bounds. The pipeline constructor calls this.
    pub fn validate(&self) -> Result<()> {
        if self.context_window == 0 {
            return Err(Error::invalid_config("context window must be at least 1"));
        }
        if !(0.0..=1.0).contains(&self.confidence_threshold)
            || self.confidence_threshold.is_nan()
        {
            return Err(Error::invalid_config(format!(
                "confidence threshold {} outside [0, 1]",
                self.confidence_threshold
            )));
        }
        if self.top_n == 0 {
            return Err(Error::invalid_config("top-N must be at least 1"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        assert!(PipelineConfig::default().validate().is_ok());
    }

    #[test]
    fn builder_chain() {
        let cfg = PipelineConfig::default()
            .with_context_window(3)
            .with_confidence_threshold(0.7)
            .with_top_n(5);
        assert_eq!(cfg.context_window, 3);
        assert!((cfg.confidence_threshold - 0.7).abs() < f64::EPSILON);
        assert_eq!(cfg.top_n, 5);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(PipelineConfig::default()
            .with_context_window(0)
            .validate()
            .is_err());
        assert!(PipelineConfig::default()
            .with_confidence_threshold(1.5)
            .validate()
            .is_err());
        assert!(PipelineConfig::default()
            .with_confidence_threshold(f64::NAN)
            .validate()
            .is_err());
        assert!(PipelineConfig::default().with_top_n(0).validate().is_err());
    }
}

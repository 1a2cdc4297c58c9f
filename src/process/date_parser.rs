use chrono::NaiveDate;
use std::collections::BTreeMap;

use crate::error::{PipelineError, Result};

/// Turns the date cells of base tables into dates, fixing the handful of
/// strings known to be mistyped in the source documents.
#[derive(Debug, Clone, Default)]
pub struct DateCorrector {
    corrections: BTreeMap<String, String>,
}

impl DateCorrector {
    /// Keys and values are compared after separator normalization. A value
    /// that is also a key is rejected, so correcting twice is a no-op.
    pub fn new(corrections: &BTreeMap<String, String>) -> Result<Self> {
        let corrections: BTreeMap<String, String> = corrections
            .iter()
            .map(|(from, to)| (normalize_separators(from), normalize_separators(to)))
            .collect();

        if let Some((from, to)) = corrections
            .iter()
            .find(|(_, to)| corrections.contains_key(to.as_str()))
        {
            return Err(PipelineError::ChainedCorrection {
                from: from.clone(),
                to: to.clone(),
            });
        }
        Ok(Self { corrections })
    }

    /// Separator-normalized, corrected string. Unknown strings pass through.
    pub fn correct(&self, raw: &str) -> String {
        let normalized = normalize_separators(raw);
        match self.corrections.get(&normalized) {
            Some(fixed) => fixed.clone(),
            None => normalized,
        }
    }

    /// Corrected `YYYY-MM-DD` date.
    pub fn parse(&self, raw: &str) -> Result<NaiveDate> {
        let corrected = self.correct(raw);
        NaiveDate::parse_from_str(&corrected, "%Y-%m-%d").map_err(|_| PipelineError::DateFormat {
            raw: raw.to_string(),
            corrected,
        })
    }
}

fn normalize_separators(s: &str) -> String {
    s.trim().replace('/', "-")
}

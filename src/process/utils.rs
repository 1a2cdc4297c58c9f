use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{PipelineError, Result};

static UNNAMED: Lazy<Regex> = Lazy::new(|| Regex::new(r"^Unnamed:\s*\d+$").unwrap());
static DUP_SUFFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\.\d+$").unwrap());

/// 1) Trim whitespace + strip outer quotes if present.
pub fn clean_str(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.starts_with('"') && trimmed.ends_with('"') && trimmed.len() >= 2 {
        trimmed[1..trimmed.len() - 1].trim().to_string()
    } else {
        trimmed.to_string()
    }
}

/// 2) Remove what the extractor adds to labels: blank columns become
/// `Unnamed: N`, repeated labels get a `.N` suffix.
pub fn strip_header_artifacts(label: &str) -> String {
    let label = label.trim();
    if UNNAMED.is_match(label) {
        return String::new();
    }
    DUP_SUFFIX.replace(label, "").trim().to_string()
}

/// 3) Index of the single label containing `marker`.
pub fn locate_column(labels: &[String], marker: &str) -> Result<usize> {
    let matches: Vec<usize> = labels
        .iter()
        .enumerate()
        .filter(|(_, l)| l.contains(marker))
        .map(|(i, _)| i)
        .collect();

    match matches.as_slice() {
        [only] => Ok(*only),
        _ => Err(PipelineError::AmbiguousColumn {
            marker: marker.to_string(),
            candidates: matches.iter().map(|&i| labels[i].clone()).collect(),
            labels: labels.to_vec(),
        }),
    }
}

/// Largest offset, either sign, a diffs cell may carry: one full day.
pub const MAX_OFFSET_MINUTES: i64 = 24 * 60;

/// 4) Whole minutes within [`MAX_OFFSET_MINUTES`]. The extractor sometimes
/// emits integral floats ("12.0").
pub fn parse_minutes(cell: &str) -> Option<i64> {
    let cell = cell.trim();
    let minutes = match cell.parse::<i64>() {
        Ok(n) => n,
        Err(_) => {
            let f = cell.parse::<f64>().ok()?;
            if !f.is_finite() || f.fract() != 0.0 || f.abs() > MAX_OFFSET_MINUTES as f64 {
                return None;
            }
            f as i64
        }
    };
    (minutes.unsigned_abs() <= MAX_OFFSET_MINUTES as u64).then_some(minutes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(ls: &[&str]) -> Vec<String> {
        ls.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn header_artifacts() {
        assert_eq!(strip_header_artifacts("Unnamed: 3"), "");
        assert_eq!(strip_header_artifacts("الفارق.1"), "الفارق");
        assert_eq!(strip_header_artifacts("عين"), "عين");
        assert_eq!(strip_header_artifacts(" سيدي.12 "), "سيدي");
    }

    #[test]
    fn locate_unique_column() -> anyhow::Result<()> {
        let ls = labels(&["وهران", "الفارق بالدقائق", "تلمسان"]);
        assert_eq!(locate_column(&ls, "الفارق")?, 1);
        Ok(())
    }

    #[test]
    fn locate_rejects_zero_or_many() {
        let none = labels(&["a", "b"]);
        match locate_column(&none, "diff") {
            Err(PipelineError::AmbiguousColumn { candidates, .. }) => assert!(candidates.is_empty()),
            other => panic!("unexpected {:?}", other),
        }

        let two = labels(&["diff", "x", "diff.1"]);
        match locate_column(&two, "diff") {
            Err(PipelineError::AmbiguousColumn { candidates, .. }) => {
                assert_eq!(candidates, labels(&["diff", "diff.1"]))
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn minutes() {
        assert_eq!(parse_minutes("12"), Some(12));
        assert_eq!(parse_minutes(" 7.0 "), Some(7));
        assert_eq!(parse_minutes("-3"), Some(-3));
        assert_eq!(parse_minutes("7.5"), None);
        assert_eq!(parse_minutes(""), None);
        assert_eq!(parse_minutes("NaN"), None);
    }

    #[test]
    fn out_of_range_minutes_are_rejected() {
        assert_eq!(parse_minutes("1440"), Some(1440));
        assert_eq!(parse_minutes("-1440.0"), Some(-1440));
        assert_eq!(parse_minutes("1441"), None);
        assert_eq!(parse_minutes("1e20"), None);
        assert_eq!(parse_minutes("999999999999999"), None);
        assert_eq!(parse_minutes("-9223372036854775808"), None);
    }
}

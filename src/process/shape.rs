use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{PipelineError, Result};
use crate::process::raw_table::RawTable;

const EXCERPT_ROWS: usize = 5;

/// (rows, columns) of a raw table. Written `[rows, cols]` in settings files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "(usize, usize)", into = "(usize, usize)")]
pub struct Shape {
    pub rows: usize,
    pub cols: usize,
}

impl Shape {
    pub const fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }
}

impl From<(usize, usize)> for Shape {
    fn from((rows, cols): (usize, usize)) -> Self {
        Self { rows, cols }
    }
}

impl From<Shape> for (usize, usize) {
    fn from(s: Shape) -> Self {
        (s.rows, s.cols)
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.rows, self.cols)
    }
}

/// Fail unless `table` has one of `expected` shapes.
///
/// A mismatch means the extraction template drifted: nothing derived from the
/// table can be trusted, so this is never downgraded to a warning.
pub fn validate_shape<'a>(table: &'a RawTable, expected: &[Shape], label: &str) -> Result<&'a RawTable> {
    let actual = table.shape();
    if expected.contains(&actual) {
        return Ok(table);
    }
    Err(PipelineError::ShapeMismatch {
        label: format!("{} ({})", label, table.source),
        actual,
        expected: expected.to_vec(),
        excerpt: table.excerpt(EXCERPT_ROWS),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(rows: usize, cols: usize) -> RawTable {
        let headers: Vec<String> = (0..cols).map(|c| format!("c{}", c)).collect();
        let rows: Vec<Vec<String>> = (0..rows)
            .map(|r| (0..cols).map(|c| format!("{}:{}", r, c)).collect())
            .collect();
        RawTable::new("doc.pdf#3", headers, rows)
    }

    #[test]
    fn accepts_any_listed_shape() -> anyhow::Result<()> {
        let shapes = [Shape::new(29, 8), Shape::new(30, 8)];
        let t = table(29, 8);
        assert_eq!(validate_shape(&t, &shapes, "base")?, &t);
        validate_shape(&table(30, 8), &shapes, "base")?;
        Ok(())
    }

    #[test]
    fn rejects_28_rows_with_context() {
        let shapes = [Shape::new(29, 8), Shape::new(30, 8)];
        let err = validate_shape(&table(28, 8), &shapes, "base").unwrap_err();
        match &err {
            PipelineError::ShapeMismatch {
                label,
                actual,
                expected,
                excerpt,
            } => {
                assert_eq!(label, "base (doc.pdf#3)");
                assert_eq!(*actual, Shape::new(28, 8));
                assert_eq!(expected.len(), 2);
                assert!(excerpt.starts_with("c0\tc1"));
            }
            other => panic!("unexpected {:?}", other),
        }
        let msg = err.to_string();
        assert!(msg.contains("(28, 8)"));
        assert!(msg.contains("(29, 8), (30, 8)"));
    }
}

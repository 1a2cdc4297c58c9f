//! Error types for calendar reconstruction.
//!
//! Every variant here is fatal for the region being processed. Contiguity gaps
//! are not errors; see [`crate::calendar::contiguity`].

use crate::process::shape::Shape;

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// A raw table does not have any of the accepted shapes.
    #[error("{label}: shape {actual} is not one of [{}]\n{excerpt}", fmt_shapes(.expected))]
    ShapeMismatch {
        label: String,
        actual: Shape,
        expected: Vec<Shape>,
        excerpt: String,
    },

    /// A base-table cell is not a time of day.
    #[error("{source_name}: cannot parse {value:?} as a time (row {row}, column {column:?})")]
    PrayerTimeParse {
        source_name: String,
        row: usize,
        column: String,
        value: String,
    },

    /// A diffs-table cell is not a whole number of minutes.
    #[error("{source_name}: cannot parse {value:?} as minutes (row {row}, column {column:?})")]
    OffsetParse {
        source_name: String,
        row: usize,
        column: String,
        value: String,
    },

    /// Zero or several columns carry the marker token.
    #[error("expected exactly one column containing {marker:?}, found {candidates:?} among {labels:?}")]
    AmbiguousColumn {
        marker: String,
        candidates: Vec<String>,
        labels: Vec<String>,
    },

    #[error("{source_name}: required column {name:?} not found in {labels:?}")]
    MissingColumn {
        source_name: String,
        name: String,
        labels: Vec<String>,
    },

    #[error("{source_name}: label {name:?} appears more than once")]
    DuplicateColumn { source_name: String, name: String },

    /// A diffs table lacks a row for one of the six prayers.
    #[error("{source_name}: no offset row for {prayer:?} (row labels: {labels:?})")]
    MissingPrayer {
        source_name: String,
        prayer: String,
        labels: Vec<String>,
    },

    #[error("unknown region {0:?}")]
    UnknownRegion(String),

    #[error("invalid date {corrected:?} (read as {raw:?})")]
    DateFormat { raw: String, corrected: String },

    /// Date corrections whose output is also an input would not be idempotent.
    #[error("date correction {from:?} -> {to:?} chains into another correction")]
    ChainedCorrection { from: String, to: String },

    #[error("region {region:?} has {count} tables, expected (base, diffs) pairs")]
    UnpairedTable { region: String, count: usize },

    /// Two calendars of one run map to the same output file. Fatal for the
    /// whole export, checked before anything is written.
    #[error("{file:?} would hold both {first} and {second}")]
    OutputCollision {
        file: String,
        first: String,
        second: String,
    },
}

fn fmt_shapes(shapes: &[Shape]) -> String {
    shapes
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

pub type Result<T, E = PipelineError> = std::result::Result<T, E>;

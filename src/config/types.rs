// src/config/types.rs

use serde::{Deserialize, Serialize};

use crate::process::diffs::DiffsLayout;
use crate::process::shape::Shape;

/// Labels of the non-prayer columns, as printed in the source documents.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct ColumnNames {
    pub date: String,
    /// Qibla direction column of the base table; dropped on load.
    pub qibla: String,
    /// Marker token carried by the diffs row-label column.
    pub diff: String,
    pub wilaya: String,
}

impl ColumnNames {
    pub fn arabic() -> Self {
        Self {
            date: "التاريخ".into(),
            qibla: "القبلة".into(),
            diff: "الفارق".into(),
            wilaya: "الولاية".into(),
        }
    }

    pub fn english() -> Self {
        Self {
            date: "date".into(),
            qibla: "qibla".into(),
            diff: "diff".into(),
            wilaya: "wilaya".into(),
        }
    }
}

/// How one region's documents are laid out.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct RegionSettings {
    pub layout: DiffsLayout,
    /// Province the base table was computed for; injected with zero offsets.
    pub reference_province: String,
    /// Accepted raw diffs shapes for the generic layout.
    #[serde(default)]
    pub diffs_shapes: Vec<Shape>,
}

/// Language of exported column headers.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy, Default, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Ar,
    En,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Clone, Default)]
#[serde(default)]
pub struct OutputSettings {
    pub language: Language,
}

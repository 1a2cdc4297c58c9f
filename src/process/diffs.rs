// src/process/diffs.rs
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::debug;

use crate::config::{RegionSettings, Settings};
use crate::error::{PipelineError, Result};
use crate::prayer::Prayer;
use crate::process::raw_table::RawTable;
use crate::process::shape::validate_shape;
use crate::process::split::split_diffs;
use crate::process::utils::{locate_column, parse_minutes};

/// Which days of a month's base table a diffs table applies to, as a
/// half-open range of row positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateSubRange {
    pub start: usize,
    pub end: usize,
}

impl DateSubRange {
    /// Longer than any month, so every base row falls inside.
    pub const WHOLE_MONTH: DateSubRange = DateSubRange { start: 0, end: 31 };
    pub const FIRST_HALF: DateSubRange = DateSubRange { start: 0, end: 15 };
    pub const SECOND_HALF: DateSubRange = DateSubRange { start: 15, end: 30 };

    pub fn contains(&self, day_index: usize) -> bool {
        (self.start..self.end).contains(&day_index)
    }
}

/// Per-prayer minute offsets of one province, canonical order.
pub type Offsets = [i64; 6];

#[derive(Debug, Clone, PartialEq)]
pub struct ProvinceOffsets {
    pub province: String,
    pub offsets: Offsets,
}

/// Province → offsets from the base table, for one sub-range of a month.
#[derive(Debug, Clone, PartialEq)]
pub struct DiffsTable {
    pub source: String,
    pub sub_range: DateSubRange,
    pub provinces: Vec<ProvinceOffsets>,
}

impl DiffsTable {
    pub fn province_names(&self) -> Vec<&str> {
        self.provinces.iter().map(|p| p.province.as_str()).collect()
    }

    pub fn get(&self, province: &str) -> Option<&Offsets> {
        self.provinces
            .iter()
            .find(|p| p.province == province)
            .map(|p| &p.offsets)
    }

    /// Add the region's reference province at zero offset. The base table
    /// is computed for it, so its calendar is the base table verbatim.
    pub fn inject_reference(&mut self, reference: &str) {
        if self.get(reference).is_some() {
            debug!(source = %self.source, reference, "reference province already listed");
            return;
        }
        self.provinces.push(ProvinceOffsets {
            province: reference.to_string(),
            offsets: [0; 6],
        });
    }
}

/// Physical layout of a region's diffs pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiffsLayout {
    /// One table for the whole month.
    Generic,
    /// Two half-month blocks side by side sharing one mangled header.
    Split,
}

impl DiffsLayout {
    /// Normalize one raw diffs table into its offset tables, reference
    /// province included.
    pub fn normalize(
        self,
        raw: &RawTable,
        region: &RegionSettings,
        settings: &Settings,
    ) -> Result<Vec<DiffsTable>> {
        let mut tables = match self {
            DiffsLayout::Generic => {
                validate_shape(raw, &region.diffs_shapes, "diffs table")?;
                vec![normalize_block(raw, settings, DateSubRange::WHOLE_MONTH)?]
            }
            DiffsLayout::Split => split_diffs(raw, settings)?,
        };
        for table in &mut tables {
            table.inject_reference(&region.reference_province);
        }
        Ok(tables)
    }
}

/// Generic normalization of a block whose header labels are final: one
/// column names the prayer of each row, every other column is a province.
///
/// Rows whose label is not a prayer (the header-ish first row) are dropped.
pub fn normalize_block(raw: &RawTable, settings: &Settings, sub_range: DateSubRange) -> Result<DiffsTable> {
    let diff_col = locate_column(&raw.headers, &settings.column_names.diff)?;

    let mut prayer_rows: [Option<usize>; 6] = [None; 6];
    for (r, label) in raw.column(diff_col).enumerate() {
        let Some(prayer) = settings.prayer_for_label(label) else {
            continue;
        };
        let slot = &mut prayer_rows[prayer.index()];
        if slot.is_some() {
            return Err(PipelineError::DuplicateColumn {
                source_name: raw.source.clone(),
                name: label.to_string(),
            });
        }
        *slot = Some(r);
    }

    let mut rows = [0usize; 6];
    for prayer in Prayer::ALL {
        rows[prayer.index()] =
            prayer_rows[prayer.index()].ok_or_else(|| PipelineError::MissingPrayer {
                source_name: raw.source.clone(),
                prayer: settings.salawat.name(prayer).to_string(),
                labels: raw.column(diff_col).map(str::to_string).collect(),
            })?;
    }

    let mut seen = HashSet::new();
    let mut provinces = Vec::with_capacity(raw.headers.len().saturating_sub(1));
    for (c, province) in raw.headers.iter().enumerate() {
        if c == diff_col {
            continue;
        }
        if !seen.insert(province.as_str()) {
            return Err(PipelineError::DuplicateColumn {
                source_name: raw.source.clone(),
                name: province.clone(),
            });
        }

        let mut offsets: Offsets = [0; 6];
        for (slot, &r) in offsets.iter_mut().zip(rows.iter()) {
            let cell = &raw.rows[r][c];
            *slot = parse_minutes(cell).ok_or_else(|| PipelineError::OffsetParse {
                source_name: raw.source.clone(),
                row: r,
                column: province.clone(),
                value: cell.clone(),
            })?;
        }
        provinces.push(ProvinceOffsets {
            province: province.clone(),
            offsets,
        });
    }

    Ok(DiffsTable {
        source: raw.source.clone(),
        sub_range,
        provinces,
    })
}

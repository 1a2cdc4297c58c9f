// src/process/split.rs
//
// Regions whose diffs page holds two half-month tables side by side. The
// extractor reads them as one wide table: the first block's header is split
// between the label row and the first data row, the second block's labels are
// duplicates or blanks, and one separator column sits between the blocks
// unless the month omits it.

use tracing::debug;

use crate::config::Settings;
use crate::error::Result;
use crate::process::diffs::{normalize_block, DateSubRange, DiffsTable};
use crate::process::raw_table::RawTable;
use crate::process::shape::{validate_shape, Shape};
use crate::process::utils::strip_header_artifacts;

pub const SPLIT_SHAPES: [Shape; 2] = [Shape::new(7, 35), Shape::new(7, 34)];

/// Columns per half-month block, row-label column included.
const BLOCK_WIDTH: usize = 17;

/// Column label rebuilt from the raw header and the sub-label in the first
/// data row.
fn rebuild_label(header: &str, sub_label: &str) -> String {
    let head = strip_header_artifacts(header);
    match (head.is_empty(), sub_label.trim().is_empty()) {
        (true, _) => sub_label.trim().to_string(),
        (false, true) => head,
        (false, false) => format!("{} {}", head, sub_label.trim()),
    }
}

/// Split a (7,35)/(7,34) table into its two blocks and normalize each.
/// Returns the first-half table then the second-half table.
pub fn split_diffs(raw: &RawTable, settings: &Settings) -> Result<Vec<DiffsTable>> {
    validate_shape(raw, &SPLIT_SHAPES, "split diffs table")?;

    let labels: Vec<String> = (0..BLOCK_WIDTH)
        .map(|c| rebuild_label(&raw.headers[c], &raw.rows[0][c]))
        .collect();

    let body = RawTable {
        headers: raw.headers.clone(),
        rows: raw.rows[1..].to_vec(),
        source: raw.source.clone(),
    };

    let second_start = if raw.shape() == SPLIT_SHAPES[0] {
        BLOCK_WIDTH + 1
    } else {
        BLOCK_WIDTH
    };
    debug!(source = %raw.source, second_start, ?labels, "rebuilt split header");

    let first = body.select_columns(0, BLOCK_WIDTH, labels.clone());
    let second = body.select_columns(second_start, second_start + BLOCK_WIDTH, labels);

    Ok(vec![
        normalize_block(&first, settings, DateSubRange::FIRST_HALF)?,
        normalize_block(&second, settings, DateSubRange::SECOND_HALF)?,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RegionSettings;
    use crate::error::PipelineError;
    use crate::process::diffs::DiffsLayout;

    const PRAYERS: [&str; 6] = ["الفجر", "الشروق", "الزوال", "العصر", "المغرب", "العشاء"];

    /// Mimics the extractor's output for a split page. Block one: province
    /// `i` is `i` minutes late; block two: `i + 1`. Province 1 and 2 have
    /// two-word names split across the header and the first row.
    fn raw_split(with_separator: bool) -> RawTable {
        let width = if with_separator { 35 } else { 34 };
        let second_start = if with_separator { 18 } else { 17 };

        let mut headers = vec![String::new(); width];
        let mut first_row = vec![String::new(); width];
        headers[0] = "Unnamed: 0".into();
        first_row[0] = "الفارق".into();
        for i in 1..BLOCK_WIDTH {
            headers[i] = format!("Unnamed: {}", i);
            first_row[i] = format!("ولاية{}", i);
        }
        headers[1] = "عين".into();
        first_row[1] = "تموشنت".into();
        headers[2] = "سيدي.1".into();
        first_row[2] = "بلعباس".into();
        for c in BLOCK_WIDTH..width {
            headers[c] = if c % 2 == 0 {
                format!("Unnamed: {}", c)
            } else {
                format!("سيدي.{}", c)
            };
        }

        let mut rows = vec![first_row];
        for prayer in PRAYERS {
            let mut row = vec!["".to_string(); width];
            row[0] = prayer.to_string();
            row[second_start] = prayer.to_string();
            for i in 1..BLOCK_WIDTH {
                row[i] = i.to_string();
                row[second_start + i] = (i + 1).to_string();
            }
            rows.push(row);
        }
        RawTable::new("ouest.pdf#4", headers, rows)
    }

    #[test]
    fn wide_table_yields_two_half_month_tables() -> anyhow::Result<()> {
        let settings = Settings::default();
        let tables = split_diffs(&raw_split(true), &settings)?;

        assert_eq!(tables.len(), 2);
        assert_eq!(tables[0].sub_range, DateSubRange::FIRST_HALF);
        assert_eq!(tables[1].sub_range, DateSubRange::SECOND_HALF);
        assert_eq!(tables[0].province_names(), tables[1].province_names());
        assert_eq!(tables[0].provinces.len(), 16);

        assert_eq!(tables[0].provinces[0].province, "عين تموشنت");
        assert_eq!(tables[0].provinces[1].province, "سيدي بلعباس");
        assert_eq!(tables[0].get("ولاية5"), Some(&[5; 6]));
        assert_eq!(tables[1].get("ولاية5"), Some(&[6; 6]));
        Ok(())
    }

    #[test]
    fn narrow_table_has_no_separator_column() -> anyhow::Result<()> {
        let settings = Settings::default();
        let tables = split_diffs(&raw_split(false), &settings)?;
        assert_eq!(tables[0].province_names(), tables[1].province_names());
        assert_eq!(tables[1].get("سيدي بلعباس"), Some(&[3; 6]));
        Ok(())
    }

    #[test]
    fn other_widths_are_rejected() {
        let settings = Settings::default();
        let mut raw = raw_split(true);
        raw.headers.truncate(33);
        for row in raw.rows.iter_mut() {
            row.truncate(33);
        }
        assert_eq!(raw.shape(), Shape::new(7, 33));
        assert!(matches!(
            split_diffs(&raw, &settings),
            Err(PipelineError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn layout_injects_reference_in_both_halves() -> anyhow::Result<()> {
        let settings = Settings::default();
        let region = RegionSettings {
            layout: DiffsLayout::Split,
            reference_province: "وهران".into(),
            diffs_shapes: Vec::new(),
        };
        let tables = DiffsLayout::Split.normalize(&raw_split(true), &region, &settings)?;
        for t in &tables {
            assert_eq!(t.get("وهران"), Some(&[0; 6]));
            assert_eq!(t.provinces.len(), 17);
        }
        Ok(())
    }

    #[test]
    fn labels_are_rebuilt() {
        assert_eq!(rebuild_label("Unnamed: 4", "تلمسان"), "تلمسان");
        assert_eq!(rebuild_label("عين.2", "الدفلى"), "عين الدفلى");
        assert_eq!(rebuild_label("معسكر", ""), "معسكر");
    }
}

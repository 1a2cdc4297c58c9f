use chrono::NaiveTime;
use tracing::debug;

use crate::calendar::{CalendarRow, PrayerTimes};
use crate::config::Settings;
use crate::error::{PipelineError, Result};
use crate::prayer::Prayer;
use crate::process::date_parser::DateCorrector;
use crate::process::raw_table::RawTable;

/// Reference-location times for one month, one row per day, columns in
/// canonical prayer order.
#[derive(Debug, Clone, PartialEq)]
pub struct BaseTable {
    pub source: String,
    pub rows: Vec<CalendarRow>,
}

/// `HH:MM` or `HH:MM:SS`.
pub fn parse_time(cell: &str) -> Option<NaiveTime> {
    let cell = cell.trim();
    NaiveTime::parse_from_str(cell, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(cell, "%H:%M:%S"))
        .ok()
}

/// Position of the column labelled exactly `name`.
fn require_column(raw: &RawTable, name: &str) -> Result<usize> {
    raw.headers
        .iter()
        .position(|h| h.trim() == name)
        .ok_or_else(|| PipelineError::MissingColumn {
            source_name: raw.source.clone(),
            name: name.to_string(),
            labels: raw.headers.clone(),
        })
}

/// Normalize a shape-checked raw base table.
///
/// The date and qibla columns are dropped, the zawal alias is read as dhohr
/// and the six prayer columns are reordered canonically whatever their order
/// in the document.
pub fn normalize_base(raw: &RawTable, settings: &Settings, dates: &DateCorrector) -> Result<BaseTable> {
    let date_col = require_column(raw, &settings.column_names.date)?;
    let qibla_col = require_column(raw, &settings.column_names.qibla)?;

    let mut prayer_cols: [Option<usize>; 6] = [None; 6];
    for (idx, label) in raw.headers.iter().enumerate() {
        if idx == date_col || idx == qibla_col {
            continue;
        }
        let Some(prayer) = settings.prayer_for_label(label) else {
            continue;
        };
        let slot = &mut prayer_cols[prayer.index()];
        if slot.is_some() {
            return Err(PipelineError::DuplicateColumn {
                source_name: raw.source.clone(),
                name: settings.salawat.name(prayer).to_string(),
            });
        }
        *slot = Some(idx);
    }

    let mut columns = [0usize; 6];
    for prayer in Prayer::ALL {
        columns[prayer.index()] =
            prayer_cols[prayer.index()].ok_or_else(|| PipelineError::MissingColumn {
                source_name: raw.source.clone(),
                name: settings.salawat.name(prayer).to_string(),
                labels: raw.headers.clone(),
            })?;
    }

    let mut rows = Vec::with_capacity(raw.rows.len());
    for (r, cells) in raw.rows.iter().enumerate() {
        let date = dates.parse(&cells[date_col])?;
        let mut times: PrayerTimes = [NaiveTime::MIN; 6];
        for (slot, &col) in times.iter_mut().zip(columns.iter()) {
            *slot = parse_time(&cells[col]).ok_or_else(|| PipelineError::PrayerTimeParse {
                source_name: raw.source.clone(),
                row: r,
                column: raw.headers[col].clone(),
                value: cells[col].clone(),
            })?;
        }
        rows.push(CalendarRow { date, times });
    }

    if let (Some(first), Some(last)) = (rows.first(), rows.last()) {
        debug!(source = %raw.source, from = %first.date, to = %last.date, "normalized base table");
    }

    Ok(BaseTable {
        source: raw.source.clone(),
        rows,
    })
}

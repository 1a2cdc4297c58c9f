use tracing::debug;

use crate::calendar::offset::apply_offsets;
use crate::calendar::{CalendarRow, MonthCalendars};
use crate::process::base::BaseTable;
use crate::process::diffs::DiffsTable;

/// Cross one month's base table with its diffs tables.
///
/// Each diffs table only covers the base rows inside its sub-range; a
/// province listed in several tables gets their rows in table order.
pub fn assemble_month(base: &BaseTable, diffs: &[DiffsTable]) -> MonthCalendars {
    let mut month = MonthCalendars::new();

    for table in diffs {
        let days: Vec<&CalendarRow> = base
            .rows
            .iter()
            .enumerate()
            .filter(|(i, _)| table.sub_range.contains(*i))
            .map(|(_, row)| row)
            .collect();

        let (Some(first), Some(last)) = (days.first(), days.last()) else {
            debug!(source = %table.source, sub_range = ?table.sub_range, "no base rows in range");
            continue;
        };

        for entry in &table.provinces {
            debug!(
                province = %entry.province,
                from = %first.date,
                to = %last.date,
                "combining offsets"
            );
            month
                .entry(entry.province.clone())
                .or_default()
                .extend(days.iter().map(|row| CalendarRow {
                    date: row.date,
                    times: apply_offsets(&row.times, &entry.offsets),
                }));
        }
    }

    month
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::base::tests::t;
    use crate::process::diffs::{DateSubRange, ProvinceOffsets};
    use chrono::{Duration, NaiveDate};

    fn base(days: usize) -> BaseTable {
        let start = NaiveDate::from_ymd_opt(2021, 6, 1).unwrap();
        BaseTable {
            source: "base".into(),
            rows: (0..days)
                .map(|d| CalendarRow {
                    date: start + Duration::days(d as i64),
                    times: [t("05:00"), t("06:30"), t("12:45"), t("16:10"), t("19:05"), t("20:35")],
                })
                .collect(),
        }
    }

    fn diffs(sub_range: DateSubRange, entries: &[(&str, [i64; 6])]) -> DiffsTable {
        DiffsTable {
            source: "diffs".into(),
            sub_range,
            provinces: entries
                .iter()
                .map(|(p, o)| ProvinceOffsets {
                    province: p.to_string(),
                    offsets: *o,
                })
                .collect(),
        }
    }

    #[test]
    fn dawn_offset_is_added() {
        let b = base(30);
        let month = assemble_month(
            &b,
            &[diffs(DateSubRange::WHOLE_MONTH, &[("المدية", [12, 0, 0, 0, 0, 0])])],
        );
        let rows = &month["المدية"];
        assert_eq!(rows.len(), 30);
        assert_eq!(rows[0].times[0], t("05:12"));
        assert_eq!(rows[0].times[1], t("06:30"));
    }

    #[test]
    fn zero_offset_reproduces_base() {
        let b = base(29);
        let month = assemble_month(&b, &[diffs(DateSubRange::WHOLE_MONTH, &[("الجزائر", [0; 6])])]);
        assert_eq!(month["الجزائر"], b.rows);
    }

    #[test]
    fn halves_cover_their_own_days() {
        let b = base(30);
        let month = assemble_month(
            &b,
            &[
                diffs(DateSubRange::FIRST_HALF, &[("وهران", [1; 6])]),
                diffs(DateSubRange::SECOND_HALF, &[("وهران", [2; 6])]),
            ],
        );
        let rows = &month["وهران"];
        assert_eq!(rows.len(), 30);
        assert_eq!(rows.iter().map(|r| r.date).collect::<Vec<_>>(), b.rows.iter().map(|r| r.date).collect::<Vec<_>>());
        assert_eq!(rows[14].times[0], t("05:01"));
        assert_eq!(rows[15].times[0], t("05:02"));
    }

    #[test]
    fn short_month_second_half_stops_at_last_row() {
        let b = base(29);
        let month = assemble_month(&b, &[diffs(DateSubRange::SECOND_HALF, &[("تلمسان", [0; 6])])]);
        assert_eq!(month["تلمسان"].len(), 14);
    }
}

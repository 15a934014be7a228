//! Time grid and date rules for the details page.

use bookit_shared::Slot;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::Serialize;

/// Offered when an experience publishes no slots of its own.
pub const DEFAULT_TIMES: [&str; 5] = ["09:00 AM", "11:00 AM", "01:00 PM", "03:00 PM", "05:00 PM"];

const LABEL_FORMAT: &str = "%I:%M %p";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimeOption {
    pub label: String,
    pub available: bool,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SlotError {
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Date {date} is before {today}")]
    PastDate { date: NaiveDate, today: NaiveDate },

    #[error("Time {0} is not offered for this experience")]
    UnknownTime(String),

    #[error("Time {0} is no longer available")]
    Unavailable(String),
}

/// Normalise an experience's slots into the labels the time grid shows.
///
/// Labels keep catalog order; a label listed twice collapses into one entry
/// that is available if any of its sources is.
pub fn time_grid(slots: &[Slot]) -> Vec<TimeOption> {
    if slots.is_empty() {
        return DEFAULT_TIMES
            .iter()
            .map(|label| TimeOption {
                label: label.to_string(),
                available: true,
            })
            .collect();
    }

    let mut grid: Vec<TimeOption> = Vec::with_capacity(slots.len());
    for slot in slots {
        let label = slot_label(slot);
        match grid.iter_mut().find(|option| option.label == label) {
            Some(existing) => existing.available |= slot.is_available(),
            None => grid.push(TimeOption {
                label,
                available: slot.is_available(),
            }),
        }
    }
    grid
}

pub fn slot_label(slot: &Slot) -> String {
    match slot {
        Slot::Label(label) => label.trim().to_string(),
        Slot::Scheduled { date, .. } => {
            label_for_timestamp(date).unwrap_or_else(|| date.trim().to_string())
        }
    }
}

/// Time of day of a catalog timestamp, in the offset the timestamp carries.
fn label_for_timestamp(raw: &str) -> Option<String> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.format(LABEL_FORMAT).to_string());
    }
    for pattern in [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
    ] {
        if let Ok(ts) = NaiveDateTime::parse_from_str(raw, pattern) {
            return Some(ts.format(LABEL_FORMAT).to_string());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|ts| ts.format(LABEL_FORMAT).to_string())
}

/// Accepts a calendar date (`2026-10-20`) or a full timestamp, of which only
/// the date part is kept.
pub fn parse_date(raw: &str) -> Result<NaiveDate, SlotError> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(date);
    }
    DateTime::parse_from_rfc3339(raw)
        .map(|ts| ts.date_naive())
        .map_err(|_| SlotError::InvalidDate(raw.to_string()))
}

/// The calendar only offers today or later.
pub fn ensure_bookable(date: NaiveDate, today: NaiveDate) -> Result<NaiveDate, SlotError> {
    if date < today {
        return Err(SlotError::PastDate { date, today });
    }
    Ok(date)
}

pub fn pick_time<'a>(grid: &'a [TimeOption], time: &str) -> Result<&'a TimeOption, SlotError> {
    let wanted = time.trim();
    let option = grid
        .iter()
        .find(|option| option.label == wanted)
        .ok_or_else(|| SlotError::UnknownTime(wanted.to_string()))?;
    if !option.available {
        return Err(SlotError::Unavailable(wanted.to_string()));
    }
    Ok(option)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(grid: &[TimeOption]) -> Vec<&str> {
        grid.iter().map(|o| o.label.as_str()).collect()
    }

    #[test]
    fn test_single_label_slot() {
        let grid = time_grid(&[Slot::Label("10:00 AM".to_string())]);
        assert_eq!(labels(&grid), vec!["10:00 AM"]);
        assert!(grid[0].available);
    }

    #[test]
    fn test_no_slots_falls_back_to_defaults() {
        let grid = time_grid(&[]);
        assert_eq!(labels(&grid), DEFAULT_TIMES.to_vec());
    }

    #[test]
    fn test_scheduled_slots_render_time_of_day() {
        let grid = time_grid(&[
            Slot::Scheduled {
                date: "2026-11-02T07:30:00+05:30".to_string(),
                available: true,
            },
            Slot::Scheduled {
                date: "2026-11-02T16:00:00".to_string(),
                available: false,
            },
        ]);
        assert_eq!(labels(&grid), vec!["07:30 AM", "04:00 PM"]);
        assert!(!grid[1].available);
    }

    #[test]
    fn test_unparseable_timestamp_keeps_raw_text() {
        let slot = Slot::Scheduled {
            date: "sunrise".to_string(),
            available: true,
        };
        assert_eq!(slot_label(&slot), "sunrise");
    }

    #[test]
    fn test_duplicate_labels_collapse() {
        let grid = time_grid(&[
            Slot::Scheduled {
                date: "2026-11-02T09:00:00Z".to_string(),
                available: false,
            },
            Slot::Scheduled {
                date: "2026-11-03T09:00:00Z".to_string(),
                available: true,
            },
        ]);
        assert_eq!(grid.len(), 1);
        assert!(grid[0].available);
    }

    #[test]
    fn test_parse_date_accepts_iso_timestamp() {
        let expected = NaiveDate::from_ymd_opt(2026, 10, 20).unwrap();
        assert_eq!(parse_date("2026-10-20").unwrap(), expected);
        assert_eq!(parse_date("2026-10-20T00:00:00.000Z").unwrap(), expected);
        assert!(matches!(parse_date("20/10/2026"), Err(SlotError::InvalidDate(_))));
    }

    #[test]
    fn test_past_dates_are_not_bookable() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 15).unwrap();
        assert!(ensure_bookable(today, today).is_ok());
        assert!(ensure_bookable(today.succ_opt().unwrap(), today).is_ok());
        assert!(matches!(
            ensure_bookable(today.pred_opt().unwrap(), today),
            Err(SlotError::PastDate { .. })
        ));
    }

    #[test]
    fn test_pick_time() {
        let grid = vec![
            TimeOption { label: "09:00 AM".to_string(), available: true },
            TimeOption { label: "11:00 AM".to_string(), available: false },
        ];
        assert_eq!(pick_time(&grid, " 09:00 AM").unwrap().label, "09:00 AM");
        assert_eq!(
            pick_time(&grid, "11:00 AM"),
            Err(SlotError::Unavailable("11:00 AM".to_string()))
        );
        assert_eq!(
            pick_time(&grid, "06:00 PM"),
            Err(SlotError::UnknownTime("06:00 PM".to_string()))
        );
    }
}

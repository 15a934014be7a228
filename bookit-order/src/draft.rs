//! The selection handed from the details page to checkout.

use bookit_catalog::slots::{ensure_bookable, parse_date, pick_time, time_grid, SlotError};
use bookit_shared::{Experience, ExperienceId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum DraftError {
    #[error("Please select a date before continuing.")]
    MissingDate,

    #[error("Please select a time before continuing.")]
    MissingTime,

    #[error("Experience details are still loading.")]
    NotLoaded,

    #[error(transparent)]
    Slot(#[from] SlotError),
}

/// A confirmed date and time for one experience. Only constructible through
/// [`BookingDraft::new`], so a draft always carries both.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookingDraft {
    pub experience: Experience,
    pub date: NaiveDate,
    pub time: String,
}

impl BookingDraft {
    pub fn new(
        experience: Experience,
        date: Option<&str>,
        time: Option<&str>,
        today: NaiveDate,
    ) -> Result<Self, DraftError> {
        let date = non_blank(date).ok_or(DraftError::MissingDate)?;
        let time = non_blank(time).ok_or(DraftError::MissingTime)?;

        let date = ensure_bookable(parse_date(date)?, today)?;
        let grid = time_grid(experience.slots());
        let time = pick_time(&grid, time)?.label.clone();

        Ok(Self { experience, date, time })
    }

    pub fn params(&self, handoff: Option<Uuid>) -> DraftParams {
        DraftParams {
            experience_id: Some(self.experience.id),
            date: Some(self.date.format("%Y-%m-%d").to_string()),
            time: Some(self.time.clone()),
            handoff,
        }
    }
}

/// Query string of `/checkout`. Enough to rebuild the selection from the
/// route alone when the handoff has expired or was never made.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DraftParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experience_id: Option<ExperienceId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub handoff: Option<Uuid>,
}

impl DraftParams {
    pub fn checkout_path(&self) -> String {
        match serde_urlencoded::to_string(self) {
            Ok(query) if !query.is_empty() => format!("/checkout?{}", query),
            _ => "/checkout".to_string(),
        }
    }

    /// Rebuild the selection from the route alone. A route with neither date
    /// nor time yields `Ok(None)`; anything else passes the same checks as
    /// "Continue" on the details page.
    pub fn rebuild(
        &self,
        experience: &Experience,
        today: NaiveDate,
    ) -> Result<Option<BookingDraft>, DraftError> {
        let date = non_blank(self.date.as_deref());
        let time = non_blank(self.time.as_deref());
        if date.is_none() && time.is_none() {
            return Ok(None);
        }
        BookingDraft::new(experience.clone(), date, time, today).map(Some)
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

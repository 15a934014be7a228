//! Details page: calendar, time grid and price preview for one experience.

use bookit_catalog::slots::{ensure_bookable, parse_date, pick_time, time_grid, TimeOption};
use bookit_catalog::{ExperienceBanner, PricePreview, PricingEngine};
use bookit_core::{FetchState, FetchTicket, Loadable};
use bookit_shared::Experience;
use chrono::NaiveDate;
use serde::Serialize;

use crate::draft::{BookingDraft, DraftError};

const FALLBACK_TITLE: &str = "Experience Details | Explore Experiences";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridEntry {
    pub label: String,
    pub available: bool,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailsView {
    pub page_title: String,
    pub experience: ExperienceBanner,
    /// Earliest date the calendar offers.
    pub min_date: NaiveDate,
    pub selected_date: Option<NaiveDate>,
    pub selected_time: Option<String>,
    pub times: Vec<GridEntry>,
    pub price: PricePreview,
}

#[derive(Debug, Default)]
pub struct SlotSelector {
    experience: FetchState<Experience>,
    date: Option<NaiveDate>,
    time: Option<String>,
}

impl SlotSelector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin_load(&mut self) -> FetchTicket {
        self.experience.begin()
    }

    pub fn finish_load(
        &mut self,
        ticket: FetchTicket,
        outcome: Result<Experience, String>,
    ) -> bool {
        self.experience.resolve(ticket, outcome)
    }

    /// The page went away; late results are dropped.
    pub fn unmount(&mut self) {
        self.experience.cancel();
    }

    pub fn experience(&self) -> &Loadable<Experience> {
        self.experience.state()
    }

    pub fn select_date(&mut self, raw: &str, today: NaiveDate) -> Result<NaiveDate, DraftError> {
        let date = ensure_bookable(parse_date(raw)?, today)?;
        self.date = Some(date);
        Ok(date)
    }

    pub fn select_time(&mut self, label: &str) -> Result<(), DraftError> {
        let grid = self.grid();
        if grid.is_empty() {
            return Err(DraftError::NotLoaded);
        }
        self.time = Some(pick_time(&grid, label)?.label.clone());
        Ok(())
    }

    pub fn grid(&self) -> Vec<TimeOption> {
        self.experience
            .state()
            .ready()
            .map(|exp| time_grid(exp.slots()))
            .unwrap_or_default()
    }

    pub fn page_title(&self) -> String {
        match self.experience.state().ready() {
            Some(exp) if !exp.title.trim().is_empty() => {
                format!("{} | Explore Experiences", exp.title)
            }
            _ => FALLBACK_TITLE.to_string(),
        }
    }

    pub fn price_preview(&self, engine: &PricingEngine) -> Option<PricePreview> {
        self.experience
            .state()
            .ready()
            .map(|exp| engine.preview(exp.price))
    }

    /// "Continue": both a date and a time must be chosen.
    pub fn confirm(&self, today: NaiveDate) -> Result<BookingDraft, DraftError> {
        let experience = self.experience.state().ready().ok_or(DraftError::NotLoaded)?;
        let date = self.date.map(|d| d.format("%Y-%m-%d").to_string());
        BookingDraft::new(experience.clone(), date.as_deref(), self.time.as_deref(), today)
    }

    pub fn view(
        &self,
        engine: &PricingEngine,
        api_base_url: &str,
        today: NaiveDate,
    ) -> Option<DetailsView> {
        let experience = self.experience.state().ready()?;
        let times = self
            .grid()
            .into_iter()
            .map(|option| GridEntry {
                selected: self.time.as_deref() == Some(option.label.as_str()),
                label: option.label,
                available: option.available,
            })
            .collect();

        Some(DetailsView {
            page_title: self.page_title(),
            experience: ExperienceBanner::from_experience(experience, api_base_url),
            min_date: today,
            selected_date: self.date,
            selected_time: self.time.clone(),
            times,
            price: engine.preview(experience.price),
        })
    }
}

//! Checkout session: contact form, promo code and the booking submission.

use bookit_catalog::{CheckoutQuote, ExperienceBanner, PricingEngine, PromoOutcome};
use bookit_core::{Clock, CoreError};
use bookit_shared::{BookingConfirmation, BookingSubmission, Experience, Masked};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::draft::BookingDraft;

pub const PROMO_APPLIED: &str = "Promo code applied! 10% discount added.";
pub const PROMO_REJECTED: &str = "Invalid promo code.";
pub const BOOKING_CONFIRMED: &str = "Booking confirmed!";
const GENERIC_FAILURE: &str = "Server error. Please try again.";
const NOT_SET: &str = "—";

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum CheckoutError {
    #[error("Please fill in all required fields.")]
    MissingFields,

    #[error("Booking failed: {0}")]
    SubmissionFailed(String),
}

/// Where the promo code stands. Zero discount alone cannot tell
/// "never applied" from "applied and refused", so both are explicit.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum PromoState {
    NotEvaluated,
    Applied { code: String, discount: f64 },
    Rejected { input: String },
}

impl PromoState {
    pub fn discount(&self) -> f64 {
        match self {
            PromoState::Applied { discount, .. } => *discount,
            _ => 0.0,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CheckoutForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub promo: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CheckoutView {
    pub session_id: Uuid,
    pub page_title: String,
    pub reference: String,
    pub experience: ExperienceBanner,
    pub date: String,
    pub time: String,
    pub quote: CheckoutQuote,
    pub promo: PromoState,
    pub message: Option<String>,
}

/// What the client needs to move on to the result page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubmittedBooking {
    pub booking_id: String,
    pub redirect: String,
    pub total: f64,
    pub date: Option<NaiveDate>,
    pub time: Option<String>,
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct CheckoutSession {
    experience: Experience,
    date: Option<NaiveDate>,
    time: Option<String>,
    reference: String,
    promo: PromoState,
    message: Option<String>,
}

impl CheckoutSession {
    pub fn open(
        experience: Experience,
        date: Option<NaiveDate>,
        time: Option<String>,
        clock: &dyn Clock,
    ) -> Self {
        Self {
            experience,
            date,
            time: time.filter(|t| !t.trim().is_empty()),
            reference: format!("BKG-{}", clock.now().timestamp_millis()),
            promo: PromoState::NotEvaluated,
            message: None,
        }
    }

    pub fn from_draft(draft: BookingDraft, clock: &dyn Clock) -> Self {
        Self::open(draft.experience, Some(draft.date), Some(draft.time), clock)
    }

    pub fn experience(&self) -> &Experience {
        &self.experience
    }

    pub fn reference(&self) -> &str {
        &self.reference
    }

    pub fn promo(&self) -> &PromoState {
        &self.promo
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn quote(&self, engine: &PricingEngine) -> CheckoutQuote {
        engine.quote(self.experience.price, self.promo.discount())
    }

    /// The explicit "Apply" action. The discount only changes here.
    pub fn apply_promo(&mut self, input: &str, engine: &PricingEngine) -> &PromoState {
        match engine.evaluate_promo(input, self.experience.price) {
            PromoOutcome::Blank => {
                self.promo = PromoState::NotEvaluated;
                self.message = None;
            }
            PromoOutcome::Accepted { code, discount } => {
                self.promo = PromoState::Applied { code, discount };
                self.message = Some(PROMO_APPLIED.to_string());
            }
            PromoOutcome::Rejected { input } => {
                self.promo = PromoState::Rejected { input };
                self.message = Some(PROMO_REJECTED.to_string());
            }
        }
        &self.promo
    }

    /// Validate the form and build the request body. Nothing is sent from here;
    /// a missing name or email stops before any remote call.
    pub fn prepare_submission(
        &mut self,
        form: &CheckoutForm,
        engine: &PricingEngine,
    ) -> Result<BookingSubmission, CheckoutError> {
        self.message = None;

        let name = form.name.trim();
        let email = form.email.trim();
        if name.is_empty() || email.is_empty() {
            let err = CheckoutError::MissingFields;
            self.message = Some(err.to_string());
            return Err(err);
        }

        let promo = form.promo.trim();
        let quote = self.quote(engine);
        debug!(
            experience_id = self.experience.id,
            total = quote.total,
            "Prepared booking submission"
        );

        Ok(BookingSubmission {
            name: Masked::from(name),
            email: Masked::from(email),
            promo_code: (!promo.is_empty()).then(|| promo.to_string()),
            experience_id: self.experience.id,
            total_price: quote.total,
            date: self.date,
            time: self.time.clone(),
        })
    }

    /// Record a failed submission. The session stays open for a resubmit.
    pub fn submission_failed(&mut self, err: &CoreError) -> CheckoutError {
        let reason = err.remote_message().unwrap_or(GENERIC_FAILURE).to_string();
        let err = CheckoutError::SubmissionFailed(reason);
        self.message = Some(err.to_string());
        err
    }

    pub fn confirmed(
        &mut self,
        confirmation: BookingConfirmation,
        engine: &PricingEngine,
    ) -> SubmittedBooking {
        self.message = Some(BOOKING_CONFIRMED.to_string());
        let query = [("success", "true"), ("id", confirmation.booking_id.as_str())];
        let redirect = match serde_urlencoded::to_string(query) {
            Ok(query) => format!("/result?{}", query),
            Err(_) => format!("/result?success=true&id={}", confirmation.booking_id),
        };
        SubmittedBooking {
            booking_id: confirmation.booking_id,
            redirect,
            total: self.quote(engine).total,
            date: self.date,
            time: self.time.clone(),
            message: BOOKING_CONFIRMED.to_string(),
        }
    }

    pub fn page_title(&self) -> String {
        if self.experience.title.trim().is_empty() {
            "Checkout | BookIt".to_string()
        } else {
            format!("Checkout - {} | BookIt", self.experience.title)
        }
    }

    /// `d/m/yyyy`, the en-IN short form.
    pub fn display_date(&self) -> String {
        self.date
            .map(|d| format!("{}/{}/{}", d.day(), d.month(), d.year()))
            .unwrap_or_else(|| NOT_SET.to_string())
    }

    pub fn display_time(&self) -> String {
        self.time.clone().unwrap_or_else(|| NOT_SET.to_string())
    }

    pub fn view(
        &self,
        session_id: Uuid,
        engine: &PricingEngine,
        api_base_url: &str,
    ) -> CheckoutView {
        CheckoutView {
            session_id,
            page_title: self.page_title(),
            reference: self.reference.clone(),
            experience: ExperienceBanner::from_experience(&self.experience, api_base_url),
            date: self.display_date(),
            time: self.display_time(),
            quote: self.quote(engine),
            promo: self.promo.clone(),
            message: self.message.clone(),
        }
    }
}

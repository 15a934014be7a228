use std::sync::Arc;
use std::time::Duration;

use bookit_catalog::PricingEngine;
use bookit_core::{BookingRepository, Clock, ExperienceRepository};
use bookit_order::{BookingDraft, CheckoutSession};
use bookit_store::app_config::NavigationConfig;
use bookit_store::SessionStore;

#[derive(Clone)]
pub struct AppState {
    pub experiences: Arc<dyn ExperienceRepository>,
    pub bookings: Arc<dyn BookingRepository>,
    pub clock: Arc<dyn Clock>,
    pub pricing: Arc<PricingEngine>,
    /// Host that relative image paths resolve against.
    pub api_base_url: Arc<str>,
    /// Details -> checkout selections, consumed once.
    pub handoffs: Arc<SessionStore<BookingDraft>>,
    pub checkouts: Arc<SessionStore<CheckoutSession>>,
}

impl AppState {
    pub fn new(
        experiences: Arc<dyn ExperienceRepository>,
        bookings: Arc<dyn BookingRepository>,
        clock: Arc<dyn Clock>,
        api_base_url: &str,
        navigation: &NavigationConfig,
    ) -> Self {
        Self {
            experiences,
            bookings,
            clock,
            pricing: Arc::new(PricingEngine::default()),
            api_base_url: Arc::from(api_base_url.trim_end_matches('/')),
            handoffs: Arc::new(SessionStore::new(
                "handoff",
                Duration::from_secs(navigation.handoff_ttl_seconds),
            )),
            checkouts: Arc::new(SessionStore::new(
                "checkout",
                Duration::from_secs(navigation.checkout_ttl_seconds),
            )),
        }
    }
}

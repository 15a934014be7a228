use async_trait::async_trait;
use bookit_shared::{
    BookingConfirmation, BookingRecord, BookingSubmission, Experience, ExperienceId,
};

use crate::CoreResult;

/// Read access to the remote experience catalog.
#[async_trait]
pub trait ExperienceRepository: Send + Sync {
    async fn list_experiences(&self) -> CoreResult<Vec<Experience>>;

    /// `Ok(None)` when the catalog has no such experience.
    async fn get_experience(&self, id: ExperienceId) -> CoreResult<Option<Experience>>;
}

/// Booking creation and retrieval on the remote API.
#[async_trait]
pub trait BookingRepository: Send + Sync {
    async fn create_booking(
        &self,
        submission: &BookingSubmission,
    ) -> CoreResult<BookingConfirmation>;

    async fn get_booking(&self, booking_id: &str) -> CoreResult<Option<BookingRecord>>;
}

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use async_trait::async_trait;
use bookit_core::{BookingRepository, CoreError, CoreResult, ExperienceRepository};
use bookit_shared::{
    BookingConfirmation, BookingRecord, BookingSubmission, Experience, ExperienceId,
};
use tokio::sync::RwLock;

/// In-process stand-in for the remote API, for tests and offline runs.
pub struct InMemoryApi {
    experiences: RwLock<Vec<Experience>>,
    bookings: RwLock<HashMap<String, BookingRecord>>,
    next_booking: AtomicU64,
    offline: AtomicBool,
    booking_calls: AtomicU64,
}

impl InMemoryApi {
    pub fn new(experiences: Vec<Experience>) -> Self {
        Self {
            experiences: RwLock::new(experiences),
            bookings: RwLock::new(HashMap::new()),
            next_booking: AtomicU64::new(1),
            offline: AtomicBool::new(false),
            booking_calls: AtomicU64::new(0),
        }
    }

    /// Make every call fail as if the API host were down.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Number of `create_booking` calls that reached this API.
    pub fn booking_calls(&self) -> u64 {
        self.booking_calls.load(Ordering::SeqCst)
    }

    pub async fn insert_booking(&self, record: BookingRecord) -> String {
        let id = record
            .booking_id
            .clone()
            .unwrap_or_else(|| self.issue_id());
        self.bookings.write().await.insert(id.clone(), record);
        id
    }

    fn issue_id(&self) -> String {
        format!("BK-{}", self.next_booking.fetch_add(1, Ordering::SeqCst))
    }

    fn check_online(&self) -> CoreResult<()> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(CoreError::Unreachable("in-memory API is offline".to_string()));
        }
        Ok(())
    }
}

impl Default for InMemoryApi {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

#[async_trait]
impl ExperienceRepository for InMemoryApi {
    async fn list_experiences(&self) -> CoreResult<Vec<Experience>> {
        self.check_online()?;
        Ok(self.experiences.read().await.clone())
    }

    async fn get_experience(&self, id: ExperienceId) -> CoreResult<Option<Experience>> {
        self.check_online()?;
        Ok(self
            .experiences
            .read()
            .await
            .iter()
            .find(|exp| exp.id == id)
            .cloned())
    }
}

#[async_trait]
impl BookingRepository for InMemoryApi {
    async fn create_booking(
        &self,
        submission: &BookingSubmission,
    ) -> CoreResult<BookingConfirmation> {
        self.booking_calls.fetch_add(1, Ordering::SeqCst);
        self.check_online()?;

        if !self
            .experiences
            .read()
            .await
            .iter()
            .any(|exp| exp.id == submission.experience_id)
        {
            return Err(CoreError::RemoteError {
                status: 404,
                message: Some("Experience not found".to_string()),
            });
        }

        let booking_id = self.issue_id();
        let record = BookingRecord {
            booking_id: Some(booking_id.clone()),
            name: submission.name.clone(),
            email: submission.email.clone(),
            total_price: submission.total_price,
            experience_id: Some(submission.experience_id),
            date: submission.date.map(|d| d.format("%Y-%m-%d").to_string()),
            time: submission.time.clone(),
        };
        self.bookings.write().await.insert(booking_id.clone(), record);

        Ok(BookingConfirmation {
            booking_id,
            message: Some("Booking created".to_string()),
        })
    }

    async fn get_booking(&self, booking_id: &str) -> CoreResult<Option<BookingRecord>> {
        self.check_online()?;
        Ok(self.bookings.read().await.get(booking_id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bookit_shared::Masked;

    fn safari() -> Experience {
        Experience {
            id: 1,
            title: "Desert Safari".to_string(),
            description: String::new(),
            image: None,
            price: 1499.0,
            location: Some("Dubai".to_string()),
            slots: None,
        }
    }

    #[tokio::test]
    async fn test_created_booking_can_be_read_back() {
        let api = InMemoryApi::new(vec![safari()]);
        let submission = BookingSubmission {
            name: Masked::from("Asha"),
            email: Masked::from("asha@example.com"),
            promo_code: None,
            experience_id: 1,
            total_price: 1679.0,
            date: chrono::NaiveDate::from_ymd_opt(2026, 10, 20),
            time: Some("09:00 AM".to_string()),
        };

        let confirmation = api.create_booking(&submission).await.unwrap();
        let record = api.get_booking(&confirmation.booking_id).await.unwrap().unwrap();
        assert_eq!(record.total_price, 1679.0);
        assert_eq!(record.date.as_deref(), Some("2026-10-20"));
        assert_eq!(api.booking_calls(), 1);
    }

    #[tokio::test]
    async fn test_offline_api_is_unreachable() {
        let api = InMemoryApi::new(vec![safari()]);
        api.set_offline(true);
        assert!(matches!(api.list_experiences().await, Err(CoreError::Unreachable(_))));
    }
}

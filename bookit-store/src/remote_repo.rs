use std::time::Duration;

use async_trait::async_trait;
use bookit_core::{BookingRepository, CoreError, CoreResult, ExperienceRepository};
use bookit_shared::{
    BookingConfirmation, BookingRecord, BookingSubmission, Experience, ExperienceId,
};
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, error, info, warn};

/// REST client for the remote experience/booking API.
#[derive(Clone)]
pub struct RemoteApiClient {
    client: Client,
    base_url: String,
}

/// Error body the API sends alongside non-2xx statuses.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: Option<String>,
}

impl RemoteApiClient {
    pub fn new(base_url: &str, timeout: Duration) -> CoreResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CoreError::InternalError(e.to_string()))?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get(&self, path: &str) -> CoreResult<Response> {
        let url = self.url(path);
        debug!("GET {}", url);
        self.client.get(&url).send().await.map_err(|e| {
            error!("Remote API unreachable at {}: {}", url, e);
            CoreError::Unreachable(e.to_string())
        })
    }
}

/// Booking ids travel as a single path segment; anything that could
/// step outside `/api/bookings/` never reaches the API.
fn booking_path(booking_id: &str) -> Option<String> {
    let id = booking_id.trim();
    let well_formed = !id.is_empty()
        && id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    well_formed.then(|| format!("/api/bookings/{}", id))
}

async fn decode<T: DeserializeOwned>(response: Response) -> CoreResult<T> {
    response
        .json::<T>()
        .await
        .map_err(|e| CoreError::DecodeError(e.to_string()))
}

async fn remote_error(response: Response) -> CoreError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ApiErrorBody>(&body)
        .ok()
        .and_then(|b| b.message);
    error!("Remote API returned {}: {}", status, body);
    CoreError::RemoteError { status, message }
}

#[async_trait]
impl ExperienceRepository for RemoteApiClient {
    async fn list_experiences(&self) -> CoreResult<Vec<Experience>> {
        let response = self.get("/api/experiences").await?;
        if !response.status().is_success() {
            return Err(remote_error(response).await);
        }
        decode(response).await
    }

    async fn get_experience(&self, id: ExperienceId) -> CoreResult<Option<Experience>> {
        let response = self.get(&format!("/api/experiences/{}", id)).await?;
        match response.status() {
            StatusCode::NOT_FOUND => Ok(None),
            s if s.is_success() => decode(response).await.map(Some),
            _ => Err(remote_error(response).await),
        }
    }
}

#[async_trait]
impl BookingRepository for RemoteApiClient {
    async fn create_booking(
        &self,
        submission: &BookingSubmission,
    ) -> CoreResult<BookingConfirmation> {
        let url = self.url("/api/bookings");
        info!(
            experience_id = submission.experience_id,
            total_price = submission.total_price,
            "Submitting booking for {:?}",
            submission.email
        );

        let response = self
            .client
            .post(&url)
            .json(submission)
            .send()
            .await
            .map_err(|e| {
                error!("Booking submission failed to reach {}: {}", url, e);
                CoreError::Unreachable(e.to_string())
            })?;

        if !response.status().is_success() {
            return Err(remote_error(response).await);
        }
        decode(response).await
    }

    async fn get_booking(&self, booking_id: &str) -> CoreResult<Option<BookingRecord>> {
        let Some(path) = booking_path(booking_id) else {
            warn!("Refusing malformed booking id {:?}", booking_id);
            return Ok(None);
        };
        let response = self.get(&path).await?;
        match response.status() {
            StatusCode::NOT_FOUND => Ok(None),
            s if s.is_success() => decode(response).await.map(Some),
            _ => Err(remote_error(response).await),
        }
    }
}

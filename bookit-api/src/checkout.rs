use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use bookit_core::fetch;
use bookit_order::{CheckoutForm, CheckoutSession, CheckoutView, DraftParams, SubmittedBooking};
use serde::Deserialize;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::details::load_experience;
use crate::error::AppError;
use crate::state::AppState;

const NO_BOOKING_DETAILS: &str =
    "No booking details found. Please go back and select an experience.";

#[derive(Debug, Default, Deserialize)]
pub struct PromoRequest {
    #[serde(default)]
    pub promo: String,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/checkout", get(open))
        .route("/checkout/{session}", post(submit))
        .route("/checkout/{session}/promo", post(apply_promo))
}

/// GET /checkout?experience_id=&date=&time=&handoff=
/// Prefers the parked selection; falls back to rebuilding it from the route.
pub async fn open(
    State(state): State<AppState>,
    Query(params): Query<DraftParams>,
) -> Result<Json<CheckoutView>, AppError> {
    let draft = match params.handoff {
        Some(handoff) => state.handoffs.take(&handoff).await,
        None => None,
    };

    let session = match (draft, params.experience_id) {
        (Some(draft), _) => CheckoutSession::from_draft(draft, state.clock.as_ref()),
        (None, Some(id)) => {
            if params.handoff.is_some() {
                warn!(experience_id = id, "Handoff missing or expired, re-fetching experience");
            }
            let experience = load_experience(&state, id).await.map_err(|err| match err {
                AppError::NotFoundError(_) => no_booking_details(),
                other => other,
            })?;
            match params.rebuild(&experience, state.clock.today())? {
                Some(draft) => CheckoutSession::from_draft(draft, state.clock.as_ref()),
                None => CheckoutSession::open(experience, None, None, state.clock.as_ref()),
            }
        }
        (None, None) => return Err(no_booking_details()),
    };

    let session_id = state.checkouts.insert(session.clone()).await;
    info!(
        %session_id,
        experience_id = session.experience().id,
        reference = session.reference(),
        "Checkout session opened"
    );
    Ok(Json(session.view(session_id, &state.pricing, &state.api_base_url)))
}

/// POST /checkout/{session}/promo
pub async fn apply_promo(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(req): Json<PromoRequest>,
) -> Result<Json<CheckoutView>, AppError> {
    let view = state
        .checkouts
        .update(&session_id, |session| {
            session.apply_promo(&req.promo, &state.pricing);
            session.view(session_id, &state.pricing, &state.api_base_url)
        })
        .await
        .ok_or_else(no_booking_details)?;
    Ok(Json(view))
}

/// POST /checkout/{session}
/// Sends the booking once. The session is taken out of the store for the
/// duration of the call, so an overlapping submit finds nothing to send; on
/// failure it is put back for a resubmit.
pub async fn submit(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(form): Json<CheckoutForm>,
) -> Result<Json<SubmittedBooking>, AppError> {
    let mut session = state
        .checkouts
        .take(&session_id)
        .await
        .ok_or_else(no_booking_details)?;

    let submission = match session.prepare_submission(&form, &state.pricing) {
        Ok(submission) => submission,
        Err(err) => {
            state.checkouts.restore(session_id, session).await;
            return Err(err.into());
        }
    };

    debug!(%session_id, promo = ?submission.promo_code, "Checkout form accepted");

    let bookings = state.bookings.clone();
    match fetch::run(async move { bookings.create_booking(&submission).await }).await {
        Ok(confirmation) => {
            let submitted = session.confirmed(confirmation, &state.pricing);
            info!(%session_id, booking_id = %submitted.booking_id, "Booking confirmed");
            Ok(Json(submitted))
        }
        Err(err) => {
            error!(%session_id, "Booking submission failed: {}", err);
            let failure = session.submission_failed(&err);
            state.checkouts.restore(session_id, session).await;
            Err(failure.into())
        }
    }
}

fn no_booking_details() -> AppError {
    AppError::NotFoundError(NO_BOOKING_DETAILS.to_string())
}

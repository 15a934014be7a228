use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use bookit_core::fetch;
use bookit_order::{BookingDraft, DetailsView, SlotSelector};
use bookit_shared::{Experience, ExperienceId};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use crate::error::AppError;
use crate::state::AppState;

const NOT_FOUND: &str = "Experience not found.";

#[derive(Debug, Default, Deserialize)]
pub struct SelectionParams {
    pub date: Option<String>,
    pub time: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ContinueResponse {
    pub redirect: String,
    pub draft: BookingDraft,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/details/{id}", get(show))
        .route("/details/{id}/continue", post(continue_to_checkout))
}

/// GET /details/{id}?date=&time=
/// Preselections that no longer fit the calendar or grid are dropped.
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<ExperienceId>,
    Query(params): Query<SelectionParams>,
) -> Result<Json<DetailsView>, AppError> {
    let today = state.clock.today();

    let mut selector = SlotSelector::new();
    let ticket = selector.begin_load();
    let experience = load_experience(&state, id).await?;
    selector.finish_load(ticket, Ok(experience));

    if let Some(date) = params.date.as_deref().filter(|d| !d.trim().is_empty()) {
        if let Err(err) = selector.select_date(date, today) {
            debug!(experience_id = id, "Ignoring preselected date: {}", err);
        }
    }
    if let Some(time) = params.time.as_deref().filter(|t| !t.trim().is_empty()) {
        if let Err(err) = selector.select_time(time) {
            debug!(experience_id = id, "Ignoring preselected time: {}", err);
        }
    }

    let view = selector
        .view(&state.pricing, &state.api_base_url, today)
        .ok_or_else(|| AppError::NotFoundError(NOT_FOUND.to_string()))?;
    info!(experience_id = id, "Details page served");
    Ok(Json(view))
}

/// POST /details/{id}/continue
/// Validates the selection and parks it for checkout. Nothing is written remotely.
pub async fn continue_to_checkout(
    State(state): State<AppState>,
    Path(id): Path<ExperienceId>,
    Json(req): Json<SelectionParams>,
) -> Result<Json<ContinueResponse>, AppError> {
    let experience = load_experience(&state, id).await?;
    let draft = BookingDraft::new(
        experience,
        req.date.as_deref(),
        req.time.as_deref(),
        state.clock.today(),
    )?;

    let handoff = state.handoffs.insert(draft.clone()).await;
    let redirect = draft.params(Some(handoff)).checkout_path();
    info!(
        experience_id = id,
        date = %draft.date,
        time = %draft.time,
        "Selection handed off to checkout"
    );

    Ok(Json(ContinueResponse { redirect, draft }))
}

pub(crate) async fn load_experience(
    state: &AppState,
    id: ExperienceId,
) -> Result<Experience, AppError> {
    let repo = state.experiences.clone();
    match fetch::run(async move { repo.get_experience(id).await }).await {
        Ok(Some(experience)) => Ok(experience),
        Ok(None) => Err(AppError::NotFoundError(NOT_FOUND.to_string())),
        Err(err) => {
            error!(experience_id = id, "Experience fetch failed: {}", err);
            Err(AppError::BadGateway("Failed to fetch experience data.".to_string()))
        }
    }
}

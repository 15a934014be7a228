use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use bookit_core::fetch;
use bookit_order::{ResultPage, ResultView};
use serde::Deserialize;
use tracing::{error, info};

use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct ResultParams {
    pub success: Option<String>,
    pub id: Option<String>,
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/result", get(show))
}

/// GET /result?success=&id=
pub async fn show(
    State(state): State<AppState>,
    Query(params): Query<ResultParams>,
) -> Result<Json<ResultPage>, AppError> {
    let mut view = ResultView::from_query(params.success.as_deref(), params.id.as_deref());

    let (Some(booking_id), Some(ticket)) = (view.lookup().map(str::to_string), view.begin()) else {
        info!(success = ?params.success, "Result page in failure state");
        return Ok(Json(view.page()));
    };

    let bookings = state.bookings.clone();
    let lookup = booking_id.clone();
    let outcome = match fetch::run(async move { bookings.get_booking(&lookup).await }).await {
        Ok(Some(record)) => Ok(record),
        Ok(None) => return Err(AppError::NotFoundError("Booking not found.".to_string())),
        Err(err) => {
            error!(booking_id = %booking_id, "Booking fetch failed: {}", err);
            Err("Failed to load booking details".to_string())
        }
    };
    view.resolve(ticket, outcome);

    match view.page() {
        ResultPage::Error { message } => Err(AppError::BadGateway(message)),
        page => Ok(Json(page)),
    }
}

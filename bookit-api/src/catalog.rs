use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use bookit_core::fetch;
use bookit_order::{CatalogView, ListingPage};
use bookit_shared::Experience;
use serde::Deserialize;
use tracing::{error, info, warn};

use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home))
        .route("/search", get(search))
}

/// GET /
/// The home page never fails; a catalog outage shows the empty state.
pub async fn home(State(state): State<AppState>) -> Json<ListingPage> {
    let mut view = CatalogView::home();
    let ticket = view.begin();
    let outcome = load_catalog(&state, "Failed to fetch experiences").await;
    if let Err(msg) = &outcome {
        warn!("Home listing degraded to empty state: {}", msg);
    }
    view.resolve(ticket, outcome);
    Json(view.page(&state.api_base_url))
}

/// GET /search?q=
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<ListingPage>, AppError> {
    let mut view = CatalogView::search(params.q.as_deref());
    let ticket = view.begin();
    let outcome = load_catalog(&state, "Failed to load experiences").await;
    view.resolve(ticket, outcome);

    if let Some(msg) = view.error() {
        return Err(AppError::BadGateway(msg.to_string()));
    }

    let page = view.page(&state.api_base_url);
    info!(query = ?params.q, results = page.cards.len(), "Search listing served");
    Ok(Json(page))
}

async fn load_catalog(state: &AppState, failure: &str) -> Result<Vec<Experience>, String> {
    let repo = state.experiences.clone();
    fetch::run(async move { repo.list_experiences().await })
        .await
        .map_err(|err| {
            error!("Catalog fetch failed: {}", err);
            failure.to_string()
        })
}

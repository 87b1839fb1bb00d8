// handlers/listings/venues.rs - venue pages

use axum::extract::State;
use chrono::Utc;

use crate::app::AppState;
use crate::handlers::IdPath;
use crate::middleware::{ApiResponse, ApiResult, ValidatedJson};
use crate::services::listings::{
    Deleted, NewVenue, SearchResults, SearchTerm, VenueAreas, VenueBody, VenueDetail, VenuePatch,
};

/// GET /venues - venues grouped by city and state
pub async fn list(State(state): State<AppState>) -> ApiResult<VenueAreas> {
    Ok(ApiResponse::success(state.listings.venue_areas(Utc::now()).await?))
}

/// GET /venues/:id - venue with past and upcoming shows
pub async fn get(State(state): State<AppState>, IdPath(id): IdPath) -> ApiResult<VenueDetail> {
    Ok(ApiResponse::success(state.listings.venue(id, Utc::now()).await?))
}

/// POST /venues/search
pub async fn search(
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<SearchTerm>,
) -> ApiResult<SearchResults> {
    let results = state.listings.search_venues(&body.search_term, Utc::now()).await?;
    Ok(ApiResponse::success(results))
}

/// POST /venues
pub async fn create(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<NewVenue>,
) -> ApiResult<VenueBody> {
    Ok(ApiResponse::success(state.listings.create_venue(input).await?))
}

/// PATCH /venues/:id
pub async fn update(
    State(state): State<AppState>,
    IdPath(id): IdPath,
    ValidatedJson(patch): ValidatedJson<VenuePatch>,
) -> ApiResult<VenueBody> {
    Ok(ApiResponse::success(state.listings.update_venue(id, patch).await?))
}

/// DELETE /venues/:id - also removes the venue's shows
pub async fn delete(State(state): State<AppState>, IdPath(id): IdPath) -> ApiResult<Deleted> {
    Ok(ApiResponse::success(state.listings.delete_venue(id).await?))
}

// handlers/listings/artists.rs - artist pages

use axum::extract::State;
use chrono::Utc;

use crate::app::AppState;
use crate::handlers::IdPath;
use crate::middleware::{ApiResponse, ApiResult, ValidatedJson};
use crate::services::listings::{
    ArtistBody, ArtistDetail, ArtistList, ArtistPatch, Deleted, NewArtist, SearchResults, SearchTerm,
};

/// GET /artists - `[{id, name}]`
pub async fn list(State(state): State<AppState>) -> ApiResult<ArtistList> {
    Ok(ApiResponse::success(state.listings.artists().await?))
}

/// GET /artists/:id
pub async fn get(State(state): State<AppState>, IdPath(id): IdPath) -> ApiResult<ArtistDetail> {
    Ok(ApiResponse::success(state.listings.artist(id, Utc::now()).await?))
}

/// POST /artists/search
pub async fn search(
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<SearchTerm>,
) -> ApiResult<SearchResults> {
    let results = state.listings.search_artists(&body.search_term, Utc::now()).await?;
    Ok(ApiResponse::success(results))
}

/// POST /artists
pub async fn create(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<NewArtist>,
) -> ApiResult<ArtistBody> {
    Ok(ApiResponse::success(state.listings.create_artist(input).await?))
}

/// PATCH /artists/:id
pub async fn update(
    State(state): State<AppState>,
    IdPath(id): IdPath,
    ValidatedJson(patch): ValidatedJson<ArtistPatch>,
) -> ApiResult<ArtistBody> {
    Ok(ApiResponse::success(state.listings.update_artist(id, patch).await?))
}

/// DELETE /artists/:id - also removes the artist's shows
pub async fn delete(State(state): State<AppState>, IdPath(id): IdPath) -> ApiResult<Deleted> {
    Ok(ApiResponse::success(state.listings.delete_artist(id).await?))
}

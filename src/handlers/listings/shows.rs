// handlers/listings/shows.rs - show listing and booking

use axum::extract::State;

use crate::app::AppState;
use crate::middleware::{ApiResponse, ApiResult, ValidatedJson};
use crate::services::listings::{NewShow, ShowBody, ShowList};

/// GET /shows
pub async fn list(State(state): State<AppState>) -> ApiResult<ShowList> {
    Ok(ApiResponse::success(state.listings.shows().await?))
}

/// POST /shows - 422 when the artist or venue does not exist
pub async fn create(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<NewShow>,
) -> ApiResult<ShowBody> {
    Ok(ApiResponse::success(state.listings.create_show(input).await?))
}

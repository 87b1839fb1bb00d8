// handlers/coffee/drinks.rs - the coffee shop menu
//
// Everything except `list` sits behind a permission layer, so the verified
// claims are already in the request extensions when these run.

use axum::extract::State;
use axum::Extension;
use tracing::debug;

use crate::app::AppState;
use crate::auth::Claims;
use crate::handlers::IdPath;
use crate::middleware::{ApiResponse, ApiResult, ValidatedJson};
use crate::services::drinks::{DeletedDrink, DrinkDetails, DrinkMenu, DrinkPatch, NewDrink};

/// GET /drinks - public, short form
pub async fn list(State(state): State<AppState>) -> ApiResult<DrinkMenu> {
    Ok(ApiResponse::success(state.drinks.menu().await?))
}

/// GET /drinks-detail - requires `get:drinks-detail`, long form
pub async fn detail(State(state): State<AppState>) -> ApiResult<DrinkDetails> {
    Ok(ApiResponse::success(state.drinks.details().await?))
}

/// POST /drinks - requires `post:drinks`
pub async fn create(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    ValidatedJson(input): ValidatedJson<NewDrink>,
) -> ApiResult<DrinkDetails> {
    debug!(sub = %claims.sub, title = %input.title, "Creating drink");
    Ok(ApiResponse::success(state.drinks.create(input).await?))
}

/// PATCH /drinks/:id - requires `patch:drinks`
pub async fn update(
    State(state): State<AppState>,
    IdPath(id): IdPath,
    ValidatedJson(patch): ValidatedJson<DrinkPatch>,
) -> ApiResult<DrinkDetails> {
    Ok(ApiResponse::success(state.drinks.update(id, patch).await?))
}

/// DELETE /drinks/:id - requires `delete:drinks`
pub async fn delete(State(state): State<AppState>, IdPath(id): IdPath) -> ApiResult<DeletedDrink> {
    Ok(ApiResponse::success(state.drinks.delete(id).await?))
}

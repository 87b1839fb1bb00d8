// handlers/trivia/categories.rs - category listing and per-category questions

use axum::extract::State;

use crate::app::AppState;
use crate::handlers::IdPath;
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::trivia::{CategoryList, QuestionList};

/// GET /categories - `{id: type}` map and count
pub async fn get(State(state): State<AppState>) -> ApiResult<CategoryList> {
    Ok(ApiResponse::success(state.trivia.categories().await?))
}

/// GET /categories/:id/questions - every question in one category (404 if unknown)
pub async fn questions(State(state): State<AppState>, IdPath(id): IdPath) -> ApiResult<QuestionList> {
    Ok(ApiResponse::success(state.trivia.in_category(id).await?))
}

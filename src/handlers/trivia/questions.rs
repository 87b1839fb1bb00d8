// handlers/trivia/questions.rs - question listing, create/search and delete

use axum::extract::State;
use serde::Serialize;

use crate::app::AppState;
use crate::handlers::{IdPath, PageNumber};
use crate::middleware::{ApiResponse, ApiResult, ValidatedJson};
use crate::services::trivia::{CreatedQuestion, QuestionList, QuestionPage, QuestionsRequest};
use crate::types::DbId;

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum QuestionsOutcome {
    Found(QuestionList),
    Created(CreatedQuestion),
}

#[derive(Debug, Serialize)]
pub struct Deleted {
    pub deleted: DbId,
}

/// GET /questions?page=N - one page of ten questions plus the category map
pub async fn get(State(state): State<AppState>, PageNumber(page): PageNumber) -> ApiResult<QuestionPage> {
    Ok(ApiResponse::success(state.trivia.list(page).await?))
}

/// POST /questions - search when the body carries `searchTerm`, otherwise create
pub async fn post(
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<QuestionsRequest>,
) -> ApiResult<QuestionsOutcome> {
    let outcome = match body {
        QuestionsRequest::Search(search) => {
            QuestionsOutcome::Found(state.trivia.search(&search.search_term).await?)
        }
        QuestionsRequest::Create(question) => {
            QuestionsOutcome::Created(state.trivia.create(question).await?)
        }
    };
    Ok(ApiResponse::success(outcome))
}

/// DELETE /questions/:id
pub async fn delete(State(state): State<AppState>, IdPath(id): IdPath) -> ApiResult<Deleted> {
    let deleted = state.trivia.delete(id).await?;
    Ok(ApiResponse::success(Deleted { deleted }))
}

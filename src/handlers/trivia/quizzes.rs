// handlers/trivia/quizzes.rs - POST /quizzes

use axum::extract::State;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::app::AppState;
use crate::middleware::{ApiResponse, ApiResult, ValidatedJson};
use crate::services::trivia::{QuizRequest, QuizTurn};

/// POST /quizzes - next random question of the round, `null` when exhausted
pub async fn post(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<QuizRequest>,
) -> ApiResult<QuizTurn> {
    let mut rng = StdRng::from_os_rng();
    let turn = state.trivia.next_quiz_question(&request, &mut rng).await?;
    Ok(ApiResponse::success(turn))
}

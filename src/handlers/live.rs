use super::{ApiError, AppState};
use crate::models::{AnswerSubmission, MetaUpdate, Question, SurveyConfigUpdate, SurveyData};
use crate::results::live::{calculate_results, LiveQuestionResults};
use crate::validation::validate_questions;
use axum::{extract::State, http::StatusCode, response::Json};

/// GET /api/live
pub async fn get_survey_data(State(state): State<AppState>) -> Json<SurveyData> {
    Json(state.live.get().await)
}

/// POST /api/live/answers
pub async fn submit_answer(
    State(state): State<AppState>,
    Json(answer): Json<AnswerSubmission>,
) -> Result<StatusCode, ApiError> {
    state
        .live
        .submit_answer(&answer.question_id, &answer.value)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/live/reset
pub async fn reset_survey(State(state): State<AppState>) -> StatusCode {
    state.live.reset_answers().await;
    StatusCode::NO_CONTENT
}

/// PATCH /api/live
pub async fn update_survey_config(
    State(state): State<AppState>,
    Json(update): Json<SurveyConfigUpdate>,
) -> Result<StatusCode, ApiError> {
    if let Some(questions) = &update.questions {
        validate_questions(questions)?;
    }
    state.live.update_config(update).await;
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /api/live/questions
pub async fn replace_questions(
    State(state): State<AppState>,
    Json(questions): Json<Vec<Question>>,
) -> Result<StatusCode, ApiError> {
    validate_questions(&questions)?;
    state.live.replace_questions(questions).await;
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /api/live/meta
pub async fn update_meta(
    State(state): State<AppState>,
    Json(meta): Json<MetaUpdate>,
) -> StatusCode {
    state.live.update_meta(meta.title, meta.description).await;
    StatusCode::NO_CONTENT
}

/// GET /api/live/results
pub async fn get_results(State(state): State<AppState>) -> Json<Vec<LiveQuestionResults>> {
    let data = state.live.get().await;
    Json(calculate_results(&data))
}

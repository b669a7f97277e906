use super::{ApiError, AppState};
use crate::error::StoreError;
use crate::models::{NewSurvey, Response, ResponseSubmission, Survey};
use crate::results::catalog::{calculate_results, SurveyQuestionResults};
use crate::validation::validate_new_survey;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct Created {
    pub id: String,
}

/// POST /api/surveys
pub async fn create_survey(
    State(state): State<AppState>,
    Json(new_survey): Json<NewSurvey>,
) -> Result<(StatusCode, Json<Created>), ApiError> {
    validate_new_survey(&new_survey)?;
    let id = state.catalog.create_survey(new_survey).await;
    Ok((StatusCode::CREATED, Json(Created { id })))
}

/// GET /api/surveys
pub async fn list_surveys(State(state): State<AppState>) -> Json<Vec<Survey>> {
    Json(state.catalog.list_surveys().await)
}

/// GET /api/surveys/:id
pub async fn get_survey(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Survey>, ApiError> {
    state
        .catalog
        .get_survey(&id)
        .await
        .map(Json)
        .ok_or_else(|| StoreError::SurveyNotFound(id).into())
}

/// POST /api/surveys/:id/responses
pub async fn submit_response(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(submission): Json<ResponseSubmission>,
) -> Result<(StatusCode, Json<Created>), ApiError> {
    let response_id = state.catalog.submit_response(&id, submission.answers).await?;
    Ok((StatusCode::CREATED, Json(Created { id: response_id })))
}

/// GET /api/surveys/:id/responses
pub async fn get_responses(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Json<Vec<Response>> {
    Json(state.catalog.get_responses(&id).await)
}

/// GET /api/surveys/:id/results
pub async fn get_results(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<SurveyQuestionResults>>, ApiError> {
    let survey = state
        .catalog
        .get_survey(&id)
        .await
        .ok_or_else(|| StoreError::SurveyNotFound(id.clone()))?;
    let responses = state.catalog.get_responses(&id).await;
    Ok(Json(calculate_results(&survey, &responses)))
}

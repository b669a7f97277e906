//! HTTP surface for both survey flows.

pub mod live;
pub mod surveys;

use crate::collab::{ChangeNotifier, Clock, IdGenerator};
use crate::error::{StoreError, ValidationError};
use crate::models::SurveyData;
use crate::store::{LiveSurveyStore, SurveyCatalog};
use crate::validation::AnswerValidation;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response as HttpResponse},
    routing::{get, post, put},
    Router,
};
use log::warn;
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;

/// State shared by every handler. Built once at startup.
#[derive(Clone)]
pub struct AppState {
    pub live: Arc<LiveSurveyStore>,
    pub catalog: Arc<SurveyCatalog>,
}

impl AppState {
    pub fn new(
        validation: AnswerValidation,
        ids: Arc<dyn IdGenerator>,
        clock: Arc<dyn Clock>,
        notifier: Arc<dyn ChangeNotifier>,
    ) -> Self {
        Self {
            live: Arc::new(LiveSurveyStore::new(
                SurveyData::seeded(),
                validation,
                clock.clone(),
                notifier.clone(),
            )),
            catalog: Arc::new(SurveyCatalog::new(ids, clock, notifier)),
        }
    }
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Store(StoreError::SurveyNotFound(_)) => StatusCode::NOT_FOUND,
            ApiError::Store(_) => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> HttpResponse {
        let status = self.status();
        warn!("Request rejected ({}): {}", status, self);
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Single live survey
        .route("/api/live", get(live::get_survey_data).patch(live::update_survey_config))
        .route("/api/live/answers", post(live::submit_answer))
        .route("/api/live/reset", post(live::reset_survey))
        .route("/api/live/questions", put(live::replace_questions))
        .route("/api/live/meta", put(live::update_meta))
        .route("/api/live/results", get(live::get_results))
        // Survey catalog
        .route("/api/surveys", get(surveys::list_surveys).post(surveys::create_survey))
        .route("/api/surveys/:id", get(surveys::get_survey))
        .route(
            "/api/surveys/:id/responses",
            get(surveys::get_responses).post(surveys::submit_response),
        )
        .route("/api/surveys/:id/results", get(surveys::get_results))
        .route("/health", get(health))
        .with_state(state)
}

pub async fn health() -> impl IntoResponse {
    "OK"
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::collab::testing::{RecordingNotifier, SequentialIds, TickingClock};

    pub fn state(validation: AnswerValidation) -> AppState {
        AppState::new(
            validation,
            Arc::new(SequentialIds::new()),
            Arc::new(TickingClock::new()),
            Arc::new(RecordingNotifier::default()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Method, Request};
    use serde_json::Value;
    use tower::ServiceExt;

    async fn send(
        app: &Router,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let request = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => request
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => request.body(Body::empty()),
        }
        .unwrap();

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        // Extractor rejections come back as plain text
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };
        (status, json)
    }

    fn app() -> Router {
        create_router(test_support::state(AnswerValidation::Permissive))
    }

    #[test]
    fn errors_map_to_status_codes() {
        let cases = [
            (ApiError::from(ValidationError::EmptyTitle), StatusCode::BAD_REQUEST),
            (
                ApiError::from(StoreError::SurveyNotFound("x".to_string())),
                StatusCode::NOT_FOUND,
            ),
            (
                ApiError::from(StoreError::UnknownQuestion("q9".to_string())),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
        ];

        for (error, expected) in cases {
            assert_eq!(error.into_response().status(), expected);
        }
    }

    #[tokio::test]
    async fn catalog_flow_over_http_uses_camel_case() {
        let app = app();
        let new_survey = json!({
            "title": "Team lunch",
            "description": "Where to?",
            "questions": [{ "text": "Cuisine", "options": ["Thai", "Pizza"] }]
        });

        let (status, body) = send(&app, Method::POST, "/api/surveys", Some(new_survey)).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body, json!({ "id": "id-1" }));

        let (status, body) = send(&app, Method::GET, "/api/surveys", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body[0]["id"], "id-1");
        assert!(body[0]["createdAt"].is_string());

        let answers = json!({ "answers": { "0": 1 } });
        let uri = "/api/surveys/id-1/responses";
        let (status, body) = send(&app, Method::POST, uri, Some(answers)).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body, json!({ "id": "id-2" }));

        let (status, body) = send(&app, Method::GET, uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().map(Vec::len), Some(1));
        assert_eq!(body[0]["surveyId"], "id-1");
        assert!(body[0]["submittedAt"].is_string());
        assert_eq!(body[0]["answers"], json!({ "0": 1 }));

        let (status, body) = send(&app, Method::GET, "/api/surveys/id-1/results", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body[0]["options"][1]["count"], 1);
        assert_eq!(body[0]["options"][1]["percentage"], 100);
    }

    #[tokio::test]
    async fn unknown_survey_is_a_json_404() {
        let app = app();

        let (status, body) = send(&app, Method::GET, "/api/surveys/nonexistent", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({ "error": "Survey not found: nonexistent" }));
    }

    #[tokio::test]
    async fn live_writes_answer_with_no_content() {
        let app = app();

        let answer = json!({ "questionId": "q1", "value": "4" });
        let (status, body) = send(&app, Method::POST, "/api/live/answers", Some(answer)).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert_eq!(body, Value::Null);

        let patch = json!({ "title": "X" });
        let (status, _) = send(&app, Method::PATCH, "/api/live", Some(patch)).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let meta = json!({ "description": "Now with more slides" });
        let (status, _) = send(&app, Method::PUT, "/api/live/meta", Some(meta)).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, body) = send(&app, Method::GET, "/api/live", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["title"], "X");
        assert_eq!(body["description"], "Now with more slides");
        assert_eq!(body["answers"][0]["questionId"], "q1");
        assert_eq!(body["answers"][0]["value"], "4");
    }

    #[tokio::test]
    async fn config_patch_cannot_overwrite_answers() {
        let app = app();
        let answer = json!({ "questionId": "q2", "value": "Pricing" });
        send(&app, Method::POST, "/api/live/answers", Some(answer)).await;

        let patch = json!({ "title": "X", "answers": [] });
        let (status, _) = send(&app, Method::PATCH, "/api/live", Some(patch)).await;
        assert!(status.is_client_error());

        let (_, body) = send(&app, Method::GET, "/api/live", None).await;
        assert_eq!(body["title"], "Live Survey");
        assert_eq!(body["answers"].as_array().map(Vec::len), Some(1));
    }

    #[tokio::test]
    async fn question_list_put_is_validated() {
        let app = app();

        let questions = json!([{ "id": "q2", "text": "Pick", "type": "multiple-choice",
            "options": ["Only"] }]);
        let (status, body) =
            send(&app, Method::PUT, "/api/live/questions", Some(questions)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());

        let questions = json!([{ "id": "q3", "text": "Comments?", "type": "text" }]);
        let (status, _) = send(&app, Method::PUT, "/api/live/questions", Some(questions)).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (_, body) = send(&app, Method::GET, "/api/live/results", None).await;
        assert_eq!(body.as_array().map(Vec::len), Some(1));
        assert_eq!(body[0]["tally"]["kind"], "text");
    }
}

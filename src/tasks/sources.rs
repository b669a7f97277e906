use crate::models::{Response, SurveyData};
use crate::store::{LiveSurveyStore, SurveyCatalog};
use crate::tasks::poller::{PollError, PollSource};
use async_trait::async_trait;
use std::sync::Arc;

// Admin, presenter and respondent views all poll the live survey as a whole
#[async_trait]
impl PollSource for LiveSurveyStore {
    type Output = SurveyData;

    async fn fetch(&self) -> Result<SurveyData, PollError> {
        Ok(self.get().await)
    }
}

/// Responses of one catalog survey, as the presenter view re-reads them.
#[allow(dead_code)]
pub struct ResponseFeed {
    catalog: Arc<SurveyCatalog>,
    survey_id: String,
}

#[allow(dead_code)]
impl ResponseFeed {
    pub fn new(catalog: Arc<SurveyCatalog>, survey_id: impl Into<String>) -> Self {
        Self {
            catalog,
            survey_id: survey_id.into(),
        }
    }
}

#[async_trait]
impl PollSource for ResponseFeed {
    type Output = Vec<Response>;

    async fn fetch(&self) -> Result<Vec<Response>, PollError> {
        Ok(self.catalog.get_responses(&self.survey_id).await)
    }
}

use crate::collab::{ChangeNotifier, ChangeScope, Clock, IdGenerator};
use crate::error::StoreError;
use crate::models::{NewSurvey, Response, Survey};
use log::info;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Default)]
struct CatalogState {
    surveys: HashMap<String, Survey>,
    // Creation order of survey ids
    order: Vec<String>,
    responses: HashMap<String, Vec<Response>>,
}

/// Named surveys, each keeping every respondent's full submission.
pub struct SurveyCatalog {
    state: RwLock<CatalogState>,
    ids: Arc<dyn IdGenerator>,
    clock: Arc<dyn Clock>,
    notifier: Arc<dyn ChangeNotifier>,
}

impl SurveyCatalog {
    pub fn new(
        ids: Arc<dyn IdGenerator>,
        clock: Arc<dyn Clock>,
        notifier: Arc<dyn ChangeNotifier>,
    ) -> Self {
        Self {
            state: RwLock::new(CatalogState::default()),
            ids,
            clock,
            notifier,
        }
    }

    // Store a new survey with an empty response list and return its id
    pub async fn create_survey(&self, new_survey: NewSurvey) -> String {
        let id = self.ids.next_id();
        let survey = Survey::new(id.clone(), new_survey, self.clock.now());

        {
            let mut state = self.state.write().await;
            info!(
                "Created survey {} ({} question(s)): {}",
                id,
                survey.questions.len(),
                survey.title
            );
            state.surveys.insert(id.clone(), survey);
            state.order.push(id.clone());
            state.responses.insert(id.clone(), Vec::new());
        }

        self.notifier.notify(ChangeScope::Survey(id.clone()));
        id
    }

    pub async fn get_survey(&self, id: &str) -> Option<Survey> {
        self.state.read().await.surveys.get(id).cloned()
    }

    pub async fn list_surveys(&self) -> Vec<Survey> {
        let state = self.state.read().await;
        state
            .order
            .iter()
            .filter_map(|id| state.surveys.get(id).cloned())
            .collect()
    }

    // Append one respondent's submission; responses are never merged
    pub async fn submit_response(
        &self,
        survey_id: &str,
        answers: BTreeMap<usize, usize>,
    ) -> Result<String, StoreError> {
        let response = Response {
            id: self.ids.next_id(),
            survey_id: survey_id.to_string(),
            answers,
            submitted_at: self.clock.now(),
        };
        let response_id = response.id.clone();

        {
            let mut state = self.state.write().await;
            if !state.surveys.contains_key(survey_id) {
                return Err(StoreError::SurveyNotFound(survey_id.to_string()));
            }
            let responses = state.responses.entry(survey_id.to_string()).or_default();
            responses.push(response);
            info!(
                "Response {} recorded for survey {} ({} total)",
                response_id,
                survey_id,
                responses.len()
            );
        }

        self.notifier.notify(ChangeScope::Survey(survey_id.to_string()));
        Ok(response_id)
    }

    // Responses in submission order; unknown surveys have none
    pub async fn get_responses(&self, survey_id: &str) -> Vec<Response> {
        self.state
            .read()
            .await
            .responses
            .get(survey_id)
            .cloned()
            .unwrap_or_default()
    }
}

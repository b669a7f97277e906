use crate::collab::{ChangeNotifier, ChangeScope, Clock};
use crate::error::StoreError;
use crate::models::{Answer, Question, SurveyConfigUpdate, SurveyData};
use crate::validation::AnswerValidation;
use log::info;
use std::sync::Arc;
use tokio::sync::RwLock;

/// The single live survey: latest answer per question, shared by every view.
pub struct LiveSurveyStore {
    data: RwLock<SurveyData>,
    validation: AnswerValidation,
    clock: Arc<dyn Clock>,
    notifier: Arc<dyn ChangeNotifier>,
}

impl LiveSurveyStore {
    pub fn new(
        initial: SurveyData,
        validation: AnswerValidation,
        clock: Arc<dyn Clock>,
        notifier: Arc<dyn ChangeNotifier>,
    ) -> Self {
        Self {
            data: RwLock::new(initial),
            validation,
            clock,
            notifier,
        }
    }

    // Snapshot of the current state; callers own the copy
    pub async fn get(&self) -> SurveyData {
        self.data.read().await.clone()
    }

    // Record an answer, overwriting any earlier answer for the same question
    pub async fn submit_answer(&self, question_id: &str, value: &str) -> Result<(), StoreError> {
        {
            let mut data = self.data.write().await;
            self.validation.check(&data, question_id, value)?;

            let answer = Answer {
                question_id: question_id.to_string(),
                value: value.to_string(),
                timestamp: self.clock.now(),
            };

            let existing = data.answers.iter().position(|a| a.question_id == question_id);
            match existing {
                Some(index) => data.answers[index] = answer,
                None => data.answers.push(answer),
            }
        }

        info!("Answer recorded for question {}", question_id);
        self.notifier.notify(ChangeScope::Live);
        Ok(())
    }

    // Swap in an edited question set. Answers are left as they are, even orphaned ones.
    pub async fn replace_questions(&self, questions: Vec<Question>) {
        {
            let mut data = self.data.write().await;
            let reconciled = reconcile_questions(&data.questions, questions);
            info!("Live survey now has {} question(s)", reconciled.len());
            data.questions = reconciled;
        }
        self.notifier.notify(ChangeScope::Live);
    }

    pub async fn reset_answers(&self) {
        {
            let mut data = self.data.write().await;
            info!("Clearing {} live answer(s)", data.answers.len());
            data.answers.clear();
        }
        self.notifier.notify(ChangeScope::Live);
    }

    pub async fn update_meta(&self, title: Option<String>, description: Option<String>) {
        {
            let mut data = self.data.write().await;
            apply_meta(&mut data, title, description);
        }
        self.notifier.notify(ChangeScope::Live);
    }

    // Apply a partial config update under one write lock, firing a single notification
    pub async fn update_config(&self, update: SurveyConfigUpdate) {
        {
            let mut data = self.data.write().await;
            apply_meta(&mut data, update.title, update.description);
            if let Some(questions) = update.questions {
                data.questions = reconcile_questions(&data.questions, questions);
            }
        }
        info!("Live survey configuration updated");
        self.notifier.notify(ChangeScope::Live);
    }
}

fn apply_meta(data: &mut SurveyData, title: Option<String>, description: Option<String>) {
    if let Some(title) = title {
        data.title = title;
    }
    if let Some(description) = description {
        data.description = description;
    }
}

// An incoming question keeps the id of the existing question it matches;
// unmatched questions keep their own id.
fn reconcile_questions(existing: &[Question], incoming: Vec<Question>) -> Vec<Question> {
    incoming
        .into_iter()
        .map(|mut question| {
            if let Some(current) = existing.iter().find(|q| q.id == question.id) {
                question.id = current.id.clone();
            }
            question
        })
        .collect()
}

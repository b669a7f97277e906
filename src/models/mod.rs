use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// --- Live survey (one shared survey, latest answer per question) ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuestionType {
    MultipleChoice,
    Text,
    Rating,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: String,
    pub text: String,
    #[serde(rename = "type")]
    pub kind: QuestionType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Answer {
    pub question_id: String,
    pub value: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurveyData {
    pub title: String,
    pub description: String,
    pub questions: Vec<Question>,
    pub answers: Vec<Answer>,
}

/// Partial update of the live survey. Absent fields are left untouched.
/// Answers cannot be written through a config update; any key other than
/// the three below rejects the whole body.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SurveyConfigUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub questions: Option<Vec<Question>>,
}

/// Header edit of the live survey.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MetaUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerSubmission {
    pub question_id: String,
    pub value: String,
}

pub const RATING_VALUES: [&str; 5] = ["1", "2", "3", "4", "5"];

impl Question {
    pub fn rating(id: &str, text: &str) -> Self {
        Self {
            id: id.to_string(),
            text: text.to_string(),
            kind: QuestionType::Rating,
            options: None,
        }
    }

    pub fn text(id: &str, text: &str) -> Self {
        Self {
            id: id.to_string(),
            text: text.to_string(),
            kind: QuestionType::Text,
            options: None,
        }
    }

    pub fn multiple_choice(id: &str, text: &str, options: &[&str]) -> Self {
        Self {
            id: id.to_string(),
            text: text.to_string(),
            kind: QuestionType::MultipleChoice,
            options: Some(options.iter().map(|o| o.to_string()).collect()),
        }
    }

    /// The values a respondent may pick, in presentation order. Empty for free text.
    pub fn choices(&self) -> Vec<String> {
        match self.kind {
            QuestionType::MultipleChoice => self.options.clone().unwrap_or_default(),
            QuestionType::Rating => RATING_VALUES.iter().map(|v| v.to_string()).collect(),
            QuestionType::Text => Vec::new(),
        }
    }
}

impl SurveyData {
    /// Content the live survey starts with on every process start.
    pub fn seeded() -> Self {
        Self {
            title: "Live Survey".to_string(),
            description: "Results of this survey are shown in real time".to_string(),
            questions: vec![
                Question::rating("q1", "How easy was this presentation to follow?"),
                Question::multiple_choice(
                    "q2",
                    "Which topic did you find most interesting?",
                    &["Product features", "Technical details", "Pricing", "Use cases"],
                ),
                Question::text("q3", "Any questions or comments?"),
            ],
            answers: Vec::new(),
        }
    }

    pub fn question(&self, question_id: &str) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == question_id)
    }

    pub fn answers_for<'a>(
        &'a self,
        question_id: &'a str,
    ) -> impl Iterator<Item = &'a Answer> + 'a {
        self.answers.iter().filter(move |a| a.question_id == question_id)
    }
}

// --- Survey catalog (many named surveys, one full response per respondent) ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurveyQuestion {
    pub text: String,
    pub options: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewSurvey {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub questions: Vec<SurveyQuestion>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Survey {
    pub id: String,
    pub title: String,
    pub description: String,
    pub questions: Vec<SurveyQuestion>,
    pub created_at: DateTime<Utc>,
}

/// One respondent's full submission: question index -> selected option index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    pub id: String,
    pub survey_id: String,
    pub answers: BTreeMap<usize, usize>,
    pub submitted_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResponseSubmission {
    pub answers: BTreeMap<usize, usize>,
}

impl Survey {
    pub fn new(id: String, new_survey: NewSurvey, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            title: new_survey.title,
            description: new_survey.description,
            questions: new_survey.questions,
            created_at,
        }
    }
}

impl SurveyQuestion {
    pub fn new(text: &str, options: &[&str]) -> Self {
        Self {
            text: text.to_string(),
            options: options.iter().map(|o| o.to_string()).collect(),
        }
    }
}

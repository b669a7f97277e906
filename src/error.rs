use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("Survey not found: {0}")]
    SurveyNotFound(String),

    #[error("Unknown question: {0}")]
    UnknownQuestion(String),

    #[error("Invalid value '{value}' for question {question_id}")]
    InvalidValue { question_id: String, value: String },
}

/// Rejections raised at the request boundary before data reaches a store.
/// Question and option positions are 1-based, as shown to the editor.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Title must not be empty")]
    EmptyTitle,

    #[error("Question {0} has no id")]
    MissingQuestionId(usize),

    #[error("Question {0} has no text")]
    EmptyQuestionText(usize),

    #[error("Question {0} needs at least 2 options")]
    TooFewOptions(usize),

    #[error("Question {question}, option {option} is empty")]
    EmptyOption { question: usize, option: usize },
}

use crate::error::{StoreError, ValidationError};
use crate::models::{NewSurvey, Question, QuestionType, SurveyData};
use std::str::FromStr;

/// How strictly the live store checks a submitted answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnswerValidation {
    /// Store whatever arrives, even for unknown questions.
    #[default]
    Permissive,
    /// Require a live question id and a legal option or rating digit.
    Strict,
}

impl FromStr for AnswerValidation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "permissive" => Ok(Self::Permissive),
            "strict" => Ok(Self::Strict),
            other => Err(format!("unknown answer validation mode '{}'", other)),
        }
    }
}

impl AnswerValidation {
    pub fn check(
        self,
        data: &SurveyData,
        question_id: &str,
        value: &str,
    ) -> Result<(), StoreError> {
        if self == Self::Permissive {
            return Ok(());
        }

        let question = data
            .question(question_id)
            .ok_or_else(|| StoreError::UnknownQuestion(question_id.to_string()))?;

        let legal = match question.kind {
            QuestionType::Text => true,
            QuestionType::MultipleChoice | QuestionType::Rating => {
                question.choices().iter().any(|choice| choice == value)
            }
        };

        if legal {
            Ok(())
        } else {
            Err(StoreError::InvalidValue {
                question_id: question_id.to_string(),
                value: value.to_string(),
            })
        }
    }
}

pub fn validate_new_survey(survey: &NewSurvey) -> Result<(), ValidationError> {
    if survey.title.trim().is_empty() {
        return Err(ValidationError::EmptyTitle);
    }

    for (i, question) in survey.questions.iter().enumerate() {
        let position = i + 1;
        if question.text.trim().is_empty() {
            return Err(ValidationError::EmptyQuestionText(position));
        }
        check_options(position, &question.options)?;
    }

    Ok(())
}

/// Checks an edited live question set, as the admin editor does before saving.
pub fn validate_questions(questions: &[Question]) -> Result<(), ValidationError> {
    for (i, question) in questions.iter().enumerate() {
        let position = i + 1;
        if question.id.trim().is_empty() {
            return Err(ValidationError::MissingQuestionId(position));
        }
        if question.text.trim().is_empty() {
            return Err(ValidationError::EmptyQuestionText(position));
        }
        if question.kind == QuestionType::MultipleChoice {
            let options = question.options.as_deref().unwrap_or_default();
            check_options(position, options)?;
        }
    }

    Ok(())
}

fn check_options(position: usize, options: &[String]) -> Result<(), ValidationError> {
    if options.len() < 2 {
        return Err(ValidationError::TooFewOptions(position));
    }
    if let Some(empty) = options.iter().position(|o| o.trim().is_empty()) {
        return Err(ValidationError::EmptyOption {
            question: position,
            option: empty + 1,
        });
    }
    Ok(())
}

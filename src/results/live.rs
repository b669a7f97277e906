use crate::models::{Question, QuestionType, SurveyData};
use crate::results::{format_counts, option_counts, OptionCount};
use serde::Serialize;

/// What a question's answers add up to: option counts, or the raw texts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Tally {
    Counts { options: Vec<OptionCount> },
    Text { responses: Vec<String> },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LiveQuestionResults {
    pub question_id: String,
    pub text: String,
    pub total: usize,
    pub tally: Tally,
}

impl LiveQuestionResults {
    pub fn summary(&self) -> String {
        match &self.tally {
            Tally::Counts { options } => format!("{}: {}", self.text, format_counts(options)),
            Tally::Text { responses } => {
                format!("{}: {} text answer(s)", self.text, responses.len())
            }
        }
    }
}

/// Results for every live question, in presentation order. Answers whose
/// question is no longer live are ignored.
pub fn calculate_results(data: &SurveyData) -> Vec<LiveQuestionResults> {
    data.questions
        .iter()
        .map(|question| question_results(question, data))
        .collect()
}

fn question_results(question: &Question, data: &SurveyData) -> LiveQuestionResults {
    let values: Vec<&str> = data
        .answers_for(&question.id)
        .map(|a| a.value.as_str())
        .collect();
    let total = values.len();

    let tally = match question.kind {
        QuestionType::Text => Tally::Text {
            responses: values.iter().map(|v| v.to_string()).collect(),
        },
        QuestionType::MultipleChoice | QuestionType::Rating => {
            let choices = question.choices();
            let mut counts = vec![0usize; choices.len()];
            for value in &values {
                // Values matching no option still count toward the total
                if let Some(index) = choices.iter().position(|c| c == value) {
                    counts[index] += 1;
                }
            }
            Tally::Counts {
                options: option_counts(&choices, &counts, total),
            }
        }
    };

    LiveQuestionResults {
        question_id: question.id.clone(),
        text: question.text.clone(),
        total,
        tally,
    }
}

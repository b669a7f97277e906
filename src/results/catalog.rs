use crate::models::{Response, Survey};
use crate::results::{option_counts, OptionCount};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SurveyQuestionResults {
    pub question_index: usize,
    pub text: String,
    // Number of respondents, whether or not they answered this question
    pub total: usize,
    pub options: Vec<OptionCount>,
}

/// Option tallies for one question across all responses. Skipped questions
/// and out-of-range option indices count toward no option.
pub fn tally_question(
    survey: &Survey,
    question_index: usize,
    responses: &[Response],
) -> Option<SurveyQuestionResults> {
    let question = survey.questions.get(question_index)?;
    let mut counts = vec![0usize; question.options.len()];

    for response in responses {
        if let Some(&option) = response.answers.get(&question_index) {
            if let Some(count) = counts.get_mut(option) {
                *count += 1;
            }
        }
    }

    Some(SurveyQuestionResults {
        question_index,
        text: question.text.clone(),
        total: responses.len(),
        options: option_counts(&question.options, &counts, responses.len()),
    })
}

pub fn calculate_results(survey: &Survey, responses: &[Response]) -> Vec<SurveyQuestionResults> {
    (0..survey.questions.len())
        .filter_map(|index| tally_question(survey, index, responses))
        .collect()
}

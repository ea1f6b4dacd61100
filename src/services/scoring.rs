//! Scoring of learner submissions against stored correct answers.
//!
//! Everything here is synchronous and pure. The caller resolves the submitted
//! question ids against the store first and hands over an [`AnswerKey`]; no I/O
//! happens during scoring.

use std::collections::HashMap;

use serde::Serialize;
use serde_json::Value;

use crate::{
    errors::{AppError, AppResult},
    models::{domain::Question, dto::request::SubmittedAnswer},
};

/// Correct option indices for the question ids that resolved against the store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerKey {
    correct: HashMap<String, i64>,
}

impl AnswerKey {
    pub fn from_questions<'a>(questions: impl IntoIterator<Item = &'a Question>) -> Self {
        questions
            .into_iter()
            .filter_map(|q| q.id_hex().map(|id| (id, q.correct_option_index)))
            .collect()
    }

    /// Number of distinct resolved questions. This is the score denominator.
    pub fn resolved_count(&self) -> usize {
        self.correct.len()
    }

    pub fn correct_index(&self, question_id: &str) -> Option<i64> {
        // ObjectId hex is case-insensitive; keys are stored lowercase.
        self.correct
            .get(question_id)
            .or_else(|| self.correct.get(&question_id.to_ascii_lowercase()))
            .copied()
    }
}

impl FromIterator<(String, i64)> for AnswerKey {
    fn from_iter<I: IntoIterator<Item = (String, i64)>>(iter: I) -> Self {
        AnswerKey {
            correct: iter
                .into_iter()
                .map(|(id, index)| (id.to_ascii_lowercase(), index))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerResult {
    pub question_id: String,
    pub submitted_index: Option<Value>,
    pub is_correct: bool,
    /// `None` when the question id did not resolve.
    pub correct_index: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreReport {
    pub score: usize,
    pub total_questions: usize,
    /// `None` when no submitted id resolved, so there is nothing to divide by.
    pub percentage: Option<f64>,
    pub results: Vec<AnswerResult>,
}

pub struct SubmissionScorer;

impl SubmissionScorer {
    /// Parses a raw submission body into answers.
    ///
    /// The body must be a JSON array of `{questionId, selectedIndex}` objects;
    /// anything else is rejected before any scoring takes place.
    pub fn parse_submission(body: Value) -> AppResult<Vec<SubmittedAnswer>> {
        let Value::Array(items) = body else {
            return Err(AppError::InvalidInput(
                "Invalid submission format. Expected an array of answers.".to_string(),
            ));
        };

        items
            .into_iter()
            .enumerate()
            .map(|(position, item)| {
                serde_json::from_value::<SubmittedAnswer>(item).map_err(|e| {
                    AppError::InvalidInput(format!("Invalid answer at position {}: {}", position, e))
                })
            })
            .collect()
    }

    /// Scores each answer in order against `key`.
    ///
    /// An answer is correct only when its id resolved and the submitted value is
    /// an integer equal to the stored index. Duplicated ids are scored
    /// independently.
    pub fn score(answers: &[SubmittedAnswer], key: &AnswerKey) -> ScoreReport {
        let results: Vec<AnswerResult> = answers
            .iter()
            .map(|answer| {
                let correct_index = key.correct_index(&answer.question_id);
                let selected = answer.selected_index.as_ref().and_then(Value::as_i64);
                let is_correct = matches!(
                    (correct_index, selected),
                    (Some(correct), Some(selected)) if correct == selected
                );

                AnswerResult {
                    question_id: answer.question_id.clone(),
                    submitted_index: answer.selected_index.clone(),
                    is_correct,
                    correct_index,
                }
            })
            .collect();

        let score = results.iter().filter(|r| r.is_correct).count();
        let total_questions = key.resolved_count();
        let percentage =
            (total_questions > 0).then(|| score as f64 / total_questions as f64 * 100.0);

        ScoreReport {
            score,
            total_questions,
            percentage,
            results,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const Q1: &str = "65a1f0c2e4b0a1b2c3d4e5f1";
    const Q2: &str = "65a1f0c2e4b0a1b2c3d4e5f2";
    const Q3: &str = "65a1f0c2e4b0a1b2c3d4e5f3";

    fn key() -> AnswerKey {
        [(Q1.to_string(), 1), (Q2.to_string(), 0)].into_iter().collect()
    }

    #[test]
    fn test_scores_mixed_submission() {
        let answers = vec![
            SubmittedAnswer::new(Q1, 1),
            SubmittedAnswer::new(Q2, 1),
            SubmittedAnswer::new(Q3, 0),
        ];

        let report = SubmissionScorer::score(&answers, &key());

        assert_eq!(report.score, 1);
        assert_eq!(report.total_questions, 2);
        assert_eq!(report.percentage, Some(50.0));

        let verdicts: Vec<_> = report
            .results
            .iter()
            .map(|r| (r.question_id.as_str(), r.is_correct, r.correct_index))
            .collect();
        assert_eq!(
            verdicts,
            vec![(Q1, true, Some(1)), (Q2, false, Some(0)), (Q3, false, None)]
        );
    }

    #[test]
    fn test_empty_submission_has_no_percentage() {
        let report = SubmissionScorer::score(&[], &AnswerKey::default());

        assert_eq!(report.score, 0);
        assert_eq!(report.total_questions, 0);
        assert_eq!(report.percentage, None);
        assert!(report.results.is_empty());
    }

    #[test]
    fn test_duplicate_ids_score_independently() {
        let answers = vec![SubmittedAnswer::new(Q1, 1), SubmittedAnswer::new(Q1, 1)];

        let report = SubmissionScorer::score(&answers, &key());

        assert_eq!(report.score, 2);
        assert!(report.results.iter().all(|r| r.is_correct));
        assert_eq!(report.total_questions, 2);
    }

    #[test]
    fn test_unresolved_ids_only_gives_null_percentage() {
        let answers = vec![SubmittedAnswer::new(Q3, 0)];

        let report = SubmissionScorer::score(&answers, &AnswerKey::default());

        assert_eq!(report.score, 0);
        assert_eq!(report.total_questions, 0);
        assert_eq!(report.percentage, None);
        assert_eq!(report.results.len(), 1);
        assert_eq!(report.results[0].correct_index, None);
    }

    #[test]
    fn test_out_of_range_and_non_integer_indices_never_match() {
        let answers = vec![
            SubmittedAnswer::new(Q1, 99),
            SubmittedAnswer::new(Q1, -1),
            SubmittedAnswer {
                question_id: Q1.to_string(),
                selected_index: Some(json!("1")),
            },
            SubmittedAnswer {
                question_id: Q1.to_string(),
                selected_index: Some(json!(1.5)),
            },
            SubmittedAnswer {
                question_id: Q1.to_string(),
                selected_index: None,
            },
        ];

        let report = SubmissionScorer::score(&answers, &key());

        assert_eq!(report.score, 0);
        assert!(report.results.iter().all(|r| !r.is_correct));
        assert!(report.results.iter().all(|r| r.correct_index == Some(1)));
        assert_eq!(report.results[2].submitted_index, Some(json!("1")));
    }

    #[test]
    fn test_results_preserve_input_order() {
        let answers = vec![
            SubmittedAnswer::new(Q3, 2),
            SubmittedAnswer::new(Q2, 0),
            SubmittedAnswer::new(Q1, 0),
            SubmittedAnswer::new(Q2, 3),
        ];

        let report = SubmissionScorer::score(&answers, &key());

        let ids: Vec<_> = report.results.iter().map(|r| r.question_id.as_str()).collect();
        assert_eq!(ids, vec![Q3, Q2, Q1, Q2]);
        assert_eq!(report.results.len(), answers.len());
    }

    #[test]
    fn test_lookup_ignores_hex_case() {
        let answers = vec![SubmittedAnswer::new(&Q2.to_ascii_uppercase(), 0)];

        let report = SubmissionScorer::score(&answers, &key());

        assert_eq!(report.score, 1);
    }

    #[test]
    fn test_answer_key_from_questions_skips_unsaved() {
        let mut saved = Question::new("Saved?", &["no", "yes"], 1);
        saved.id = Some(mongodb::bson::oid::ObjectId::new());
        let unsaved = Question::new("Unsaved?", &["no", "yes"], 0);

        let key = AnswerKey::from_questions([&saved, &unsaved]);

        assert_eq!(key.resolved_count(), 1);
        assert_eq!(key.correct_index(&saved.id_hex().unwrap()), Some(1));
    }

    #[test]
    fn test_parse_submission_rejects_non_array() {
        let result = SubmissionScorer::parse_submission(json!({ "questionId": Q1 }));
        assert!(matches!(result, Err(AppError::InvalidInput(_))));
    }

    #[test]
    fn test_parse_submission_rejects_malformed_element() {
        let result = SubmissionScorer::parse_submission(json!([
            { "questionId": Q1, "selectedIndex": 1 },
            "not an answer"
        ]));

        match result {
            Err(AppError::InvalidInput(msg)) => assert!(msg.contains("position 1")),
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_submission_accepts_answers() {
        let answers = SubmissionScorer::parse_submission(json!([
            { "questionId": Q1, "selectedIndex": 1 },
            { "questionId": Q2 }
        ]))
        .unwrap();

        assert_eq!(answers.len(), 2);
        assert_eq!(answers[0], SubmittedAnswer::new(Q1, 1));
        assert!(answers[1].selected_index.is_none());
    }

    #[test]
    fn test_report_serializes_null_percentage() {
        let report = SubmissionScorer::score(&[], &AnswerKey::default());
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(
            json,
            json!({ "score": 0, "totalQuestions": 0, "percentage": null, "results": [] })
        );
    }
}

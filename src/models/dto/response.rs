use serde::Serialize;

use crate::models::domain::Question;

/// Learner-facing view of a question. The correct index is never included.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuizQuestionDto {
    pub id: String,
    pub question: String,
    pub options: Vec<String>,
    pub category: String,
}

impl From<Question> for QuizQuestionDto {
    fn from(question: Question) -> Self {
        QuizQuestionDto {
            id: question.id_hex().unwrap_or_default(),
            question: question.question,
            options: question.options,
            category: question.category,
        }
    }
}

/// Admin view of a stored question.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionDto {
    pub id: String,
    pub question: String,
    pub options: Vec<String>,
    pub correct_option_index: i64,
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl From<Question> for QuestionDto {
    fn from(question: Question) -> Self {
        QuestionDto {
            id: question.id_hex().unwrap_or_default(),
            created_at: question
                .created_at
                .and_then(|dt| dt.try_to_rfc3339_string().ok()),
            updated_at: question
                .updated_at
                .and_then(|dt| dt.try_to_rfc3339_string().ok()),
            question: question.question,
            options: question.options,
            correct_option_index: question.correct_option_index,
            category: question.category,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct QuestionMutationResponse {
    pub message: String,
    pub question: QuestionDto,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct DevTokenResponse {
    pub message: String,
    pub token: String,
    pub note: String,
}

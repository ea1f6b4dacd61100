use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

use crate::errors::{AppError, AppResult};
use crate::models::dto::request::{CreateQuestionRequest, UpdateQuestionRequest};

pub const DEFAULT_CATEGORY: &str = "General";

fn default_category() -> String {
    DEFAULT_CATEGORY.to_string()
}

/// A single quiz item with exactly one correct option.
///
/// Field names follow the documents already stored in the `questions`
/// collection (`correctOptionIndex`, `createdAt`, ...).
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub question: String,
    pub options: Vec<String>,
    pub correct_option_index: i64,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime>,
}

impl Question {
    pub fn new(question: &str, options: &[&str], correct_option_index: i64) -> Self {
        let now = DateTime::now();
        Question {
            id: None,
            question: question.trim().to_string(),
            options: options.iter().map(|o| o.to_string()).collect(),
            correct_option_index,
            category: default_category(),
            created_at: Some(now),
            updated_at: Some(now),
        }
    }

    pub fn from_request(request: CreateQuestionRequest) -> Self {
        let now = DateTime::now();
        Question {
            id: None,
            question: request.question.trim().to_string(),
            options: request.options,
            correct_option_index: request.correct_option_index,
            category: request.category.unwrap_or_else(default_category),
            created_at: Some(now),
            updated_at: Some(now),
        }
    }

    /// Applies the fields present in `patch`, leaving the others untouched.
    pub fn apply_update(&mut self, patch: UpdateQuestionRequest) {
        if let Some(question) = patch.question {
            self.question = question.trim().to_string();
        }
        if let Some(options) = patch.options {
            self.options = options;
        }
        if let Some(index) = patch.correct_option_index {
            self.correct_option_index = index;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        self.updated_at = Some(DateTime::now());
    }

    /// Checks the write-time invariants: non-blank text, at least two options and
    /// a correct index that points into `options`.
    pub fn validate_invariants(&self) -> AppResult<()> {
        if self.question.trim().is_empty() {
            return Err(AppError::ValidationError(
                "Question text is required".to_string(),
            ));
        }

        if self.options.len() < 2 {
            return Err(AppError::ValidationError(
                "A question must have at least two options".to_string(),
            ));
        }

        let in_range = usize::try_from(self.correct_option_index)
            .map(|index| index < self.options.len())
            .unwrap_or(false);
        if !in_range {
            return Err(AppError::ValidationError(format!(
                "correctOptionIndex {} is out of range for {} options",
                self.correct_option_index,
                self.options.len()
            )));
        }

        Ok(())
    }

    pub fn id_hex(&self) -> Option<String> {
        self.id.map(|oid| oid.to_hex())
    }
}

use serde::Deserialize;
use serde_json::Value;
use validator::{Validate, ValidationError};

fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank").with_message("Question text is required".into()));
    }
    Ok(())
}

fn validate_create_index(request: &CreateQuestionRequest) -> Result<(), ValidationError> {
    let in_range = usize::try_from(request.correct_option_index)
        .map(|index| index < request.options.len())
        .unwrap_or(false);
    if !in_range {
        return Err(ValidationError::new("correct_option_index_out_of_range")
            .with_message("correctOptionIndex must point into options".into()));
    }
    Ok(())
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_create_index"))]
pub struct CreateQuestionRequest {
    #[validate(custom(function = "validate_not_blank"))]
    pub question: String,

    #[validate(length(min = 2, message = "A question must have at least two options"))]
    pub options: Vec<String>,

    #[validate(range(min = 0, message = "Correct option index must not be negative"))]
    pub correct_option_index: i64,

    pub category: Option<String>,
}

/// Partial update; absent fields keep their stored values. The merged question
/// is checked again before it is written.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateQuestionRequest {
    #[validate(custom(function = "validate_not_blank"))]
    pub question: Option<String>,

    #[validate(length(min = 2, message = "A question must have at least two options"))]
    pub options: Option<Vec<String>>,

    #[validate(range(min = 0, message = "Correct option index must not be negative"))]
    pub correct_option_index: Option<i64>,

    pub category: Option<String>,
}

/// One learner answer. `selected_index` is kept as submitted so that only an
/// exact integer can match the stored index.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmittedAnswer {
    pub question_id: String,
    #[serde(default)]
    pub selected_index: Option<Value>,
}

impl SubmittedAnswer {
    pub fn new(question_id: &str, selected_index: i64) -> Self {
        SubmittedAnswer {
            question_id: question_id.to_string(),
            selected_index: Some(Value::from(selected_index)),
        }
    }
}

use std::{collections::HashSet, sync::Arc};

use mongodb::bson::oid::ObjectId;
use serde_json::Value;
use validator::Validate;

use crate::{
    errors::{AppError, AppResult},
    models::{
        domain::Question,
        dto::{
            request::{CreateQuestionRequest, UpdateQuestionRequest},
            response::{QuestionDto, QuizQuestionDto},
        },
    },
    repositories::QuestionRepository,
    services::scoring::{AnswerKey, ScoreReport, SubmissionScorer},
};

pub struct QuestionService {
    repository: Arc<dyn QuestionRepository>,
    sample_size: i64,
}

impl QuestionService {
    pub fn new(repository: Arc<dyn QuestionRepository>, sample_size: i64) -> Self {
        Self {
            repository,
            sample_size,
        }
    }

    /// Draws a random quiz with the correct answers stripped.
    pub async fn draw_quiz(&self) -> AppResult<Vec<QuizQuestionDto>> {
        let questions = self.repository.sample_random(self.sample_size).await?;
        log::debug!("Drew {} questions for a quiz", questions.len());

        Ok(questions.into_iter().map(QuizQuestionDto::from).collect())
    }

    pub async fn submit(&self, body: Value) -> AppResult<ScoreReport> {
        let answers = SubmissionScorer::parse_submission(body)?;

        // Ids that are not valid ObjectIds can never resolve.
        let ids: Vec<ObjectId> = answers
            .iter()
            .filter_map(|a| ObjectId::parse_str(&a.question_id).ok())
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();

        let resolved = if ids.is_empty() {
            vec![]
        } else {
            self.repository.find_by_ids(&ids).await?
        };

        let key = AnswerKey::from_questions(&resolved);
        let report = SubmissionScorer::score(&answers, &key);

        log::info!(
            "Scored submission: {}/{} ({} answers)",
            report.score,
            report.total_questions,
            report.results.len()
        );
        if report.total_questions < ids.len() {
            log::warn!(
                "{} submitted question ids did not resolve",
                ids.len() - report.total_questions
            );
        }

        Ok(report)
    }

    pub async fn create_question(&self, request: CreateQuestionRequest) -> AppResult<QuestionDto> {
        request.validate()?;

        let question = Question::from_request(request);
        question.validate_invariants()?;

        let created = self.repository.create(question).await?;
        log::info!(
            "Created question {}",
            created.id_hex().unwrap_or_default()
        );

        Ok(created.into())
    }

    pub async fn update_question(
        &self,
        id: &str,
        request: UpdateQuestionRequest,
    ) -> AppResult<QuestionDto> {
        let id = parse_question_id(id)?;
        request.validate()?;

        let mut question = self
            .repository
            .find_by_id(&id)
            .await?
            .ok_or_else(|| question_not_found(&id))?;

        question.apply_update(request);
        question.validate_invariants()?;

        let updated = self.repository.update(&id, question).await?;
        log::info!("Updated question {}", id);

        Ok(updated.into())
    }

    pub async fn delete_question(&self, id: &str) -> AppResult<()> {
        let id = parse_question_id(id)?;

        self.repository.delete(&id).await?;
        log::info!("Deleted question {}", id);

        Ok(())
    }

    pub async fn health_check(&self) -> AppResult<()> {
        self.repository.health_check().await
    }
}

/// A malformed id cannot name a stored question, so it is reported as not found.
fn parse_question_id(id: &str) -> AppResult<ObjectId> {
    ObjectId::parse_str(id)
        .map_err(|_| AppError::NotFound(format!("Question with id '{}' not found", id)))
}

fn question_not_found(id: &ObjectId) -> AppError {
    AppError::NotFound(format!("Question with id '{}' not found", id))
}

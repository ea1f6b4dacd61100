#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use secrecy::SecretString;
use tokio::sync::RwLock;

use quiz_host::{
    app_state::AppState,
    config::Config,
    errors::{AppError, AppResult},
    models::domain::Question,
    repositories::QuestionRepository,
};

/// Question store kept in insertion order; `sample_random` returns the first `size`.
#[derive(Default)]
pub struct InMemoryQuestionRepository {
    questions: Arc<RwLock<Vec<Question>>>,
}

impl InMemoryQuestionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn seed(&self, question: Question) -> Question {
        self.create(question).await.expect("seeding should succeed")
    }

    pub async fn len(&self) -> usize {
        self.questions.read().await.len()
    }
}

#[async_trait]
impl QuestionRepository for InMemoryQuestionRepository {
    async fn sample_random(&self, size: i64) -> AppResult<Vec<Question>> {
        let questions = self.questions.read().await;
        Ok(questions
            .iter()
            .take(size.max(0) as usize)
            .cloned()
            .collect())
    }

    async fn find_by_ids(&self, ids: &[ObjectId]) -> AppResult<Vec<Question>> {
        let questions = self.questions.read().await;
        Ok(questions
            .iter()
            .filter(|q| q.id.map(|id| ids.contains(&id)).unwrap_or(false))
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: &ObjectId) -> AppResult<Option<Question>> {
        let questions = self.questions.read().await;
        Ok(questions.iter().find(|q| q.id.as_ref() == Some(id)).cloned())
    }

    async fn create(&self, question: Question) -> AppResult<Question> {
        let mut questions = self.questions.write().await;
        let created = Question {
            id: Some(question.id.unwrap_or_else(ObjectId::new)),
            ..question
        };
        questions.push(created.clone());
        Ok(created)
    }

    async fn update(&self, id: &ObjectId, question: Question) -> AppResult<Question> {
        let mut questions = self.questions.write().await;
        let slot = questions
            .iter_mut()
            .find(|q| q.id.as_ref() == Some(id))
            .ok_or_else(|| AppError::NotFound(format!("Question with id '{}' not found", id)))?;

        *slot = Question {
            id: Some(*id),
            ..question
        };
        Ok(slot.clone())
    }

    async fn delete(&self, id: &ObjectId) -> AppResult<()> {
        let mut questions = self.questions.write().await;
        let before = questions.len();
        questions.retain(|q| q.id.as_ref() != Some(id));

        if questions.len() == before {
            return Err(AppError::NotFound(format!(
                "Question with id '{}' not found",
                id
            )));
        }
        Ok(())
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        Ok(())
    }

    async fn health_check(&self) -> AppResult<()> {
        Ok(())
    }
}

pub fn test_config() -> Config {
    Config {
        app_env: "test".to_string(),
        mongo_conn_string: "mongodb://localhost:27017".to_string(),
        mongo_db_name: "quiz-host-test".to_string(),
        questions_collection: "questions".to_string(),
        web_server_host: "127.0.0.1".to_string(),
        web_server_port: 5000,
        jwt_secret: SecretString::from("integration_test_secret".to_string()),
        jwt_expiration_hours: 1,
        admin_subject: "test_admin_user_id".to_string(),
        dev_tokens_enabled: true,
        quiz_sample_size: 10,
        cors_allowed_origin: None,
    }
}

pub fn test_state(repository: Arc<InMemoryQuestionRepository>) -> AppState {
    AppState::with_repository(test_config(), repository)
}

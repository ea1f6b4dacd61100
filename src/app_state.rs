use std::sync::Arc;

use crate::{
    auth::JwtService,
    config::Config,
    db::Database,
    errors::AppResult,
    repositories::{MongoQuestionRepository, QuestionRepository},
    services::question_service::QuestionService,
};

#[derive(Clone)]
pub struct AppState {
    pub question_service: Arc<QuestionService>,
    pub jwt_service: Arc<JwtService>,
    pub config: Arc<Config>,
}

impl AppState {
    /// Builds the state on top of an already connected database. The caller owns
    /// `db` and shuts it down.
    pub async fn new(config: Config, db: &Database) -> AppResult<Self> {
        let question_repository = Arc::new(MongoQuestionRepository::new(
            db,
            &config.questions_collection,
        ));
        question_repository.ensure_indexes().await?;

        Ok(Self::with_repository(config, question_repository))
    }

    pub fn with_repository(config: Config, repository: Arc<dyn QuestionRepository>) -> Self {
        let question_service = Arc::new(QuestionService::new(
            repository,
            config.quiz_sample_size,
        ));
        let jwt_service = Arc::new(JwtService::new(
            &config.jwt_secret,
            config.jwt_expiration_hours,
        ));

        Self {
            question_service,
            jwt_service,
            config: Arc::new(config),
        }
    }
}

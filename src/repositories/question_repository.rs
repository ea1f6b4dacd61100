use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{self, doc, oid::ObjectId, Document},
    options::{IndexOptions, ReplaceOptions},
    Collection, IndexModel,
};

use crate::{
    db::Database,
    errors::{AppError, AppResult},
    models::domain::Question,
};

#[cfg(test)]
use mockall::automock;

/// Persistence for the question bank.
///
/// Lookups never fail for ids that are absent: `find_by_ids` simply leaves them
/// out and `find_by_id` returns `None`. Only `update` and `delete` report
/// `AppError::NotFound`.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait QuestionRepository: Send + Sync {
    /// Up to `size` questions in random order.
    async fn sample_random(&self, size: i64) -> AppResult<Vec<Question>>;
    async fn find_by_ids(&self, ids: &[ObjectId]) -> AppResult<Vec<Question>>;
    async fn find_by_id(&self, id: &ObjectId) -> AppResult<Option<Question>>;
    async fn create(&self, question: Question) -> AppResult<Question>;
    async fn update(&self, id: &ObjectId, question: Question) -> AppResult<Question>;
    async fn delete(&self, id: &ObjectId) -> AppResult<()>;
    async fn ensure_indexes(&self) -> AppResult<()>;
    async fn health_check(&self) -> AppResult<()>;
}

pub struct MongoQuestionRepository {
    db: Database,
    collection: Collection<Question>,
}

impl MongoQuestionRepository {
    pub fn new(db: &Database, collection_name: &str) -> Self {
        let collection = db.get_collection(collection_name);
        Self {
            db: db.clone(),
            collection,
        }
    }
}

#[async_trait]
impl QuestionRepository for MongoQuestionRepository {
    async fn sample_random(&self, size: i64) -> AppResult<Vec<Question>> {
        let pipeline = vec![doc! { "$sample": { "size": size } }];

        let documents: Vec<Document> = self
            .collection
            .aggregate(pipeline)
            .await?
            .try_collect()
            .await?;

        let questions = documents
            .into_iter()
            .map(bson::from_document::<Question>)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(questions)
    }

    async fn find_by_ids(&self, ids: &[ObjectId]) -> AppResult<Vec<Question>> {
        if ids.is_empty() {
            return Ok(vec![]);
        }

        let questions = self
            .collection
            .find(doc! { "_id": { "$in": ids.to_vec() } })
            .await?
            .try_collect()
            .await?;
        Ok(questions)
    }

    async fn find_by_id(&self, id: &ObjectId) -> AppResult<Option<Question>> {
        let question = self.collection.find_one(doc! { "_id": *id }).await?;
        Ok(question)
    }

    async fn create(&self, question: Question) -> AppResult<Question> {
        let result = self.collection.insert_one(&question).await?;

        let id = result.inserted_id.as_object_id().ok_or_else(|| {
            AppError::InternalError("Inserted question id is not an ObjectId".to_string())
        })?;

        Ok(Question {
            id: Some(id),
            ..question
        })
    }

    async fn update(&self, id: &ObjectId, question: Question) -> AppResult<Question> {
        let question = Question {
            id: Some(*id),
            ..question
        };
        let options = ReplaceOptions::builder().upsert(false).build();

        let result = self
            .collection
            .replace_one(doc! { "_id": *id }, &question)
            .with_options(options)
            .await?;

        if result.matched_count == 0 {
            return Err(AppError::NotFound(format!(
                "Question with id '{}' not found",
                id
            )));
        }

        Ok(question)
    }

    async fn delete(&self, id: &ObjectId) -> AppResult<()> {
        let result = self.collection.delete_one(doc! { "_id": *id }).await?;

        if result.deleted_count == 0 {
            return Err(AppError::NotFound(format!(
                "Question with id '{}' not found",
                id
            )));
        }

        Ok(())
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!(
            "Creating indexes for questions collection in '{}'",
            self.db.db_name()
        );

        let category_index = IndexModel::builder()
            .keys(doc! { "category": 1 })
            .options(
                IndexOptions::builder()
                    .name("category".to_string())
                    .build(),
            )
            .build();

        self.collection.create_index(category_index).await?;

        log::info!("Successfully created indexes for questions collection");
        Ok(())
    }

    async fn health_check(&self) -> AppResult<()> {
        self.db.health_check().await
    }
}

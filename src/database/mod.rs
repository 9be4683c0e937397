pub mod manager;
pub mod models;
pub mod query;
pub mod questions;
pub mod tags;
pub mod users;

use async_trait::async_trait;

use crate::database::manager::DatabaseError;
use crate::database::models::{Question, QuestionRow, Tag};
use crate::database::query::QuestionQuery;

/// Fields for a question about to be persisted. Tags are already resolved
/// to rows and arrive in the order the caller supplied them.
#[derive(Debug, Clone)]
pub struct NewQuestion {
    pub title: String,
    pub description: String,
    pub user_id: i64,
    pub tags: Vec<Tag>,
}

/// Persistence capability for questions. The service depends on this trait;
/// `questions::PgQuestionStore` is the production implementation.
#[async_trait]
pub trait QuestionStore: Send + Sync {
    /// Flat lookup used for the duplicate-title check.
    async fn find_by_title(&self, title: &str) -> Result<Option<QuestionRow>, DatabaseError>;

    /// Run a declarative listing query, returning hydrated questions.
    async fn select(&self, query: QuestionQuery) -> Result<Vec<Question>, DatabaseError>;

    /// Fetch one question fully hydrated (user, tags, answers with authors).
    async fn find_one(&self, id: i64) -> Result<Option<Question>, DatabaseError>;

    /// Insert a question and its tag links, returning the stored question.
    async fn insert(&self, new: NewQuestion) -> Result<Question, DatabaseError>;
}

/// Persistence capability for tags.
#[async_trait]
pub trait TagStore: Send + Sync {
    async fn find_by_name(&self, name: &str) -> Result<Option<Tag>, DatabaseError>;

    async fn insert(&self, name: &str) -> Result<Tag, DatabaseError>;
}

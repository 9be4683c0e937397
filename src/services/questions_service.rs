use std::sync::Arc;

use crate::auth::{AuthError, TokenReader};
use crate::database::manager::DatabaseError;
use crate::database::models::{Question, Tag};
use crate::database::query::QuestionQuery;
use crate::database::{NewQuestion, QuestionStore, TagStore};
use crate::types::{CreateQuestionInput, SearchInput};

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    NotFound(String),
    #[error("Missing bearer token")]
    MissingToken,
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error(transparent)]
    Database(#[from] DatabaseError),
}

/// Question management service. Stateless: every call stands alone, and all
/// persistence and token decoding goes through the injected collaborators.
pub struct QuestionsService {
    questions: Arc<dyn QuestionStore>,
    tags: Arc<dyn TagStore>,
    token_reader: Arc<dyn TokenReader>,
}

impl QuestionsService {
    pub fn new(
        questions: Arc<dyn QuestionStore>,
        tags: Arc<dyn TagStore>,
        token_reader: Arc<dyn TokenReader>,
    ) -> Self {
        Self { questions, tags, token_reader }
    }

    /// Create a question owned by the token's user. Fails with `Conflict`
    /// before any write when the title is already taken. Tag names are
    /// resolved to existing rows where possible, inserted otherwise, and the
    /// resulting tag set keeps the input order.
    pub async fn create(&self, input: CreateQuestionInput, token: &str) -> Result<Question, ServiceError> {
        let claims = self.token_reader.decode(token)?;

        if self.questions.find_by_title(&input.title).await?.is_some() {
            return Err(ServiceError::Conflict(format!(
                "Question '{}' already exists",
                input.title
            )));
        }

        let mut tags: Vec<Tag> = Vec::with_capacity(input.tags.len());
        for tag_input in &input.tags {
            let tag = match self.tags.find_by_name(&tag_input.tag_name).await? {
                Some(existing) => existing,
                None => self.tags.insert(&tag_input.tag_name).await?,
            };
            tags.push(tag);
        }

        let question = self
            .questions
            .insert(NewQuestion {
                title: input.title,
                description: input.description,
                user_id: claims.id,
                tags,
            })
            .await?;

        tracing::info!(question_id = question.id, user_id = claims.id, "created question");
        Ok(question)
    }

    /// List questions. The populated search field picks the branch: tag
    /// filter (match-any), caller's own questions, or everything. All
    /// branches return hydrated questions ordered newest-first.
    pub async fn find_all(
        &self,
        token: Option<&str>,
        search: Option<SearchInput>,
    ) -> Result<Vec<Question>, ServiceError> {
        let search = search.unwrap_or_default();

        if let Some(tag_ids) = search.filter_tag_ids.filter(|ids| !ids.is_empty()) {
            return Ok(self.questions.select(QuestionQuery::tags_any(tag_ids)).await?);
        }

        if search.only_mine.unwrap_or(false) {
            let token = token.ok_or(ServiceError::MissingToken)?;
            let claims = self.token_reader.decode(token)?;
            return Ok(self.questions.select(QuestionQuery::owned_by(claims.id)).await?);
        }

        Ok(self.questions.select(QuestionQuery::all()).await?)
    }

    /// Fetch one question fully hydrated, or fail with `NotFound`.
    pub async fn find_one(&self, id: i64) -> Result<Question, ServiceError> {
        self.questions
            .find_one(id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Question {} not found", id)))
    }
}

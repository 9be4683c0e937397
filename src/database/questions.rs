use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::{FromRow, PgPool};

use crate::database::manager::{DatabaseError, DatabaseManager};
use crate::database::models::{Answer, AnswerRow, Question, QuestionRow, Tag, UserAuth};
use crate::database::query::{QuestionFilter, QuestionQuery};
use crate::database::{NewQuestion, QuestionStore};

/// Postgres-backed question store. Listing queries run in two phases: fetch
/// the flat question rows, then batch-load tags, users, and answers for the
/// whole result set.
pub struct PgQuestionStore {
    pool: PgPool,
}

/// One row of the question->tag join, keyed back to its question.
#[derive(Debug, FromRow)]
struct TagLink {
    question_id: i64,
    id: i64,
    tag_name: String,
}

impl PgQuestionStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn from_env() -> Result<Self, DatabaseError> {
        Ok(Self::new(DatabaseManager::pool().await?))
    }

    /// Attach tags, authors, and answers (with their authors) to flat rows.
    async fn hydrate(&self, rows: Vec<QuestionRow>) -> Result<Vec<Question>, DatabaseError> {
        if rows.is_empty() {
            return Ok(vec![]);
        }

        let question_ids: Vec<i64> = rows.iter().map(|r| r.id).collect();

        let tag_links = sqlx::query_as::<_, TagLink>(
            "SELECT qt.question_id, t.id, t.tag_name
             FROM question_tags qt
             INNER JOIN tags t ON t.id = qt.tag_id
             WHERE qt.question_id = ANY($1)
             ORDER BY qt.question_id, qt.position",
        )
        .bind(&question_ids)
        .fetch_all(&self.pool)
        .await?;

        let answer_rows = sqlx::query_as::<_, AnswerRow>(
            "SELECT id, content, creation_date, user_id, question_id
             FROM answers
             WHERE question_id = ANY($1)
             ORDER BY creation_date",
        )
        .bind(&question_ids)
        .fetch_all(&self.pool)
        .await?;

        // Authors of both the questions and their answers, in one fetch
        let mut user_ids: Vec<i64> = rows.iter().map(|r| r.user_id).collect();
        user_ids.extend(answer_rows.iter().map(|a| a.user_id));
        user_ids.sort_unstable();
        user_ids.dedup();

        let users = sqlx::query_as::<_, UserAuth>(
            "SELECT id, name FROM user_auth WHERE id = ANY($1)",
        )
        .bind(&user_ids)
        .fetch_all(&self.pool)
        .await?;
        let users: HashMap<i64, UserAuth> = users.into_iter().map(|u| (u.id, u)).collect();

        let mut tags_by_question: HashMap<i64, Vec<Tag>> = HashMap::new();
        for link in tag_links {
            tags_by_question
                .entry(link.question_id)
                .or_default()
                .push(Tag { id: link.id, tag_name: link.tag_name });
        }

        let mut answers_by_question: HashMap<i64, Vec<Answer>> = HashMap::new();
        for row in answer_rows {
            let user = users.get(&row.user_id).cloned();
            answers_by_question
                .entry(row.question_id)
                .or_default()
                .push(Answer::from_row(row, user));
        }

        Ok(rows
            .into_iter()
            .map(|row| {
                let user = users.get(&row.user_id).cloned();
                let tags = tags_by_question.remove(&row.id).unwrap_or_default();
                let answers = answers_by_question.remove(&row.id).unwrap_or_default();
                Question::from_row(row, user, tags, answers)
            })
            .collect())
    }
}

#[async_trait]
impl QuestionStore for PgQuestionStore {
    async fn find_by_title(&self, title: &str) -> Result<Option<QuestionRow>, DatabaseError> {
        let row = sqlx::query_as::<_, QuestionRow>(
            "SELECT id, title, description, creation_date, user_id
             FROM questions
             WHERE title = $1",
        )
        .bind(title)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn select(&self, query: QuestionQuery) -> Result<Vec<Question>, DatabaseError> {
        let sql = query.to_sql();

        let rows = match &query.filter {
            QuestionFilter::All => {
                sqlx::query_as::<_, QuestionRow>(&sql).fetch_all(&self.pool).await?
            }
            QuestionFilter::TagsAny(tag_ids) => {
                sqlx::query_as::<_, QuestionRow>(&sql)
                    .bind(tag_ids)
                    .fetch_all(&self.pool)
                    .await?
            }
            QuestionFilter::OwnedBy(user_id) => {
                sqlx::query_as::<_, QuestionRow>(&sql)
                    .bind(user_id)
                    .fetch_all(&self.pool)
                    .await?
            }
        };

        self.hydrate(rows).await
    }

    async fn find_one(&self, id: i64) -> Result<Option<Question>, DatabaseError> {
        let row = sqlx::query_as::<_, QuestionRow>(
            "SELECT id, title, description, creation_date, user_id
             FROM questions
             WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        Ok(self.hydrate(vec![row]).await?.into_iter().next())
    }

    async fn insert(&self, new: NewQuestion) -> Result<Question, DatabaseError> {
        let row = sqlx::query_as::<_, QuestionRow>(
            "INSERT INTO questions (title, description, user_id)
             VALUES ($1, $2, $3)
             RETURNING id, title, description, creation_date, user_id",
        )
        .bind(&new.title)
        .bind(&new.description)
        .bind(new.user_id)
        .fetch_one(&self.pool)
        .await?;

        for (position, tag) in new.tags.iter().enumerate() {
            sqlx::query(
                "INSERT INTO question_tags (question_id, tag_id, position)
                 VALUES ($1, $2, $3)
                 ON CONFLICT (question_id, tag_id) DO NOTHING",
            )
            .bind(row.id)
            .bind(tag.id)
            .bind(position as i32)
            .execute(&self.pool)
            .await?;
        }

        let user = sqlx::query_as::<_, UserAuth>(
            "SELECT id, name FROM user_auth WHERE id = $1",
        )
        .bind(row.user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(Question::from_row(row, user, new.tags, vec![]))
    }
}

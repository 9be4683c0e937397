use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::answer::Answer;
use super::tag::Tag;
use super::user_auth::UserAuth;

/// Flat question row as stored, before related entities are attached.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct QuestionRow {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub creation_date: DateTime<Utc>,
    pub user_id: i64,
}

/// Question hydrated with its author, tags, and answers. List and detail
/// responses always return this shape; nothing is lazily fetched later.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub creation_date: DateTime<Utc>,
    pub user_id: i64,
    pub user: Option<UserAuth>,
    pub tags: Vec<Tag>,
    pub answers: Vec<Answer>,
}

impl Question {
    pub fn from_row(row: QuestionRow, user: Option<UserAuth>, tags: Vec<Tag>, answers: Vec<Answer>) -> Self {
        Self {
            id: row.id,
            title: row.title,
            description: row.description,
            creation_date: row.creation_date,
            user_id: row.user_id,
            user,
            tags,
            answers,
        }
    }
}

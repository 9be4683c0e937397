use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::user_auth::UserAuth;

/// Flat answer row as stored.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AnswerRow {
    pub id: i64,
    pub content: String,
    pub creation_date: DateTime<Utc>,
    pub user_id: i64,
    pub question_id: i64,
}

/// Answer hydrated with its author.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Answer {
    pub id: i64,
    pub content: String,
    pub creation_date: DateTime<Utc>,
    pub user_id: i64,
    pub question_id: i64,
    pub user: Option<UserAuth>,
}

impl Answer {
    pub fn from_row(row: AnswerRow, user: Option<UserAuth>) -> Self {
        Self {
            id: row.id,
            content: row.content,
            creation_date: row.creation_date,
            user_id: row.user_id,
            question_id: row.question_id,
            user,
        }
    }
}

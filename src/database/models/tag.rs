use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Tag names are unique; creating a question with an existing name reuses
/// the row instead of inserting a duplicate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Tag {
    pub id: i64,
    pub tag_name: String,
}

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Account row. Questions and answers hold a back-reference to their author;
/// the forum never cascades ownership through it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct UserAuth {
    pub id: i64,
    pub name: String,
}

/// Shared request types used across the codebase

use serde::{Deserialize, Serialize};

/// Body for creating a question. Tag order is meaningful and preserved.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateQuestionInput {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub tags: Vec<CreateTagInput>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTagInput {
    pub tag_name: String,
}

/// Listing scope. The populated field selects the query branch; the two
/// filters are distinct paths, never combined in one query.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchInput {
    pub filter_tag_ids: Option<Vec<i64>>,
    pub only_mine: Option<bool>,
}

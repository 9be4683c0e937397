use std::sync::Arc;

use axum::{
    extract::{Path, Query},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::json;

use crate::auth::JwtTokenReader;
use crate::database::questions::PgQuestionStore;
use crate::database::tags::PgTagStore;
use crate::error::ApiError;
use crate::services::questions_service::QuestionsService;
use crate::types::{CreateQuestionInput, SearchInput};

/// Wire the service to its production collaborators for one request
async fn service() -> Result<QuestionsService, ApiError> {
    let questions = PgQuestionStore::from_env().await?;
    let tags = PgTagStore::from_env().await?;
    Ok(QuestionsService::new(
        Arc::new(questions),
        Arc::new(tags),
        Arc::new(JwtTokenReader),
    ))
}

/// Raw Authorization header value; the token reader strips the Bearer prefix.
/// Header name lookup is case-insensitive, so one get covers every casing.
fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string())
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// Comma-separated tag ids, e.g. `filter_tag_ids=1,2`
    pub filter_tag_ids: Option<String>,
    pub only_mine: Option<bool>,
}

impl ListQuery {
    fn into_search_input(self) -> Result<Option<SearchInput>, ApiError> {
        if self.filter_tag_ids.is_none() && self.only_mine.is_none() {
            return Ok(None);
        }

        let filter_tag_ids = match self.filter_tag_ids.as_deref() {
            None | Some("") => None,
            Some(raw) => Some(
                raw.split(',')
                    .map(|part| part.trim().parse::<i64>())
                    .collect::<Result<Vec<i64>, _>>()
                    .map_err(|_| {
                        ApiError::bad_request("filter_tag_ids must be a comma-separated list of numeric ids")
                    })?,
            ),
        };

        Ok(Some(SearchInput { filter_tag_ids, only_mine: self.only_mine }))
    }
}

/// GET /api/questions - list questions, optionally scoped by tag filter or owner
pub async fn questions_get(
    headers: HeaderMap,
    Query(query): Query<ListQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let search = query.into_search_input()?;
    let token = bearer_token(&headers);

    let questions = service().await?.find_all(token.as_deref(), search).await?;

    Ok(Json(json!({ "success": true, "data": questions })))
}

/// POST /api/questions - create a question owned by the token's user
pub async fn questions_post(
    headers: HeaderMap,
    Json(input): Json<CreateQuestionInput>,
) -> Result<impl IntoResponse, ApiError> {
    let token = bearer_token(&headers)
        .ok_or_else(|| ApiError::unauthorized("Missing Authorization header"))?;

    let question = service().await?.create(input, &token).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "data": question })),
    ))
}

/// GET /api/questions/:id - show one question with user, tags, and answers
pub async fn question_get(Path(id): Path<i64>) -> Result<impl IntoResponse, ApiError> {
    let question = service().await?.find_one(id).await?;

    Ok(Json(json!({ "success": true, "data": question })))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list_query(filter: Option<&str>, only_mine: Option<bool>) -> ListQuery {
        ListQuery { filter_tag_ids: filter.map(|s| s.to_string()), only_mine }
    }

    #[test]
    fn parses_comma_separated_tag_ids() {
        let search = list_query(Some("1, 2,3"), None).into_search_input().unwrap().unwrap();
        assert_eq!(search.filter_tag_ids, Some(vec![1, 2, 3]));
    }

    #[test]
    fn no_params_means_no_search_input() {
        assert!(list_query(None, None).into_search_input().unwrap().is_none());
    }

    #[test]
    fn rejects_non_numeric_tag_ids() {
        let err = list_query(Some("1,abc"), None).into_search_input().unwrap_err();
        assert_eq!(err.status_code(), 400);
    }

    #[test]
    fn bearer_token_lookup_ignores_header_casing() {
        let mut headers = HeaderMap::new();
        headers.insert(
            axum::http::header::AUTHORIZATION,
            axum::http::HeaderValue::from_static("Bearer abc.def.ghi"),
        );

        // HeaderMap name lookup is case-insensitive
        assert!(headers.get("Authorization").is_some());
        assert_eq!(bearer_token(&headers), Some("Bearer abc.def.ghi".to_string()));
    }

    #[test]
    fn empty_filter_string_clears_the_filter() {
        let search = list_query(Some(""), Some(true)).into_search_input().unwrap().unwrap();
        assert_eq!(search.filter_tag_ids, None);
        assert_eq!(search.only_mine, Some(true));
    }
}

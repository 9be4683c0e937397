use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::Deserialize;
use serde_json::json;

use crate::auth::{generate_jwt, Claims};
use crate::config;
use crate::database::users;
use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub name: String,
}

/// POST /auth/register - create an account and issue a token
pub async fn register_post(Json(body): Json<RegisterRequest>) -> Result<impl IntoResponse, ApiError> {
    let name = body.name.trim();
    if name.is_empty() {
        return Err(ApiError::bad_request("name is required"));
    }

    if users::find_user_by_name(name).await?.is_some() {
        return Err(ApiError::conflict(format!("User '{}' already exists", name)));
    }

    let user = users::insert_user(name).await?;
    let token = generate_jwt(&Claims::new(user.id, user.name.clone()))?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "data": {
                "token": token,
                "user": user,
                "expires_in": config::config().security.jwt_expiry_hours * 3600
            }
        })),
    ))
}

/// POST /auth/login - issue a token for an existing account
pub async fn login_post(Json(body): Json<LoginRequest>) -> Result<impl IntoResponse, ApiError> {
    let user = users::find_user_by_name(body.name.trim())
        .await?
        .ok_or_else(|| ApiError::unauthorized("Unknown user"))?;

    let token = generate_jwt(&Claims::new(user.id, user.name.clone()))?;

    Ok(Json(json!({
        "success": true,
        "data": {
            "token": token,
            "user": user,
            "expires_in": config::config().security.jwt_expiry_hours * 3600
        }
    })))
}

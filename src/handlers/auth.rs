use std::sync::Arc;

use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use serde::Deserialize;

use crate::errors::AppError;
use crate::handlers::extract::ApiJson;
use crate::models::User;
use crate::state::AppState;

pub const USER_ID_HEADER: &str = "x-user-id";

/// Resolves the caller from the `X-User-Id` header.
pub fn current_user(headers: &HeaderMap, state: &AppState) -> Result<User, AppError> {
    let id = headers
        .get(USER_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<i64>().ok())
        .ok_or(AppError::Unauthorized)?;

    state.users.get(id).cloned().ok_or(AppError::Unauthorized)
}

// POST /api/login
#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    ApiJson(body): ApiJson<LoginRequest>,
) -> Result<Json<User>, AppError> {
    let user = state
        .users
        .login(&body.email, &body.password)
        .cloned()
        .ok_or(AppError::Unauthorized)?;

    tracing::info!(user_id = user.id, role = user.role.as_str(), "user logged in");
    Ok(Json(user))
}

use std::sync::Arc;

use axum::{
    extract::{Extension, Path, State},
    Json,
};
use serde_json::{json, Map, Value};
use tracing::debug;

use shared_config::AppConfig;
use shared_models::auth::Claim;
use shared_models::error::AppError;
use shared_utils::jwt::issue_token;

use crate::models::User;
use crate::services::account::AccountService;

#[axum::debug_handler]
pub async fn list_users(
    State(state): State<Arc<AppConfig>>,
    Extension(_claim): Extension<Claim>,
) -> Result<Json<Vec<User>>, AppError> {
    let accounts = AccountService::new(&state);

    let users = accounts
        .list_users()
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

    Ok(Json(users))
}

#[axum::debug_handler]
pub async fn check_admin(
    State(state): State<Arc<AppConfig>>,
    Path(email): Path<String>,
) -> Result<Json<Value>, AppError> {
    let accounts = AccountService::new(&state);

    let admin = accounts
        .is_admin(&email)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

    Ok(Json(json!({ "admin": admin })))
}

#[axum::debug_handler]
pub async fn promote_admin(
    State(state): State<Arc<AppConfig>>,
    Path(email): Path<String>,
    Extension(claim): Extension<Claim>,
) -> Result<Json<Value>, AppError> {
    let accounts = AccountService::new(&state);

    let requester_is_admin = accounts
        .is_admin(&claim.email)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

    if !requester_is_admin {
        debug!("Rejected promotion of {} requested by {}", email, claim.email);
        return Err(AppError::Forbidden("forbidden".to_string()));
    }

    let result = accounts
        .grant_admin(&email)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

    Ok(Json(result))
}

#[axum::debug_handler]
pub async fn upsert_user(
    State(state): State<Arc<AppConfig>>,
    Path(email): Path<String>,
    Json(profile): Json<Value>,
) -> Result<Json<Value>, AppError> {
    let profile = match profile {
        Value::Object(fields) => fields,
        Value::Null => Map::new(),
        _ => return Err(AppError::BadRequest("User profile must be a JSON object".to_string())),
    };

    let accounts = AccountService::new(&state);

    let result = accounts
        .upsert_user(&email, profile)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

    let token = issue_token(&email, &state.jwt_secret).map_err(AppError::Internal)?;

    Ok(Json(json!({ "result": result, "token": token })))
}

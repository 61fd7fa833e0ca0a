use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::Response,
};

use shared_config::AppConfig;
use shared_models::error::AppError;

use crate::jwt::validate_token;

/// Bearer-token gate for protected routes. A missing header is
/// unauthenticated (401); a header that is present but does not carry a
/// verifiable token is forbidden (403). On success the decoded claim is
/// attached to the request extensions.
pub async fn auth_middleware(
    State(config): State<Arc<AppConfig>>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = request
        .headers()
        .get("Authorization")
        .ok_or_else(|| AppError::Auth("Missing authorization header".to_string()))?;

    let auth_value = auth_header
        .to_str()
        .map_err(|_| AppError::Forbidden("Invalid authorization header format".to_string()))?;

    let token = auth_value
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::Forbidden("Invalid authorization header format".to_string()))?;

    let claim = validate_token(token, &config.jwt_secret)
        .map_err(AppError::Forbidden)?;

    request.extensions_mut().insert(claim);

    Ok(next.run(request).await)
}

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, put},
    middleware,
};

use shared_config::AppConfig;
use shared_utils::extractor::auth_middleware;

use crate::handlers;

pub fn user_routes(state: Arc<AppConfig>) -> Router {
    // Public routes (no authentication required)
    let public_routes = Router::new()
        .route("/admin/{email}", get(handlers::check_admin))
        .route("/user/{email}", put(handlers::upsert_user));

    // Protected routes (authentication required)
    let protected_routes = Router::new()
        .route("/user", get(handlers::list_users))
        .route("/user/admin/{email}", put(handlers::promote_admin))
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .with_state(state)
}

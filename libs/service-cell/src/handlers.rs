use std::sync::Arc;

use axum::{extract::State, Json};

use shared_config::AppConfig;
use shared_models::error::AppError;

use crate::models::Service;
use crate::services::catalog::CatalogService;

pub async fn list_services(
    State(state): State<Arc<AppConfig>>,
) -> Result<Json<Vec<Service>>, AppError> {
    let catalog = CatalogService::new(&state);

    let services = catalog
        .list_services()
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

    Ok(Json(services))
}

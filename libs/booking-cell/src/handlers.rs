use std::sync::Arc;

use axum::{
    extract::{Extension, Query, State},
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

use service_cell::models::Service;
use shared_config::AppConfig;
use shared_models::auth::Claim;
use shared_models::error::AppError;

use crate::models::{Booking, BookingOutcome};
use crate::services::availability::AvailabilityService;
use crate::services::booking::BookingService;

#[derive(Debug, Deserialize)]
pub struct AvailabilityQuery {
    pub date: NaiveDate,
}

#[derive(Debug, Deserialize)]
pub struct PatientQuery {
    pub patient: String,
}

#[axum::debug_handler]
pub async fn get_availability(
    State(state): State<Arc<AppConfig>>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<Json<Vec<Service>>, AppError> {
    let availability = AvailabilityService::new(&state);

    let services = availability
        .open_slots_for_date(query.date)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

    Ok(Json(services))
}

#[axum::debug_handler]
pub async fn list_patient_bookings(
    State(state): State<Arc<AppConfig>>,
    Query(query): Query<PatientQuery>,
    Extension(claim): Extension<Claim>,
) -> Result<Json<Vec<Booking>>, AppError> {
    // Self-access only, admins included.
    if claim.email != query.patient {
        debug!(
            "Rejected booking listing for {} requested by {}",
            query.patient, claim.email
        );
        return Err(AppError::Forbidden("forbidden access".to_string()));
    }

    let bookings = BookingService::new(&state)
        .bookings_for_patient(&query.patient)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

    Ok(Json(bookings))
}

#[axum::debug_handler]
pub async fn create_booking(
    State(state): State<Arc<AppConfig>>,
    Json(booking): Json<Booking>,
) -> Result<Json<Value>, AppError> {
    let outcome = BookingService::new(&state)
        .create_booking(booking)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

    let response = match outcome {
        BookingOutcome::Duplicate(existing) => json!({ "success": false, "booking": existing }),
        BookingOutcome::Created(result) => json!({ "success": true, "result": result }),
    };

    Ok(Json(response))
}

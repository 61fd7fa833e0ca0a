use std::sync::Arc;

use axum::{
    extract::{Extension, Query, State},
    Json,
};
use assert_matches::assert_matches;
use chrono::NaiveDate;
use serde_json::json;
use wiremock::{MockServer, Mock, ResponseTemplate};
use wiremock::matchers::{method, path, query_param};

use booking_cell::handlers::{
    create_booking, get_availability, list_patient_bookings,
    AvailabilityQuery, PatientQuery,
};
use shared_models::auth::Claim;
use shared_models::error::AppError;
use shared_utils::test_utils::{MockStoreRows, TestConfig};

fn claim(email: &str) -> Extension<Claim> {
    Extension(Claim { email: email.to_string() })
}

fn date(value: &str) -> NaiveDate {
    value.parse().unwrap()
}

#[tokio::test]
async fn availability_subtracts_booked_slots_per_service() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/services"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            MockStoreRows::service_row("Cleaning", &["9am", "10am", "11am"]),
            MockStoreRows::service_row("Whitening", &["1pm", "2pm"]),
        ])))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/bookings"))
        .and(query_param("date", "eq.2024-01-01"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            MockStoreRows::booking_row("Cleaning", "2024-01-01", "a@x.com", "10am"),
        ])))
        .mount(&mock_server)
        .await;

    let config = TestConfig::with_store_url(&mock_server.uri());

    let services = get_availability(
        State(Arc::new(config)),
        Query(AvailabilityQuery { date: date("2024-01-01") }),
    )
    .await
    .unwrap()
    .0;

    assert_eq!(services[0].name, "Cleaning");
    assert_eq!(services[0].slots, vec!["9am", "11am"]);
    assert_eq!(services[1].slots, vec!["1pm", "2pm"]);
}

#[tokio::test]
async fn availability_on_a_quiet_date_returns_full_slot_lists() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/services"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            MockStoreRows::service_row("Cleaning", &["9am", "10am", "11am"]),
        ])))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/bookings"))
        .and(query_param("date", "eq.2024-06-15"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&mock_server)
        .await;

    let config = TestConfig::with_store_url(&mock_server.uri());

    let services = get_availability(
        State(Arc::new(config)),
        Query(AvailabilityQuery { date: date("2024-06-15") }),
    )
    .await
    .unwrap()
    .0;

    assert_eq!(services[0].slots, vec!["9am", "10am", "11am"]);
}

#[tokio::test]
async fn new_booking_is_inserted() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/bookings"))
        .and(query_param("treatment", "eq.Cleaning"))
        .and(query_param("date", "eq.2024-01-01"))
        .and(query_param("patient", "eq.a@x.com"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/bookings"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([
            MockStoreRows::booking_row("Cleaning", "2024-01-01", "a@x.com", "10am"),
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = TestConfig::with_store_url(&mock_server.uri());

    let response = create_booking(
        State(Arc::new(config)),
        Json(serde_json::from_value(json!({
            "treatment": "Cleaning",
            "date": "2024-01-01",
            "patient": "a@x.com",
            "slot": "10am"
        })).unwrap()),
    )
    .await
    .unwrap()
    .0;

    assert_eq!(response["success"], true);
    assert_eq!(response["result"][0]["slot"], "10am");
}

#[tokio::test]
async fn duplicate_booking_returns_the_existing_one_and_writes_nothing() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/bookings"))
        .and(query_param("treatment", "eq.Cleaning"))
        .and(query_param("date", "eq.2024-01-01"))
        .and(query_param("patient", "eq.a@x.com"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            MockStoreRows::booking_row("Cleaning", "2024-01-01", "a@x.com", "10am"),
        ])))
        .mount(&mock_server)
        .await;

    // The insert must never happen on the second attempt.
    Mock::given(method("POST"))
        .and(path("/rest/v1/bookings"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([])))
        .expect(0)
        .mount(&mock_server)
        .await;

    let config = TestConfig::with_store_url(&mock_server.uri());

    let response = create_booking(
        State(Arc::new(config)),
        Json(serde_json::from_value(json!({
            "treatment": "Cleaning",
            "date": "2024-01-01",
            "patient": "a@x.com",
            "slot": "10am"
        })).unwrap()),
    )
    .await
    .unwrap()
    .0;

    assert_eq!(response["success"], false);
    assert_eq!(response["booking"]["patient"], "a@x.com");
    assert_eq!(response["booking"]["treatment"], "Cleaning");
}

#[tokio::test]
async fn patients_see_their_own_bookings() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/bookings"))
        .and(query_param("patient", "eq.a@x.com"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            MockStoreRows::booking_row("Cleaning", "2024-01-01", "a@x.com", "10am"),
            MockStoreRows::booking_row("Whitening", "2024-01-02", "a@x.com", "1pm"),
        ])))
        .mount(&mock_server)
        .await;

    let config = TestConfig::with_store_url(&mock_server.uri());

    let bookings = list_patient_bookings(
        State(Arc::new(config)),
        Query(PatientQuery { patient: "a@x.com".to_string() }),
        claim("a@x.com"),
    )
    .await
    .unwrap()
    .0;

    assert_eq!(bookings.len(), 2);
    assert!(bookings.iter().all(|b| b.patient == "a@x.com"));
}

#[tokio::test]
async fn cross_patient_listing_is_forbidden_with_nothing_disclosed() {
    // No store mock mounted: a forbidden request must not even reach the
    // store, let alone return records.
    let config = TestConfig::with_store_url("http://127.0.0.1:1");

    let result = list_patient_bookings(
        State(Arc::new(config)),
        Query(PatientQuery { patient: "a@x.com".to_string() }),
        claim("b@x.com"),
    )
    .await;

    assert_matches!(result, Err(AppError::Forbidden(_)));
}

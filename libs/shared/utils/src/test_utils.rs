use std::sync::Arc;
use chrono::{Duration, Utc};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use base64::{Engine as _, engine::general_purpose};
use serde_json::{json, Value};
use uuid::Uuid;

use shared_config::AppConfig;

pub struct TestConfig {
    pub jwt_secret: String,
    pub database_url: String,
    pub database_api_key: String,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            jwt_secret: "test-secret-key-for-jwt-validation-must-be-long-enough".to_string(),
            database_url: "http://localhost:54321".to_string(),
            database_api_key: "test-api-key".to_string(),
        }
    }
}

impl TestConfig {
    pub fn to_app_config(&self) -> AppConfig {
        AppConfig {
            database_url: self.database_url.clone(),
            database_api_key: self.database_api_key.clone(),
            jwt_secret: self.jwt_secret.clone(),
            port: 5000,
        }
    }

    pub fn to_arc(&self) -> Arc<AppConfig> {
        Arc::new(self.to_app_config())
    }

    /// Config pointed at a mock store, for wiremock-backed tests.
    pub fn with_store_url(url: &str) -> AppConfig {
        let mut config = Self::default();
        config.database_url = url.to_string();
        config.to_app_config()
    }
}

pub struct JwtTestUtils;

impl JwtTestUtils {
    pub fn create_test_token(email: &str, secret: &str, exp_hours: Option<i64>) -> String {
        let now = Utc::now();
        let exp = now + Duration::hours(exp_hours.unwrap_or(24));

        let payload = json!({
            "email": email,
            "iat": now.timestamp(),
            "exp": exp.timestamp()
        });

        Self::sign_payload(payload, secret)
    }

    pub fn create_token_without_expiry(email: &str, secret: &str) -> String {
        Self::sign_payload(json!({ "email": email }), secret)
    }

    pub fn create_expired_token(email: &str, secret: &str) -> String {
        Self::create_test_token(email, secret, Some(-1))
    }

    pub fn create_invalid_signature_token(email: &str) -> String {
        Self::create_test_token(email, "wrong-secret", Some(24))
    }

    pub fn create_malformed_token() -> String {
        "invalid.token.format".to_string()
    }

    fn sign_payload(payload: Value, secret: &str) -> String {
        let header = json!({
            "alg": "HS256",
            "typ": "JWT"
        });

        let header_encoded = general_purpose::URL_SAFE_NO_PAD.encode(header.to_string());
        let payload_encoded = general_purpose::URL_SAFE_NO_PAD.encode(payload.to_string());

        let signing_input = format!("{}.{}", header_encoded, payload_encoded);

        let mut mac = Hmac::<Sha256>::new_from_slice(secret.as_bytes())
            .expect("HMAC can take key of any size");
        mac.update(signing_input.as_bytes());
        let signature = mac.finalize().into_bytes();
        let signature_encoded = general_purpose::URL_SAFE_NO_PAD.encode(signature);

        format!("{}.{}", signing_input, signature_encoded)
    }
}

/// Canned store rows for wiremock responses.
pub struct MockStoreRows;

impl MockStoreRows {
    pub fn service_row(name: &str, slots: &[&str]) -> Value {
        json!({
            "id": Uuid::new_v4(),
            "name": name,
            "slots": slots
        })
    }

    pub fn booking_row(treatment: &str, date: &str, patient: &str, slot: &str) -> Value {
        json!({
            "id": Uuid::new_v4(),
            "treatment": treatment,
            "date": date,
            "patient": patient,
            "slot": slot
        })
    }

    pub fn user_row(email: &str, role: Option<&str>) -> Value {
        json!({
            "id": Uuid::new_v4(),
            "email": email,
            "role": role
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_creation() {
        let config = TestConfig::default();
        let app_config = config.to_app_config();

        assert_eq!(app_config.database_url, "http://localhost:54321");
        assert_eq!(app_config.database_api_key, "test-api-key");
        assert!(!app_config.jwt_secret.is_empty());
        assert!(app_config.is_configured());
    }

    #[test]
    fn test_token_has_jwt_shape() {
        let token = JwtTestUtils::create_test_token("test@example.com", "test-secret", Some(1));

        assert!(token.contains('.'));
        assert_eq!(token.split('.').count(), 3);
    }

    #[test]
    fn user_row_carries_optional_role() {
        let with_role = MockStoreRows::user_row("boss@example.com", Some("admin"));
        assert_eq!(with_role["role"], "admin");

        let without_role = MockStoreRows::user_row("new@example.com", None);
        assert!(without_role["role"].is_null());
    }
}

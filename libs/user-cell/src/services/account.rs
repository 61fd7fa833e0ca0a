use anyhow::Result;
use serde_json::{json, Map, Value};
use tracing::debug;

use shared_config::AppConfig;
use shared_database::store::StoreClient;

use crate::models::User;

pub struct AccountService {
    store: StoreClient,
}

impl AccountService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            store: StoreClient::new(config),
        }
    }

    pub async fn list_users(&self) -> Result<Vec<User>> {
        self.store.find("users", &[]).await
    }

    /// True iff a record exists for `email` and it carries the admin role.
    /// A missing record is an ordinary non-admin, not an error.
    pub async fn is_admin(&self, email: &str) -> Result<bool> {
        let user: Option<User> = self.store.find_one("users", &[("email", email)]).await?;

        Ok(user.map(|u| u.is_admin()).unwrap_or(false))
    }

    /// Set the admin role on an existing user. The filtered update touches
    /// zero records when the target does not exist; it never creates one.
    pub async fn grant_admin(&self, email: &str) -> Result<Value> {
        debug!("Granting admin role to {}", email);

        let updated = self
            .store
            .update("users", &[("email", email)], json!({ "role": "admin" }))
            .await?;

        Ok(Value::Array(updated))
    }

    /// Insert or replace the profile stored at `email`. The email column is
    /// always forced to the addressed key, whatever the body claims.
    pub async fn upsert_user(&self, email: &str, mut profile: Map<String, Value>) -> Result<Value> {
        debug!("Upserting user {}", email);

        profile.insert("email".to_string(), json!(email));

        let stored = self
            .store
            .upsert("users", "email", Value::Object(profile))
            .await?;

        Ok(Value::Array(stored))
    }
}

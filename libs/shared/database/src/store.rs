use anyhow::{Result, anyhow};
use reqwest::{
    Client,
    header::{HeaderMap, HeaderValue, CONTENT_TYPE, AUTHORIZATION},
    Method,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, error};

use shared_config::AppConfig;

/// Gateway to the document store's REST interface. Collections live under
/// `/rest/v1/<collection>` and are filtered with `column=eq.value` query
/// pairs. The gateway holds no domain logic; it moves records.
pub struct StoreClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl StoreClient {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.database_url.clone(),
            api_key: config.database_api_key.clone(),
        }
    }

    fn headers(&self, prefer: Option<&str>) -> HeaderMap {
        let mut headers = HeaderMap::new();

        headers.insert("apikey", HeaderValue::from_str(&self.api_key).unwrap());
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", self.api_key)).unwrap()
        );

        if let Some(value) = prefer {
            headers.insert("Prefer", HeaderValue::from_str(value).unwrap());
        }

        headers
    }

    fn collection_path(collection: &str, filters: &[(&str, &str)]) -> String {
        let mut path = format!("/rest/v1/{}", collection);

        if !filters.is_empty() {
            let pairs: Vec<String> = filters
                .iter()
                .map(|(column, value)| format!("{}=eq.{}", column, value))
                .collect();
            path.push('?');
            path.push_str(&pairs.join("&"));
        }

        path
    }

    pub async fn request<T>(&self, method: Method, path: &str,
                            body: Option<Value>, prefer: Option<&str>)
                            -> Result<T>
    where T: DeserializeOwned {
        let url = format!("{}{}", self.base_url, path);
        debug!("Store request: {} {}", method, url);

        let mut req = self.client.request(method, &url)
            .headers(self.headers(prefer));

        if let Some(body_data) = body {
            req = req.json(&body_data);
        }

        let response = req.send().await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await?;
            error!("Store error ({}): {}", status, error_text);

            return Err(match status.as_u16() {
                401 | 403 => anyhow!("Store authentication error: {}", error_text),
                404 => anyhow!("Collection not found: {}", error_text),
                _ => anyhow!("Store error ({}): {}", status, error_text),
            });
        }

        let data = response.json::<T>().await?;
        Ok(data)
    }

    /// Every record matching the equality filters, in storage order.
    pub async fn find<T>(&self, collection: &str, filters: &[(&str, &str)]) -> Result<Vec<T>>
    where T: DeserializeOwned {
        let path = Self::collection_path(collection, filters);
        self.request(Method::GET, &path, None, None).await
    }

    /// The first record matching the filters, if any exists.
    pub async fn find_one<T>(&self, collection: &str, filters: &[(&str, &str)]) -> Result<Option<T>>
    where T: DeserializeOwned {
        let mut records: Vec<T> = self.find(collection, filters).await?;

        if records.is_empty() {
            return Ok(None);
        }

        Ok(Some(records.remove(0)))
    }

    /// Insert a record and return the stored representation.
    pub async fn insert(&self, collection: &str, record: Value) -> Result<Vec<Value>> {
        let path = Self::collection_path(collection, &[]);
        self.request(Method::POST, &path, Some(record), Some("return=representation")).await
    }

    /// Patch every record matching the filters and return the updated rows.
    /// Records that do not exist are left alone, never created.
    pub async fn update(&self, collection: &str, filters: &[(&str, &str)],
                        patch: Value) -> Result<Vec<Value>> {
        let path = Self::collection_path(collection, filters);
        self.request(Method::PATCH, &path, Some(patch), Some("return=representation")).await
    }

    /// Insert-or-replace keyed on `conflict_column`.
    pub async fn upsert(&self, collection: &str, conflict_column: &str,
                        record: Value) -> Result<Vec<Value>> {
        let path = format!("/rest/v1/{}?on_conflict={}", collection, conflict_column);
        self.request(
            Method::POST,
            &path,
            Some(record),
            Some("resolution=merge-duplicates,return=representation"),
        ).await
    }
}

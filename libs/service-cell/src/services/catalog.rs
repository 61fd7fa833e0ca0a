use anyhow::Result;
use tracing::debug;

use shared_config::AppConfig;
use shared_database::store::StoreClient;

use crate::models::Service;

pub struct CatalogService {
    store: StoreClient,
}

impl CatalogService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            store: StoreClient::new(config),
        }
    }

    /// The full treatment catalog, in storage order.
    pub async fn list_services(&self) -> Result<Vec<Service>> {
        let services: Vec<Service> = self.store.find("services", &[]).await?;
        debug!("Loaded {} services", services.len());

        Ok(services)
    }
}

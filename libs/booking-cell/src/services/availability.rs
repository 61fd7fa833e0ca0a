use std::collections::{HashMap, HashSet};

use anyhow::Result;
use chrono::NaiveDate;
use tracing::debug;

use service_cell::models::Service;
use shared_config::AppConfig;
use shared_database::store::StoreClient;

use crate::models::Booking;

pub struct AvailabilityService {
    store: StoreClient,
}

impl AvailabilityService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            store: StoreClient::new(config),
        }
    }

    /// Remaining open slots per service for one calendar date.
    ///
    /// Loads the full catalog and the date's bookings, then subtracts each
    /// service's booked slots from its slot list. The result is derived on
    /// every call and never written back.
    pub async fn open_slots_for_date(&self, date: NaiveDate) -> Result<Vec<Service>> {
        // step 1: the full catalog, in storage order
        let services: Vec<Service> = self.store.find("services", &[]).await?;

        // step 2: every booking taken on that date, across all services
        let date_key = date.to_string();
        let bookings: Vec<Booking> = self.store.find("bookings", &[("date", &date_key)]).await?;

        debug!(
            "Availability for {}: {} services, {} bookings",
            date,
            services.len(),
            bookings.len()
        );

        Ok(remove_booked_slots(services, &bookings))
    }
}

/// Subtract booked slots from each service's slot list.
///
/// Bookings are indexed by treatment name first, so the pass over the
/// catalog is O(services + bookings). Booked slots are a set: a slot
/// double-booked by mistake is still excluded exactly once. Catalog order
/// and each service's own slot order are preserved.
pub fn remove_booked_slots(services: Vec<Service>, bookings: &[Booking]) -> Vec<Service> {
    let mut booked: HashMap<&str, HashSet<&str>> = HashMap::new();
    for booking in bookings {
        booked
            .entry(booking.treatment.as_str())
            .or_default()
            .insert(booking.slot.as_str());
    }

    services
        .into_iter()
        .map(|mut service| {
            if let Some(taken) = booked.get(service.name.as_str()) {
                service.slots.retain(|slot| !taken.contains(slot.as_str()));
            }
            service
        })
        .collect()
}

use anyhow::Result;
use serde_json::Value;
use tracing::debug;

use shared_config::AppConfig;
use shared_database::store::StoreClient;

use crate::models::{Booking, BookingOutcome};

pub struct BookingService {
    store: StoreClient,
}

impl BookingService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            store: StoreClient::new(config),
        }
    }

    /// Create a booking unless an equivalent one already exists.
    ///
    /// Equivalence is the (treatment, date, patient) triple; a duplicate
    /// request returns the stored booking and writes nothing. The
    /// check-then-insert pair is not atomic: two simultaneous requests can
    /// both pass the check. Closing that race needs a unique index on the
    /// triple in the store itself.
    pub async fn create_booking(&self, booking: Booking) -> Result<BookingOutcome> {
        let date_key = booking.date.to_string();
        let filters = [
            ("treatment", booking.treatment.as_str()),
            ("date", date_key.as_str()),
            ("patient", booking.patient.as_str()),
        ];

        if let Some(existing) = self.store.find_one::<Booking>("bookings", &filters).await? {
            debug!(
                "Duplicate booking of {} on {} for {}",
                booking.treatment, date_key, booking.patient
            );
            return Ok(BookingOutcome::Duplicate(existing));
        }

        let inserted = self
            .store
            .insert("bookings", serde_json::to_value(&booking)?)
            .await?;

        Ok(BookingOutcome::Created(Value::Array(inserted)))
    }

    /// Every booking belonging to one patient.
    pub async fn bookings_for_patient(&self, patient: &str) -> Result<Vec<Booking>> {
        self.store.find("bookings", &[("patient", patient)]).await
    }
}

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One patient's reservation of one slot of one treatment on one date.
/// The (treatment, date, patient) triple is expected to be unique; the
/// booking service enforces that at write time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    pub treatment: String,
    pub date: NaiveDate,
    pub patient: String,
    pub slot: String,
}

/// Outcome of a booking-creation attempt: the stored insert result, or the
/// pre-existing booking that made the request a duplicate.
#[derive(Debug)]
pub enum BookingOutcome {
    Created(serde_json::Value),
    Duplicate(Booking),
}

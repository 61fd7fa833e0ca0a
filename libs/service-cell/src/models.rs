use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A bookable treatment with its full daily slot catalog. Seeded and
/// managed outside this backend; read-only here. The slot list is the
/// authoritative full set: per-date availability is derived from it and
/// never stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Service {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    pub name: String,
    pub slots: Vec<String>,
}

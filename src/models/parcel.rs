use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::driver::GeoPoint;

/// A parcel waiting to be matched. `priority` is an open-ended ordinal
/// (higher is more urgent); the data provider's contract does not bound it,
/// so no range is enforced here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParcelRecord {
    pub parcel_id: String,
    pub pickup: GeoPoint,
    pub dropoff: GeoPoint,
    /// Estimated minutes required to complete the delivery.
    pub expected_delivery_time: u32,
    pub priority: u32,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

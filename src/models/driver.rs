use chrono::{DateTime, NaiveTime, Timelike, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

/// A driver available for parcel assignment. Availability is a same-day
/// clock window; a window whose end precedes its start has negative length
/// and simply never fits any delivery.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriverRecord {
    pub driver_id: String,
    pub position: GeoPoint,
    pub destination: GeoPoint,
    #[serde(with = "hhmm")]
    pub available_from: NaiveTime,
    #[serde(with = "hhmm")]
    pub available_until: NaiveTime,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

impl DriverRecord {
    /// Signed length of the availability window in minutes. No overnight
    /// wrap: `available_until` is always read as later in the same day.
    pub fn window_minutes(&self) -> i64 {
        minutes_of_day(self.available_until) - minutes_of_day(self.available_from)
    }
}

fn minutes_of_day(t: NaiveTime) -> i64 {
    i64::from(t.hour()) * 60 + i64::from(t.minute())
}

/// Serde helper for `"HH:MM"` clock times.
pub mod hhmm {
    use chrono::NaiveTime;
    use serde::{self, Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%H:%M";

    pub fn serialize<S>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&time.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(&raw, FORMAT).map_err(serde::de::Error::custom)
    }
}

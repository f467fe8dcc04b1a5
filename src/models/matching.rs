use serde::{Deserialize, Serialize};

/// The four derived quantities behind a parcel's composite score. Distances
/// are great-circle kilometers; `fits_window` records whether the delivery
/// fits inside the driver's availability window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub pickup_distance_km: f64,
    pub delivery_distance_km: f64,
    pub dest_alignment_km: f64,
    pub fits_window: bool,
}

/// One ranked match. Lower score is better; scores are rounded to two
/// decimal places before ranking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResult {
    pub parcel_id: String,
    pub score: f64,
}

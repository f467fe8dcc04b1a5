use crate::geo::great_circle_km;
use crate::models::driver::DriverRecord;
use crate::models::matching::ScoreBreakdown;
use crate::models::parcel::ParcelRecord;

// The weights and bonus magnitudes are a compatibility contract with the
// historical scorer: one priority step outweighs roughly 17 km of pickup
// distance, schedule fit roughly 10 km. Do not retune without a product
// decision.
const PICKUP_DISTANCE_WEIGHT: f64 = 0.3;
const DELIVERY_DISTANCE_WEIGHT: f64 = 0.2;
const DEST_ALIGNMENT_WEIGHT: f64 = 0.3;
const PRIORITY_BONUS: f64 = 5.0;
const TIME_FIT_BONUS: f64 = 3.0;

/// Composite cost of assigning `parcel` to `driver`. Lower is better.
/// The returned score is rounded to two decimal places; ranking happens on
/// the rounded value.
pub fn compute_score(driver: &DriverRecord, parcel: &ParcelRecord) -> (f64, ScoreBreakdown) {
    let breakdown = ScoreBreakdown {
        pickup_distance_km: great_circle_km(&driver.position, &parcel.pickup),
        delivery_distance_km: great_circle_km(&parcel.pickup, &parcel.dropoff),
        dest_alignment_km: great_circle_km(&driver.destination, &parcel.dropoff),
        fits_window: i64::from(parcel.expected_delivery_time) <= driver.window_minutes(),
    };

    let score = weighted_score(&breakdown, parcel.priority);
    (round_to_cents(score), breakdown)
}

fn weighted_score(breakdown: &ScoreBreakdown, priority: u32) -> f64 {
    let time_fit = if breakdown.fits_window { 1.0 } else { 0.0 };

    (breakdown.pickup_distance_km * PICKUP_DISTANCE_WEIGHT)
        + (breakdown.delivery_distance_km * DELIVERY_DISTANCE_WEIGHT)
        + (breakdown.dest_alignment_km * DEST_ALIGNMENT_WEIGHT)
        - (f64::from(priority) * PRIORITY_BONUS)
        - (time_fit * TIME_FIT_BONUS)
}

fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

use tracing::debug;

use crate::engine::scoring::compute_score;
use crate::error::AppError;
use crate::models::driver::DriverRecord;
use crate::models::matching::MatchResult;
use crate::models::parcel::ParcelRecord;
use crate::state::AppState;

pub const DEFAULT_TOP_K: i64 = 5;

/// Scores every parcel against `driver` and returns the `top_k` cheapest
/// matches, ascending by rounded score.
///
/// The sort is stable, so parcels with equal rounded scores keep their
/// input order. An empty pool yields an empty result; a non-positive
/// `top_k` is rejected before any scoring happens.
pub fn rank_parcels(
    driver: &DriverRecord,
    parcels: &[ParcelRecord],
    top_k: i64,
) -> Result<Vec<MatchResult>, AppError> {
    if top_k <= 0 {
        return Err(AppError::InvalidArgument(format!(
            "top_k must be positive, got {top_k}"
        )));
    }

    let mut results: Vec<MatchResult> = parcels
        .iter()
        .map(|parcel| {
            let (score, _) = compute_score(driver, parcel);
            MatchResult {
                parcel_id: parcel.parcel_id.clone(),
                score,
            }
        })
        .collect();

    results.sort_by(|a, b| a.score.total_cmp(&b.score));
    results.truncate(top_k as usize);

    Ok(results)
}

/// By-id entry point: resolves the driver against the record store, takes a
/// snapshot of the parcel pool in registration order, and ranks it.
pub async fn match_driver(
    state: &AppState,
    driver_id: &str,
    top_k: i64,
) -> Result<Vec<MatchResult>, AppError> {
    let driver = state
        .drivers
        .get(driver_id)
        .map(|entry| entry.value().clone())
        .ok_or_else(|| AppError::NotFound(format!("driver {driver_id} not found")))?;

    let parcels = state.parcels.read().await.clone();

    debug!(
        driver_id,
        pool_size = parcels.len(),
        top_k,
        "ranking parcel pool"
    );

    let results = rank_parcels(&driver, &parcels, top_k)?;
    state.metrics.parcels_scored_total.inc_by(parcels.len() as u64);

    Ok(results)
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveTime, Utc};

    use super::{match_driver, rank_parcels};
    use crate::error::AppError;
    use crate::models::driver::{DriverRecord, GeoPoint};
    use crate::models::parcel::ParcelRecord;
    use crate::state::AppState;

    fn driver() -> DriverRecord {
        DriverRecord {
            driver_id: "D1".to_string(),
            position: GeoPoint {
                lat: 12.90,
                lng: 77.60,
            },
            destination: GeoPoint {
                lat: 12.95,
                lng: 77.65,
            },
            available_from: NaiveTime::parse_from_str("09:00", "%H:%M").unwrap(),
            available_until: NaiveTime::parse_from_str("17:00", "%H:%M").unwrap(),
            updated_at: Utc::now(),
        }
    }

    fn parcel(
        id: &str,
        pickup: (f64, f64),
        dropoff: (f64, f64),
        minutes: u32,
        priority: u32,
    ) -> ParcelRecord {
        ParcelRecord {
            parcel_id: id.to_string(),
            pickup: GeoPoint {
                lat: pickup.0,
                lng: pickup.1,
            },
            dropoff: GeoPoint {
                lat: dropoff.0,
                lng: dropoff.1,
            },
            expected_delivery_time: minutes,
            priority,
            created_at: Utc::now(),
        }
    }

    fn near_parcel(id: &str) -> ParcelRecord {
        parcel(id, (12.91, 77.61), (12.94, 77.64), 60, 2)
    }

    fn far_parcel(id: &str) -> ParcelRecord {
        parcel(id, (13.50, 78.20), (13.60, 78.30), 600, 0)
    }

    #[test]
    fn empty_pool_yields_empty_result() {
        let results = rank_parcels(&driver(), &[], 5).unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn non_positive_top_k_is_rejected() {
        let parcels = vec![near_parcel("P1")];

        assert!(matches!(
            rank_parcels(&driver(), &parcels, 0),
            Err(AppError::InvalidArgument(_))
        ));
        assert!(matches!(
            rank_parcels(&driver(), &parcels, -3),
            Err(AppError::InvalidArgument(_))
        ));
    }

    #[test]
    fn top_k_is_clamped_to_pool_size() {
        let parcels = vec![near_parcel("P1"), far_parcel("P2"), near_parcel("P3")];

        let results = rank_parcels(&driver(), &parcels, 10).unwrap();
        assert_eq!(results.len(), 3);

        let results = rank_parcels(&driver(), &parcels, 2).unwrap();
        assert_eq!(results.len(), 2);
    }

    #[test]
    fn scores_are_ordered_ascending() {
        let parcels = vec![
            far_parcel("P1"),
            near_parcel("P2"),
            parcel("P3", (13.10, 77.90), (13.20, 78.00), 120, 1),
        ];

        let results = rank_parcels(&driver(), &parcels, 3).unwrap();
        for pair in results.windows(2) {
            assert!(pair[0].score <= pair[1].score);
        }
    }

    #[test]
    fn near_high_priority_parcel_beats_far_low_priority_one() {
        let parcels = vec![far_parcel("P2"), near_parcel("P1")];

        let results = rank_parcels(&driver(), &parcels, 1).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].parcel_id, "P1");
    }

    #[test]
    fn equal_scores_keep_registration_order() {
        // Identical coordinates and attributes produce identical rounded
        // scores; the stable sort must keep the input order.
        let parcels = vec![near_parcel("A"), near_parcel("B"), near_parcel("C")];

        let results = rank_parcels(&driver(), &parcels, 3).unwrap();
        let ids: Vec<&str> = results.iter().map(|r| r.parcel_id.as_str()).collect();
        assert_eq!(ids, ["A", "B", "C"]);
    }

    #[test]
    fn ranking_is_deterministic() {
        let parcels = vec![
            near_parcel("P1"),
            far_parcel("P2"),
            parcel("P3", (12.95, 77.70), (13.00, 77.75), 200, 3),
        ];

        let first = rank_parcels(&driver(), &parcels, 3).unwrap();
        let second = rank_parcels(&driver(), &parcels, 3).unwrap();

        assert_eq!(first.len(), second.len());
        for (a, b) in first.iter().zip(second.iter()) {
            assert_eq!(a.parcel_id, b.parcel_id);
            assert_eq!(a.score, b.score);
        }
    }

    #[tokio::test]
    async fn unknown_driver_is_not_found() {
        let state = AppState::new();

        let err = match_driver(&state, "ghost", 5).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn match_driver_ranks_the_registered_pool() {
        let state = AppState::new();
        state.drivers.insert("D1".to_string(), driver());
        state.insert_parcel(far_parcel("P2")).await.unwrap();
        state.insert_parcel(near_parcel("P1")).await.unwrap();

        let results = match_driver(&state, "D1", 1).await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].parcel_id, "P1");
    }
}

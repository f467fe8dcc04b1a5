use std::path::Path;

use dashmap::DashMap;
use serde::Deserialize;
use tokio::sync::RwLock;

use crate::error::AppError;
use crate::models::driver::DriverRecord;
use crate::models::parcel::ParcelRecord;
use crate::observability::metrics::Metrics;

pub struct AppState {
    pub drivers: DashMap<String, DriverRecord>,
    /// Parcel pool in registration order. The order is load-bearing: ties on
    /// equal rounded scores are broken by it, so the pool is a sequence, not
    /// a map.
    pub parcels: RwLock<Vec<ParcelRecord>>,
    pub metrics: Metrics,
}

#[derive(Deserialize)]
struct SeedFile {
    #[serde(default)]
    drivers: Vec<DriverRecord>,
    #[serde(default)]
    parcels: Vec<ParcelRecord>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            drivers: DashMap::new(),
            parcels: RwLock::new(Vec::new()),
            metrics: Metrics::new(),
        }
    }

    pub fn insert_driver(&self, driver: DriverRecord) -> Result<(), AppError> {
        if self.drivers.contains_key(&driver.driver_id) {
            return Err(AppError::Conflict(format!(
                "driver {} already registered",
                driver.driver_id
            )));
        }

        self.drivers.insert(driver.driver_id.clone(), driver);
        self.metrics.drivers_registered.set(self.drivers.len() as i64);
        Ok(())
    }

    pub async fn insert_parcel(&self, parcel: ParcelRecord) -> Result<(), AppError> {
        let mut pool = self.parcels.write().await;

        if pool.iter().any(|p| p.parcel_id == parcel.parcel_id) {
            return Err(AppError::Conflict(format!(
                "parcel {} already registered",
                parcel.parcel_id
            )));
        }

        pool.push(parcel);
        self.metrics.parcels_registered.set(pool.len() as i64);
        Ok(())
    }

    /// Registers drivers and parcels from a JSON seed file. Replaces the
    /// original deployment's module-level CSV tables with an explicit,
    /// testable load step.
    pub async fn load_seed(&self, path: &Path) -> Result<(usize, usize), AppError> {
        let raw = std::fs::read_to_string(path).map_err(|err| {
            AppError::Internal(format!("failed to read seed file {}: {err}", path.display()))
        })?;

        let seed: SeedFile = serde_json::from_str(&raw)
            .map_err(|err| AppError::Internal(format!("invalid seed file: {err}")))?;

        let (driver_count, parcel_count) = (seed.drivers.len(), seed.parcels.len());

        for driver in seed.drivers {
            self.insert_driver(driver)?;
        }
        for parcel in seed.parcels {
            self.insert_parcel(parcel).await?;
        }

        Ok((driver_count, parcel_count))
    }
}

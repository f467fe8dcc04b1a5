use std::sync::Arc;

use axum::extract::{Path, State};
use axum::routing::{patch, post};
use axum::Json;
use axum::Router;
use chrono::{NaiveTime, Utc};
use serde::Deserialize;

use crate::error::AppError;
use crate::models::driver::{hhmm, DriverRecord, GeoPoint};
use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/drivers", post(register_driver).get(list_drivers))
        .route("/drivers/:id/location", patch(update_driver_location))
        .route("/drivers/:id/availability", patch(update_driver_availability))
}

#[derive(Deserialize)]
pub struct RegisterDriverRequest {
    pub driver_id: String,
    pub position: GeoPoint,
    pub destination: GeoPoint,
    #[serde(with = "hhmm")]
    pub available_from: NaiveTime,
    #[serde(with = "hhmm")]
    pub available_until: NaiveTime,
}

#[derive(Deserialize)]
pub struct UpdateLocationRequest {
    pub position: GeoPoint,
}

#[derive(Deserialize)]
pub struct UpdateAvailabilityRequest {
    #[serde(with = "hhmm")]
    pub available_from: NaiveTime,
    #[serde(with = "hhmm")]
    pub available_until: NaiveTime,
}

async fn register_driver(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<RegisterDriverRequest>,
) -> Result<Json<DriverRecord>, AppError> {
    if payload.driver_id.trim().is_empty() {
        return Err(AppError::InvalidArgument(
            "driver_id cannot be empty".to_string(),
        ));
    }

    let driver = DriverRecord {
        driver_id: payload.driver_id,
        position: payload.position,
        destination: payload.destination,
        available_from: payload.available_from,
        available_until: payload.available_until,
        updated_at: Utc::now(),
    };

    state.insert_driver(driver.clone())?;
    Ok(Json(driver))
}

async fn list_drivers(State(state): State<Arc<AppState>>) -> Json<Vec<DriverRecord>> {
    let drivers = state
        .drivers
        .iter()
        .map(|entry| entry.value().clone())
        .collect();
    Json(drivers)
}

async fn update_driver_location(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateLocationRequest>,
) -> Result<Json<DriverRecord>, AppError> {
    let mut driver = state
        .drivers
        .get_mut(&id)
        .ok_or_else(|| AppError::NotFound(format!("driver {id} not found")))?;

    driver.position = payload.position;
    driver.updated_at = Utc::now();

    Ok(Json(driver.clone()))
}

async fn update_driver_availability(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateAvailabilityRequest>,
) -> Result<Json<DriverRecord>, AppError> {
    let mut driver = state
        .drivers
        .get_mut(&id)
        .ok_or_else(|| AppError::NotFound(format!("driver {id} not found")))?;

    driver.available_from = payload.available_from;
    driver.available_until = payload.available_until;
    driver.updated_at = Utc::now();

    Ok(Json(driver.clone()))
}

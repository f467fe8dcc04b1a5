use std::sync::Arc;

use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::Json;
use axum::Router;
use chrono::Utc;
use serde::Deserialize;

use crate::error::AppError;
use crate::models::driver::GeoPoint;
use crate::models::parcel::ParcelRecord;
use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/parcels", post(register_parcel).get(list_parcels))
        .route("/parcels/:id", get(get_parcel))
}

#[derive(Deserialize)]
pub struct RegisterParcelRequest {
    pub parcel_id: String,
    pub pickup: GeoPoint,
    pub dropoff: GeoPoint,
    pub expected_delivery_time: u32,
    pub priority: u32,
}

async fn register_parcel(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<RegisterParcelRequest>,
) -> Result<Json<ParcelRecord>, AppError> {
    if payload.parcel_id.trim().is_empty() {
        return Err(AppError::InvalidArgument(
            "parcel_id cannot be empty".to_string(),
        ));
    }

    let parcel = ParcelRecord {
        parcel_id: payload.parcel_id,
        pickup: payload.pickup,
        dropoff: payload.dropoff,
        expected_delivery_time: payload.expected_delivery_time,
        priority: payload.priority,
        created_at: Utc::now(),
    };

    state.insert_parcel(parcel.clone()).await?;
    Ok(Json(parcel))
}

async fn list_parcels(State(state): State<Arc<AppState>>) -> Json<Vec<ParcelRecord>> {
    let parcels = state.parcels.read().await.clone();
    Json(parcels)
}

async fn get_parcel(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ParcelRecord>, AppError> {
    let pool = state.parcels.read().await;
    let parcel = pool
        .iter()
        .find(|p| p.parcel_id == id)
        .cloned()
        .ok_or_else(|| AppError::NotFound(format!("parcel {id} not found")))?;

    Ok(Json(parcel))
}

//! Weather proxy route.

use axum::{Json, extract::State};
use tracing::info;
use weather_core::WeatherRecord;

use crate::{
    error::{ApiError, ApiResult},
    extract::{ValidPath, required},
    state::AppState,
};

/// Fetch current weather for `city`, persist the raw response and return the new row.
///
/// The fetch and the insert are independent statements; a failed insert
/// after a successful fetch leaves nothing behind.
pub async fn fetch_weather(
    State(state): State<AppState>,
    ValidPath(city): ValidPath<String>,
) -> ApiResult<Json<WeatherRecord>> {
    let city = required(Some(city), "city")?;

    let payload = state.provider.fetch_current(&city).await?;
    let record = state.store.insert_weather(&city, &payload).await?;

    info!(id = record.id, city = %record.city, "stored weather response");
    Ok(Json(record))
}

pub async fn missing_city() -> ApiError {
    ApiError::validation("city is required")
}

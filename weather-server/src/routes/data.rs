//! CRUD routes over the `data` table.

use axum::{Json, extract::State, http::StatusCode};
use weather_core::{DataEntry, DataInput};

use crate::{
    error::{ApiError, ApiResult},
    extract::{ValidJson, ValidPath, parse_id, required},
    state::AppState,
};

fn validate(input: DataInput) -> ApiResult<(String, String)> {
    let name = required(input.name, "name")?;
    let value = required(input.value, "value")?;
    Ok((name, value))
}

pub async fn create_data(
    State(state): State<AppState>,
    ValidJson(input): ValidJson<DataInput>,
) -> ApiResult<Json<DataEntry>> {
    let (name, value) = validate(input)?;
    let entry = state.store.insert_data(&name, &value).await?;
    Ok(Json(entry))
}

pub async fn list_data(State(state): State<AppState>) -> ApiResult<Json<Vec<DataEntry>>> {
    Ok(Json(state.store.list_data().await?))
}

pub async fn update_data(
    State(state): State<AppState>,
    ValidPath(id): ValidPath<String>,
    ValidJson(input): ValidJson<DataInput>,
) -> ApiResult<Json<DataEntry>> {
    let id = parse_id(&id)?;
    let (name, value) = validate(input)?;

    state
        .store
        .update_data(id, &name, &value)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found(format!("Data entry {id} not found")))
}

pub async fn delete_data(
    State(state): State<AppState>,
    ValidPath(id): ValidPath<String>,
) -> ApiResult<StatusCode> {
    let id = parse_id(&id)?;

    if state.store.delete_data(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::not_found(format!("Data entry {id} not found")))
    }
}

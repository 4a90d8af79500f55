//! Route table and the small root-level handlers.

use axum::{
    Router,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, put},
};

use crate::{
    error::{ApiError, ErrorKind},
    state::AppState,
};

pub mod data;
pub mod docs;
pub mod weather;

pub const WELCOME_TEXT: &str = "Welcome to the API!";

/// Routes mounted under `/api`.
pub fn api_router() -> Router<AppState> {
    Router::new()
        .route("/weather/:city", get(weather::fetch_weather))
        .route("/weather/", get(weather::missing_city))
        .route("/data", get(data::list_data).post(data::create_data))
        .route("/data/:id", put(data::update_data).delete(data::delete_data))
}

pub async fn index() -> &'static str {
    WELCOME_TEXT
}

pub async fn not_found() -> impl IntoResponse {
    ApiError::not_found("Not found")
}

/// Replace axum's empty 405 with the usual `{error}` body, keeping `Allow`.
pub async fn method_not_allowed(response: Response) -> Response {
    if response.status() != StatusCode::METHOD_NOT_ALLOWED {
        return response;
    }

    let allow = response.headers().get(header::ALLOW).cloned();
    let mut rendered =
        ApiError::new(ErrorKind::MethodNotAllowed, "Method not allowed").into_response();
    if let Some(allow) = allow {
        rendered.headers_mut().insert(header::ALLOW, allow);
    }
    rendered
}

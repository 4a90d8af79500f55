use thiserror::Error;

/// Failure of an outbound weather provider call.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Error fetching weather data: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Error fetching weather data: request failed with status {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("Error fetching weather data: invalid JSON in response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Failure of a database statement.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

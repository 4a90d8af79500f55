//! Extractors that reject with [`ApiError`] instead of axum's plain-text bodies.

use axum::extract::{
    FromRequest, FromRequestParts,
    rejection::{JsonRejection, PathRejection},
};
use tracing::debug;

use crate::error::ApiError;

/// `Json<T>` whose rejection is a 400 `ApiError`.
///
/// A body that is not JSON at all gets `"Invalid JSON payload"`. Well-formed
/// JSON of the wrong shape gets the deserializer's message instead.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ValidJson<T>(pub T);

/// `Path<T>` whose rejection is a validation error.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct ValidPath<T>(pub T);

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        debug!(reason = %rejection.body_text(), "rejected request body");
        match rejection {
            JsonRejection::JsonDataError(err) => ApiError::validation(err.body_text()),
            _ => ApiError::invalid_json(),
        }
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::validation(rejection.body_text())
    }
}

/// Presence check for a required string field.
pub fn required(value: Option<String>, field: &str) -> Result<String, ApiError> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(ApiError::validation(format!("{field} is required"))),
    }
}

/// Parse a row id taken from the path.
pub fn parse_id(raw: &str) -> Result<i64, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::validation(format!("Invalid id '{raw}': expected an integer")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn required_accepts_non_empty() {
        assert_eq!(required(Some("x".into()), "name").unwrap(), "x");
        // Presence only: whitespace is a value.
        assert_eq!(required(Some(" ".into()), "name").unwrap(), " ");
    }

    #[test]
    fn required_rejects_missing_and_empty() {
        let err = required(None, "name").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
        assert_eq!(err.message, "name is required");

        let err = required(Some(String::new()), "value").unwrap_err();
        assert_eq!(err.message, "value is required");
    }

    #[test]
    fn parse_id_rejects_non_integers() {
        assert_eq!(parse_id("17").unwrap(), 17);
        assert_eq!(parse_id("abc").unwrap_err().kind, ErrorKind::Validation);
        assert!(parse_id("1.5").is_err());
    }
}

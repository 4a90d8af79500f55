use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A provider response persisted by the weather proxy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherRecord {
    pub id: i64,
    pub city: String,
    /// Raw provider payload, stored verbatim.
    pub data: Value,
}

/// A name/value row managed through the CRUD endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct DataEntry {
    pub id: i64,
    pub name: String,
    pub value: String,
}

/// Request body for creating or replacing a [`DataEntry`].
///
/// Both fields are optional here so a missing field reaches validation
/// instead of failing deserialization. A field of the wrong JSON type still
/// fails deserialization and is reported with the deserializer's message.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DataInput {
    pub name: Option<String>,
    pub value: Option<String>,
}

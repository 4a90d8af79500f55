//! SQLite persistence for weather responses and data entries.

use serde_json::Value;
use sqlx::{
    FromRow, SqlitePool,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    types::Json,
};
use std::str::FromStr;
use tracing::{debug, info};

use crate::{
    error::StoreError,
    model::{DataEntry, WeatherRecord},
};

const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS weather (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    city TEXT NOT NULL,
    data TEXT NOT NULL
);
CREATE TABLE IF NOT EXISTS data (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    value TEXT NOT NULL
)
"#;

pub type StoreResult<T> = Result<T, StoreError>;

/// Handle to the database pool. Cloning shares the same pool.
#[derive(Debug, Clone)]
pub struct Store {
    pool: SqlitePool,
}

#[derive(FromRow)]
struct WeatherRow {
    id: i64,
    city: String,
    data: Json<Value>,
}

impl From<WeatherRow> for WeatherRecord {
    fn from(row: WeatherRow) -> Self {
        Self {
            id: row.id,
            city: row.city,
            data: row.data.0,
        }
    }
}

impl Store {
    /// Open a pool for `database_url`, creating the database file if missing.
    pub async fn connect(database_url: &str) -> StoreResult<Self> {
        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new().connect_with(options).await?;

        info!(url = database_url, "connected to database");
        Ok(Self { pool })
    }

    /// Private in-memory database.
    ///
    /// Every SQLite memory connection is its own database, so the pool is
    /// pinned to a single connection that is never recycled.
    pub async fn connect_in_memory() -> StoreResult<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await?;

        Ok(Self { pool })
    }

    /// Create the `weather` and `data` tables if they don't exist.
    pub async fn migrate(&self) -> StoreResult<()> {
        for statement in SCHEMA_SQL.split(';') {
            let trimmed = statement.trim();
            if !trimmed.is_empty() {
                sqlx::query(trimmed).execute(&self.pool).await?;
            }
        }

        debug!("schema is up to date");
        Ok(())
    }

    pub async fn insert_weather(&self, city: &str, payload: &Value) -> StoreResult<WeatherRecord> {
        let row = sqlx::query_as::<_, WeatherRow>(
            "INSERT INTO weather (city, data) VALUES (?, ?) RETURNING id, city, data",
        )
        .bind(city)
        .bind(Json(payload))
        .fetch_one(&self.pool)
        .await?;

        debug!(id = row.id, city, "inserted weather record");
        Ok(row.into())
    }

    /// Weather rows recorded for `city`, oldest first.
    ///
    /// Read-back counterpart of [`Store::insert_weather`]; no route exposes it.
    pub async fn weather_for_city(&self, city: &str) -> StoreResult<Vec<WeatherRecord>> {
        let rows = sqlx::query_as::<_, WeatherRow>(
            "SELECT id, city, data FROM weather WHERE city = ? ORDER BY id",
        )
        .bind(city)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    pub async fn insert_data(&self, name: &str, value: &str) -> StoreResult<DataEntry> {
        let entry = sqlx::query_as::<_, DataEntry>(
            "INSERT INTO data (name, value) VALUES (?, ?) RETURNING id, name, value",
        )
        .bind(name)
        .bind(value)
        .fetch_one(&self.pool)
        .await?;

        debug!(id = entry.id, "inserted data entry");
        Ok(entry)
    }

    /// All data entries in the store's natural order.
    pub async fn list_data(&self) -> StoreResult<Vec<DataEntry>> {
        let entries = sqlx::query_as::<_, DataEntry>("SELECT id, name, value FROM data")
            .fetch_all(&self.pool)
            .await?;

        Ok(entries)
    }

    /// Replace name and value of entry `id`. `None` if no such row.
    pub async fn update_data(
        &self,
        id: i64,
        name: &str,
        value: &str,
    ) -> StoreResult<Option<DataEntry>> {
        let entry = sqlx::query_as::<_, DataEntry>(
            "UPDATE data SET name = ?, value = ? WHERE id = ? RETURNING id, name, value",
        )
        .bind(name)
        .bind(value)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        debug!(id, found = entry.is_some(), "updated data entry");
        Ok(entry)
    }

    /// Delete entry `id`. Returns whether a row was removed.
    pub async fn delete_data(&self, id: i64) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM data WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        let deleted = result.rows_affected() > 0;
        debug!(id, deleted, "deleted data entry");
        Ok(deleted)
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

//! Core library for the weather proxy service.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - Abstraction over weather providers
//! - Persistence of weather responses and data entries
//! - Shared domain models
//!
//! It is used by `weather-server`, but can also be reused by other binaries.

pub mod config;
pub mod error;
pub mod model;
pub mod provider;
pub mod store;

pub use config::{Config, ProviderConfig};
pub use error::{FetchError, StoreError};
pub use model::{DataEntry, DataInput, WeatherRecord};
pub use provider::{ProviderId, WeatherProvider};
pub use store::Store;

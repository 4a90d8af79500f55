use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

use crate::error::FetchError;

use super::{ProviderId, WeatherProvider, endpoint, fetch_json};

pub const DEFAULT_BASE_URL: &str = "http://api.openweathermap.org";

/// OpenWeatherMap "current weather" endpoint.
#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(api_key: String, base_url: Option<String>) -> Self {
        Self {
            api_key,
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            http: Client::new(),
        }
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn fetch_current(&self, city: &str) -> Result<Value, FetchError> {
        let url = endpoint(&self.base_url, "/data/2.5/weather");

        let request = self
            .http
            .get(url)
            .query(&[("q", city), ("appid", self.api_key.as_str())]);

        fetch_json(ProviderId::OpenWeather, request).await
    }
}

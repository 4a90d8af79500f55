use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

use crate::error::FetchError;

use super::{ProviderId, WeatherProvider, endpoint, fetch_json};

pub const DEFAULT_BASE_URL: &str = "http://api.weatherapi.com";

#[derive(Debug, Clone)]
pub struct WeatherApiProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl WeatherApiProvider {
    pub fn new(api_key: String, base_url: Option<String>) -> Self {
        Self {
            api_key,
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            http: Client::new(),
        }
    }
}

#[async_trait]
impl WeatherProvider for WeatherApiProvider {
    async fn fetch_current(&self, city: &str) -> Result<Value, FetchError> {
        let url = endpoint(&self.base_url, "/v1/current.json");

        let request = self
            .http
            .get(url)
            .query(&[("key", self.api_key.as_str()), ("q", city)]);

        fetch_json(ProviderId::WeatherApi, request).await
    }
}

//! TfL Unified API HTTP client.
//!
//! A single `reqwest::Client` is built at startup and shared by every
//! request. TLS is verified against the platform trust store. There is no
//! retry and no client-side timeout.

use std::fmt;

use reqwest::{StatusCode, Url};
use serde_json::Value;
use tracing::{error, info};

use super::error::TflError;
use super::project::{project_predictions, project_stop_points};
use super::types::{Prediction, StopPoints, StopQuery};

/// Default base URL for the TfL Unified API.
const DEFAULT_BASE_URL: &str = "https://api.tfl.gov.uk";

/// Query parameters whose values never reach the log.
const CREDENTIAL_PARAMS: [&str; 2] = ["app_id", "app_key"];

/// Maximum number of characters of an error body kept in [`TflError::Status`].
const ERROR_BODY_LIMIT: usize = 500;

/// Configuration for the TfL client.
#[derive(Clone)]
pub struct TflConfig {
    /// Application ID, sent as `app_id`
    pub app_id: String,
    /// Application key, sent as `app_key`
    pub app_key: String,
    /// Base URL for the API (defaults to production TfL)
    pub base_url: String,
}

impl TflConfig {
    /// Create a new config with the given credentials.
    pub fn new(app_id: impl Into<String>, app_key: impl Into<String>) -> Self {
        Self {
            app_id: app_id.into(),
            app_key: app_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }
}

impl fmt::Debug for TflConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TflConfig")
            .field("app_id", &"<redacted>")
            .field("app_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .finish()
    }
}

/// TfL Unified API client.
#[derive(Debug, Clone)]
pub struct TflClient {
    http: reqwest::Client,
    base_url: Url,
    config: TflConfig,
}

impl TflClient {
    /// Create a new TfL client with the given configuration.
    pub fn new(config: TflConfig) -> Result<Self, TflError> {
        let base_url = Url::parse(&config.base_url)
            .ok()
            .filter(|url| !url.cannot_be_a_base())
            .ok_or_else(|| TflError::BaseUrl(config.base_url.clone()))?;

        let http = reqwest::Client::builder().build()?;

        Ok(Self {
            http,
            base_url,
            config,
        })
    }

    /// Issue a GET and parse the body as JSON.
    ///
    /// Every failure is logged here with its detail. Callers treat all
    /// [`TflError`]s alike.
    pub async fn get(&self, endpoint: Url, params: &[(&str, String)]) -> Result<Value, TflError> {
        info!(
            method = "GET",
            %endpoint,
            query = %redacted_query(params),
            "outbound request"
        );

        let result = self.send(&endpoint, params).await;
        if let Err(e) = &result {
            error!(%endpoint, error = %e, "TfL API request failed");
        }
        result
    }

    async fn send(&self, endpoint: &Url, params: &[(&str, String)]) -> Result<Value, TflError> {
        let response = self
            .http
            .get(endpoint.clone())
            .query(params)
            .send()
            .await?;

        let status = response.status();

        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            return Err(TflError::Status {
                status: status.as_u16(),
                body: body.chars().take(ERROR_BODY_LIMIT).collect(),
            });
        }

        let body = response.text().await?;

        serde_json::from_str(&body).map_err(|e| TflError::Json {
            message: e.to_string(),
        })
    }

    /// Search for stops around a coordinate.
    ///
    /// Stops TfL returns without a letter, NaPTAN ID or distance are left out
    /// of the result.
    pub async fn find_stops(&self, query: &StopQuery) -> Result<StopPoints, TflError> {
        let mut params = vec![
            ("lat", query.latitude.to_string()),
            ("lon", query.longitude.to_string()),
            ("radius", query.radius.to_string()),
            ("stopTypes", query.stop_types.join(",")),
            ("returnLines", query.return_lines.to_string()),
        ];
        params.extend(self.credentials());

        let body = self.get(self.endpoint(&["StopPoint"]), &params).await?;

        project_stop_points(&body).inspect_err(|e| {
            error!(error = %e, "unusable StopPoint response");
        })
    }

    /// Get live bus arrival predictions for a stop.
    pub async fn find_predictions(&self, naptan_id: &str) -> Result<Vec<Prediction>, TflError> {
        let mut params = vec![("mode", "bus".to_string())];
        params.extend(self.credentials());

        let endpoint = self.endpoint(&["StopPoint", naptan_id, "Arrivals"]);
        let body = self.get(endpoint, &params).await?;

        project_predictions(&body).inspect_err(|e| {
            error!(naptan_id, error = %e, "unusable Arrivals response");
        })
    }

    fn credentials(&self) -> [(&'static str, String); 2] {
        [
            ("app_id", self.config.app_id.clone()),
            ("app_key", self.config.app_key.clone()),
        ]
    }

    /// Append path segments to the base URL, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // Only fails for cannot-be-a-base URLs, which `new` rejects.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }
}

/// Render query parameters for logging with credential values hidden.
fn redacted_query(params: &[(&str, String)]) -> String {
    params
        .iter()
        .map(|(key, value)| {
            if CREDENTIAL_PARAMS.contains(key) {
                format!("{key}=<redacted>")
            } else {
                format!("{key}={value}")
            }
        })
        .collect::<Vec<_>>()
        .join("&")
}

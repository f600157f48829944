use anyhow::Context;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;

use crate::{
    ConditionsReport, Error, Location, Place,
    config::DEFAULT_ENDPOINT,
};

use super::WeatherSource;

/// Talks to the Weatherstack "current" endpoint, always in Fahrenheit.
#[derive(Clone)]
pub struct WeatherstackSource {
    access_key: String,
    endpoint: String,
    http: Client,
}

// Omits the access key.
impl std::fmt::Debug for WeatherstackSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeatherstackSource")
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

pub struct WeatherstackSourceBuilder {
    access_key: String,
    endpoint: String,
    timeout: Option<Duration>,
}

impl WeatherstackSourceBuilder {
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn build(self) -> anyhow::Result<WeatherstackSource> {
        let mut http = Client::builder();
        if let Some(timeout) = self.timeout {
            http = http.timeout(timeout);
        }
        let http = http.build().context("Failed to build HTTP client")?;

        Ok(WeatherstackSource { access_key: self.access_key, endpoint: self.endpoint, http })
    }
}

impl WeatherstackSource {
    pub fn builder(access_key: String) -> WeatherstackSourceBuilder {
        WeatherstackSourceBuilder {
            access_key,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: None,
        }
    }

    async fn fetch_current(&self, location: &Location) -> Result<ConditionsReport, Error> {
        tracing::debug!(%location, endpoint = %self.endpoint, "requesting current conditions");

        let res = self
            .http
            .get(&self.endpoint)
            .query(&[
                ("access_key", self.access_key.as_str()),
                ("query", location.as_str()),
                ("units", "f"),
            ])
            .send()
            .await
            .map_err(|e| {
                // The URL carries the access key.
                let e = e.without_url();
                tracing::warn!(error = %e, "weatherstack request failed");
                Error::transport(format!("request failed: {e}"))
            })?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|e| Error::transport(format!("failed to read response body: {}", e.without_url())))?;

        if !status.is_success() {
            tracing::warn!(%status, "weatherstack returned non-success status");
            return Err(Error::transport(format!("status {status}: {}", truncate_body(&body))));
        }

        parse_current(&body)
    }
}

#[async_trait]
impl WeatherSource for WeatherstackSource {
    async fn fetch_conditions(&self, location: &Location) -> Result<ConditionsReport, Error> {
        self.fetch_current(location).await
    }
}

#[derive(Debug, Deserialize)]
struct WsError {
    code: Option<i64>,
    #[serde(rename = "type")]
    kind: Option<String>,
    info: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WsCurrent {
    temperature: f64,
    weather_descriptions: Vec<String>,
    precip: f64,
}

#[derive(Debug, Deserialize)]
struct WsLocation {
    name: Option<String>,
    region: Option<String>,
    country: Option<String>,
    localtime: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WsResponse {
    current: WsCurrent,
    location: Option<WsLocation>,
}

/// Turn a 2xx body into a report, or the rejection it carries.
fn parse_current(body: &str) -> Result<ConditionsReport, Error> {
    let value: Value = serde_json::from_str(body)
        .map_err(|e| Error::malformed(format!("response is not valid JSON: {e}")))?;

    if let Some(err) = value.get("error") {
        let err: WsError = serde_json::from_value(err.clone())
            .map_err(|e| Error::malformed(format!("unreadable error object: {e}")))?;
        tracing::warn!(code = ?err.code, kind = ?err.kind, "weatherstack rejected the request");

        return Err(Error::UpstreamRejection {
            info: err.info.unwrap_or_else(|| "unknown upstream error".to_string()),
            code: err.code,
            kind: err.kind,
        });
    }

    let parsed: WsResponse = serde_json::from_value(value)
        .map_err(|e| Error::malformed(format!("unexpected response shape: {e}")))?;

    if parsed.current.weather_descriptions.is_empty() {
        return Err(Error::malformed("current.weather_descriptions is empty"));
    }

    let place = parsed.location.map(|l| Place {
        name: l.name,
        region: l.region,
        country: l.country,
        localtime: l.localtime,
    });
    if let Some(p) = &place {
        tracing::debug!(name = ?p.name, region = ?p.region, country = ?p.country, "resolved location");
    }

    Ok(ConditionsReport {
        temperature_f: parsed.current.temperature,
        weather_descriptions: parsed.current.weather_descriptions,
        precip_in: parsed.current.precip,
        place,
    })
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}

use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{IpError, Result};

/// Default geo-IP JSON endpoint. The queried address is appended as a path
/// segment.
pub const DEFAULT_ENDPOINT: &str = "http://ip-api.com/json";

/// Client for an external geo-IP JSON service.
#[derive(Debug, Clone)]
pub struct GeoIpClient {
    /// Base URL the address is appended to.
    pub endpoint: String,
}

impl Default for GeoIpClient {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
        }
    }
}

impl GeoIpClient {
    /// Create a client for the default endpoint.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the base URL of the service.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// URL queried for `ip`. An empty `ip` asks about the caller's own address.
    pub fn url_for(&self, ip: &str) -> String {
        format!("{}/{}", self.endpoint.trim_end_matches('/'), ip)
    }

    /// Fetch and decode the geo-IP record for `ip`.
    ///
    /// This performs a blocking HTTP request; call it off the async runtime.
    ///
    /// # Errors
    ///
    /// Returns [`IpError::GeoLookup`] if the request fails or the body is not
    /// a JSON object.
    pub fn lookup(&self, ip: &str) -> Result<Map<String, Value>> {
        let url = self.url_for(ip);
        debug!(%url, "querying geo-IP service");

        let body = reqwest::blocking::get(url.as_str())
            .and_then(|response| response.text())
            .map_err(|e| IpError::GeoLookup(e.to_string()))?;
        decode(&body)
    }
}

fn decode(body: &str) -> Result<Map<String, Value>> {
    match serde_json::from_str(body) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(IpError::GeoLookup(format!("expected a JSON object, got {other}"))),
        Err(e) => Err(IpError::GeoLookup(e.to_string())),
    }
}

/// Look up `ip` with the default client.
pub fn geo_lookup(ip: &str) -> Result<Map<String, Value>> {
    GeoIpClient::default().lookup(ip)
}

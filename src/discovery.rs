use std::collections::HashMap;

use tracing::debug;

/// Sentinel returned when no client address source is usable.
pub const UNKNOWN_IP: &str = "unknown";

/// Type alias for in-memory variable maps, keyed by CGI-style names such as
/// `REMOTE_ADDR` or `HTTP_X_FORWARDED_FOR`.
pub type HeaderMap = HashMap<String, String>;

/// Something that can resolve a named variable to a raw value.
pub trait VarSource {
    /// Look up `key`, returning `None` if it is unset.
    fn var(&self, key: &str) -> Option<String>;
}

impl VarSource for HeaderMap {
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

/// The process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct Environment;

impl VarSource for Environment {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

/// Map an HTTP header name to its CGI variable name (`X-Forwarded-For` to
/// `HTTP_X_FORWARDED_FOR`).
pub fn cgi_key(header: &str) -> String {
    format!("HTTP_{}", header.to_ascii_uppercase().replace('-', "_"))
}

/// Configuration for client and server address discovery.
#[derive(Debug, Clone)]
pub struct IpDiscovery {
    /// Variables checked for the client address, in order of preference.
    pub client_sources: Vec<String>,
    /// Variables checked for the server address, in order of preference.
    pub server_sources: Vec<String>,
    /// Whether to use the first entry of a comma-separated forwarding chain.
    pub use_first_forwarded: bool,
}

impl Default for IpDiscovery {
    fn default() -> Self {
        Self {
            client_sources: vec![
                "HTTP_CLIENT_IP".to_string(),
                "HTTP_X_FORWARDED_FOR".to_string(),
                "REMOTE_ADDR".to_string(),
            ],
            server_sources: vec!["SERVER_ADDR".to_string(), "LOCAL_ADDR".to_string()],
            use_first_forwarded: true,
        }
    }
}

impl IpDiscovery {
    /// Create a discovery helper with the default source order.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the variables checked for the client address.
    pub fn with_client_sources(mut self, sources: Vec<String>) -> Self {
        self.client_sources = sources;
        self
    }

    /// Set the variables checked for the server address.
    pub fn with_server_sources(mut self, sources: Vec<String>) -> Self {
        self.server_sources = sources;
        self
    }

    /// Set whether to use the first entry of a forwarding chain.
    pub fn use_first_forwarded(mut self, use_first: bool) -> Self {
        self.use_first_forwarded = use_first;
        self
    }

    /// Resolve the client address, or [`UNKNOWN_IP`] if no source qualifies.
    ///
    /// A value qualifies when it is non-empty and not `unknown` in any case.
    /// The result is a raw literal; it is not validated as an address.
    pub fn client_ip(&self, source: &impl VarSource) -> String {
        for key in &self.client_sources {
            if let Some(ip) = source.var(key).and_then(|value| self.pick(&value)) {
                return ip;
            }
        }
        debug!(sources = ?self.client_sources, "no usable client address source");
        UNKNOWN_IP.to_string()
    }

    /// Resolve the server address from the first set server source.
    pub fn server_ip(&self, source: &impl VarSource) -> Option<String> {
        self.server_sources
            .iter()
            .filter_map(|key| source.var(key))
            .map(|value| value.trim().to_string())
            .find(|value| !value.is_empty())
    }

    /// Select an entry of a forwarding chain and reject placeholders.
    fn pick(&self, value: &str) -> Option<String> {
        let mut entries = value.split(',').map(str::trim);
        let entry = if self.use_first_forwarded {
            entries.next()
        } else {
            entries.next_back()
        }?;

        if entry.is_empty() || entry.eq_ignore_ascii_case(UNKNOWN_IP) {
            return None;
        }
        Some(entry.to_string())
    }
}

/// Resolve the client address with the default configuration.
///
/// # Examples
///
/// ```rust
/// use ipnum::{client_ip, HeaderMap};
/// use std::collections::HashMap;
///
/// let mut vars: HeaderMap = HashMap::new();
/// vars.insert("HTTP_X_FORWARDED_FOR".to_string(), "203.0.113.1, 10.0.0.1".to_string());
/// vars.insert("REMOTE_ADDR".to_string(), "10.0.0.1".to_string());
///
/// assert_eq!(client_ip(&vars), "203.0.113.1");
/// assert_eq!(client_ip(&HeaderMap::new()), "unknown");
/// ```
pub fn client_ip(source: &impl VarSource) -> String {
    IpDiscovery::default().client_ip(source)
}

/// Resolve the server address with the default configuration.
pub fn server_ip(source: &impl VarSource) -> Option<String> {
    IpDiscovery::default().server_ip(source)
}

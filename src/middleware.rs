use axum::{
    extract::{ConnectInfo, FromRequestParts, Request},
    http::{HeaderMap, request::Parts},
    response::Response,
};
use futures_util::future::BoxFuture;
use std::{
    net::SocketAddr,
    task::{Context, Poll},
};
use tower::{Layer, Service};

use crate::discovery::{self, IpDiscovery, UNKNOWN_IP};
use crate::version::{IpVersion, ip_version};

/// Extension that holds the discovered client address literal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientIp(pub String);

impl ClientIp {
    /// The raw address literal, possibly [`UNKNOWN_IP`].
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether discovery fell back to the sentinel.
    pub fn is_unknown(&self) -> bool {
        self.0 == UNKNOWN_IP
    }

    /// Address family of the literal.
    pub fn version(&self) -> IpVersion {
        ip_version(&self.0)
    }
}

/// Layer that discovers the client address of each request.
///
/// Request headers are exposed to [`IpDiscovery`] under their CGI names
/// (`X-Forwarded-For` becomes `HTTP_X_FORWARDED_FOR`) and the connection
/// address, when known, as `REMOTE_ADDR`. The result is stored as a
/// [`ClientIp`] request extension.
///
/// # Examples
///
/// ```rust,no_run
/// use axum::{Router, routing::get};
/// use ipnum::{ClientIp, ClientIpLayer};
///
/// async fn handler(ip: ClientIp) -> String {
///     ip.as_str().to_string()
/// }
///
/// let app: Router = Router::new()
///     .route("/", get(handler))
///     .layer(ClientIpLayer::default());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ClientIpLayer {
    discovery: IpDiscovery,
}

impl ClientIpLayer {
    /// Create a layer with the default source order.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a layer with custom discovery configuration.
    pub fn with_discovery(discovery: IpDiscovery) -> Self {
        Self { discovery }
    }
}

impl<S> Layer<S> for ClientIpLayer {
    type Service = ClientIpService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        ClientIpService {
            inner,
            discovery: self.discovery.clone(),
        }
    }
}

/// Service that discovers client addresses.
#[derive(Debug, Clone)]
pub struct ClientIpService<S> {
    inner: S,
    discovery: IpDiscovery,
}

impl<S> Service<Request> for ClientIpService<S>
where
    S: Service<Request, Response = Response> + Send + 'static,
    S::Future: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = BoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request) -> Self::Future {
        let remote = req
            .extensions()
            .get::<ConnectInfo<SocketAddr>>()
            .map(|connect_info| connect_info.0.ip().to_string());
        let vars = request_vars(req.headers(), remote);

        let client_ip = self.discovery.client_ip(&vars);
        req.extensions_mut().insert(ClientIp(client_ip));

        let future = self.inner.call(req);
        Box::pin(future)
    }
}

/// Convert request headers into a CGI-style variable map.
///
/// Repeated headers are joined with `", "` in the order received.
fn request_vars(headers: &HeaderMap, remote: Option<String>) -> discovery::HeaderMap {
    let mut vars = discovery::HeaderMap::new();

    for name in headers.keys() {
        let values: Vec<&str> = headers
            .get_all(name)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .collect();
        if !values.is_empty() {
            vars.insert(discovery::cgi_key(name.as_str()), values.join(", "));
        }
    }

    if let Some(remote) = remote {
        vars.insert("REMOTE_ADDR".to_string(), remote);
    }
    vars
}

/// Axum extractor for the client address.
///
/// Uses the extension set by [`ClientIpLayer`], then the connection address,
/// then [`UNKNOWN_IP`].
impl<S> FromRequestParts<S> for ClientIp
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        if let Some(client_ip) = parts.extensions.get::<ClientIp>() {
            return Ok(client_ip.clone());
        }
        if let Some(connect_info) = parts.extensions.get::<ConnectInfo<SocketAddr>>() {
            return Ok(ClientIp(connect_info.0.ip().to_string()));
        }
        Ok(ClientIp(UNKNOWN_IP.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, body::Body, http, routing::get};
    use tower::ServiceExt;

    async fn echo(ip: ClientIp) -> String {
        ip.as_str().to_string()
    }

    async fn body_text(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_layer_reads_forwarded_header() {
        let app = Router::new()
            .route("/", get(echo))
            .layer(ClientIpLayer::default());

        let request = http::Request::builder()
            .uri("/")
            .header("x-forwarded-for", "203.0.113.9, 10.0.0.1")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(body_text(response).await, "203.0.113.9");
    }

    #[tokio::test]
    async fn test_layer_prefers_connection_over_unknown() {
        let app = Router::new()
            .route("/", get(echo))
            .layer(ClientIpLayer::default());

        let mut request = http::Request::builder().uri("/").body(Body::empty()).unwrap();
        request
            .extensions_mut()
            .insert(ConnectInfo(SocketAddr::from(([192, 0, 2, 44], 4000))));
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(body_text(response).await, "192.0.2.44");
    }

    #[tokio::test]
    async fn test_extractor_without_layer() {
        let app = Router::new().route("/", get(echo));
        let request = http::Request::builder().uri("/").body(Body::empty()).unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(body_text(response).await, UNKNOWN_IP);
    }

    #[test]
    fn test_request_vars() {
        let mut headers = HeaderMap::new();
        headers.insert("client-ip", "198.51.100.3".parse().unwrap());
        let vars = request_vars(&headers, Some("10.0.0.1".to_string()));
        assert_eq!(vars.get("HTTP_CLIENT_IP").map(String::as_str), Some("198.51.100.3"));
        assert_eq!(vars.get("REMOTE_ADDR").map(String::as_str), Some("10.0.0.1"));
    }

    #[test]
    fn test_request_vars_joins_repeated_headers() {
        let mut headers = HeaderMap::new();
        headers.append("x-forwarded-for", "203.0.113.5".parse().unwrap());
        headers.append("x-forwarded-for", "10.0.0.7, 10.0.0.8".parse().unwrap());
        let vars = request_vars(&headers, None);
        assert_eq!(
            vars.get("HTTP_X_FORWARDED_FOR").map(String::as_str),
            Some("203.0.113.5, 10.0.0.7, 10.0.0.8")
        );
        assert_eq!(IpDiscovery::default().client_ip(&vars), "203.0.113.5");
    }
}

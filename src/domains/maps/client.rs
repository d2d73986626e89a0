//! Google Maps Web Service client.
//!
//! One GET per call: endpoint path + query string + API key. The parsed JSON
//! body is returned as-is; status handling belongs to the tool handlers.

use async_trait::async_trait;
use std::fmt::Display;
use std::time::Duration;
use tracing::{debug, instrument};

use super::error::{UpstreamError, UpstreamResult};
use crate::core::config::UpstreamConfig;

/// Default base URL of the Maps Web Service API.
pub const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com/maps/api";

/// Default request timeout for upstream calls.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Delimiter for list-valued query parameters.
pub const LIST_DELIMITER: &str = "|";

/// Query parameter carrying the API key.
const KEY_PARAM: &str = "key";

// ============================================================================
// Endpoints
// ============================================================================

/// Maps API endpoints used by the tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Geocode,
    PlaceTextSearch,
    PlaceDetails,
    DistanceMatrix,
    Elevation,
    Directions,
}

impl Endpoint {
    /// Path relative to the API base URL.
    pub fn path(self) -> &'static str {
        match self {
            Self::Geocode => "geocode/json",
            Self::PlaceTextSearch => "place/textsearch/json",
            Self::PlaceDetails => "place/details/json",
            Self::DistanceMatrix => "distancematrix/json",
            Self::Elevation => "elevation/json",
            Self::Directions => "directions/json",
        }
    }
}

// ============================================================================
// Query parameters
// ============================================================================

/// Ordered query-string parameters for one request.
///
/// Absent optional values are never pushed, so the request carries no empty
/// or null parameters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryParams {
    pairs: Vec<(&'static str, String)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(mut self, name: &'static str, value: impl Display) -> Self {
        self.pairs.push((name, value.to_string()));
        self
    }

    pub fn push_opt<V: Display>(self, name: &'static str, value: Option<V>) -> Self {
        match value {
            Some(value) => self.push(name, value),
            None => self,
        }
    }

    /// Push a list-valued parameter joined with `|`.
    pub fn push_joined<I>(self, name: &'static str, values: I) -> Self
    where
        I: IntoIterator,
        I::Item: Display,
    {
        let joined = values
            .into_iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join(LIST_DELIMITER);
        self.push(name, joined)
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn pairs(&self) -> &[(&'static str, String)] {
        &self.pairs
    }

    /// URL-encoded form, without the API key.
    pub fn encode(&self) -> String {
        serde_urlencoded::to_string(&self.pairs).unwrap_or_default()
    }
}

// ============================================================================
// Upstream seam
// ============================================================================

/// Anything that can answer a Maps API GET with a JSON body.
#[async_trait]
pub trait Upstream: Send + Sync {
    async fn get(&self, endpoint: Endpoint, query: &QueryParams)
    -> UpstreamResult<serde_json::Value>;
}

// ============================================================================
// reqwest-backed client
// ============================================================================

/// HTTP client for the Maps Web Service API.
#[derive(Clone)]
pub struct MapsClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl std::fmt::Debug for MapsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MapsClient")
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

impl MapsClient {
    /// Build a client from upstream configuration and the API key.
    pub fn new(config: &UpstreamConfig, api_key: impl Into<String>) -> UpstreamResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| UpstreamError::Init(e.to_string()))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        })
    }

    /// Full URL of an endpoint, without query string.
    pub fn url(&self, endpoint: Endpoint) -> String {
        format!("{}/{}", self.base_url, endpoint.path())
    }
}

#[async_trait]
impl Upstream for MapsClient {
    #[instrument(skip(self, query), fields(endpoint = endpoint.path()))]
    async fn get(
        &self,
        endpoint: Endpoint,
        query: &QueryParams,
    ) -> UpstreamResult<serde_json::Value> {
        debug!("GET {}?{}", self.url(endpoint), query.encode());

        let mut pairs: Vec<(&str, &str)> = query
            .pairs()
            .iter()
            .map(|(n, v)| (*n, v.as_str()))
            .collect();
        pairs.push((KEY_PARAM, self.api_key.as_str()));

        let response = self
            .http
            .get(self.url(endpoint))
            .query(&pairs)
            .send()
            .await
            .map_err(UpstreamError::from_reqwest)?;

        let status = response.status();
        let body = response.bytes().await.map_err(UpstreamError::from_reqwest)?;

        debug!("Upstream responded {} ({} bytes)", status, body.len());

        match serde_json::from_slice(&body) {
            Ok(json) => Ok(json),
            Err(_) if !status.is_success() => Err(UpstreamError::Http {
                status: status.as_u16(),
            }),
            Err(e) => Err(UpstreamError::InvalidBody(e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::Router;
    use axum::extract::RawQuery;
    use axum::http::{StatusCode, Uri};
    use axum::routing::get;
    use serde_json::{Value, json};
    use std::collections::HashMap;
    use tokio::net::TcpListener;

    async fn serve(app: Router) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("local_addr");
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });
        format!("http://{addr}")
    }

    fn client(base_url: &str) -> MapsClient {
        let config = UpstreamConfig {
            base_url: base_url.to_string(),
            timeout_secs: 5,
        };
        MapsClient::new(&config, "test-key").expect("client")
    }

    #[test]
    fn test_endpoint_paths() {
        assert_eq!(Endpoint::Geocode.path(), "geocode/json");
        assert_eq!(Endpoint::PlaceTextSearch.path(), "place/textsearch/json");
        assert_eq!(Endpoint::PlaceDetails.path(), "place/details/json");
        assert_eq!(Endpoint::DistanceMatrix.path(), "distancematrix/json");
        assert_eq!(Endpoint::Elevation.path(), "elevation/json");
        assert_eq!(Endpoint::Directions.path(), "directions/json");
    }

    #[test]
    fn test_query_params_omit_absent_values() {
        let query = QueryParams::new()
            .push("query", "coffee")
            .push_opt::<String>("location", None)
            .push_opt("radius", Some(500));
        assert_eq!(query.get("query"), Some("coffee"));
        assert!(!query.contains("location"));
        assert_eq!(query.get("radius"), Some("500"));
        assert_eq!(query.pairs().len(), 2);
    }

    #[test]
    fn test_query_params_join_lists() {
        let query = QueryParams::new().push_joined("origins", ["A", "B"]);
        assert_eq!(query.get("origins"), Some("A|B"));
        assert_eq!(query.encode(), "origins=A%7CB");
    }

    #[test]
    fn test_debug_redacts_key() {
        let debug = format!("{:?}", client("http://localhost"));
        assert!(debug.contains("REDACTED"));
        assert!(!debug.contains("test-key"));
    }

    #[test]
    fn test_url_trims_trailing_slash() {
        let c = client("http://localhost:9/maps/api/");
        assert_eq!(c.url(Endpoint::Geocode), "http://localhost:9/maps/api/geocode/json");
    }

    #[tokio::test]
    async fn test_get_sends_path_query_and_key() {
        async fn echo(uri: Uri, RawQuery(query): RawQuery) -> axum::Json<Value> {
            axum::Json(json!({
                "status": "OK",
                "path": uri.path(),
                "query": query.unwrap_or_default(),
            }))
        }

        let base = serve(Router::new().route("/{*path}", get(echo))).await;
        let query = QueryParams::new()
            .push("address", "1600 Amphitheatre Parkway")
            .push_joined("locations", ["1.5,2.5", "3,4"]);

        let body = client(&base)
            .get(Endpoint::Geocode, &query)
            .await
            .expect("response");

        assert_eq!(body["path"], "/geocode/json");
        let sent: HashMap<String, String> =
            serde_urlencoded::from_str(body["query"].as_str().unwrap()).unwrap();
        assert_eq!(sent["address"], "1600 Amphitheatre Parkway");
        assert_eq!(sent["locations"], "1.5,2.5|3,4");
        assert_eq!(sent["key"], "test-key");
        assert_eq!(sent.len(), 3);
    }

    #[tokio::test]
    async fn test_get_returns_rejections_untouched() {
        async fn denied() -> (StatusCode, axum::Json<Value>) {
            (
                StatusCode::OK,
                axum::Json(json!({"status": "REQUEST_DENIED", "error_message": "bad key"})),
            )
        }

        let base = serve(Router::new().route("/{*path}", get(denied))).await;
        let body = client(&base)
            .get(Endpoint::Elevation, &QueryParams::new())
            .await
            .expect("response");
        assert_eq!(body["status"], "REQUEST_DENIED");
    }

    #[tokio::test]
    async fn test_get_non_json_body() {
        async fn html() -> &'static str {
            "<html>not json</html>"
        }
        async fn broken() -> (StatusCode, &'static str) {
            (StatusCode::BAD_GATEWAY, "upstream down")
        }

        let base = serve(
            Router::new()
                .route("/geocode/json", get(html))
                .route("/directions/json", get(broken)),
        )
        .await;
        let c = client(&base);

        let err = c.get(Endpoint::Geocode, &QueryParams::new()).await.unwrap_err();
        assert!(matches!(err, UpstreamError::InvalidBody(_)));

        let err = c
            .get(Endpoint::Directions, &QueryParams::new())
            .await
            .unwrap_err();
        assert!(matches!(err, UpstreamError::Http { status: 502 }));
    }

    #[tokio::test]
    async fn test_get_connection_failure() {
        // Bind then drop to get a port nothing listens on.
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("local_addr");
        drop(listener);

        let err = client(&format!("http://{addr}"))
            .get(Endpoint::Geocode, &QueryParams::new())
            .await
            .unwrap_err();
        assert!(matches!(err, UpstreamError::Request(_)));
    }

    #[tokio::test]
    async fn test_connection_failure_does_not_expose_key() {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("local_addr");
        drop(listener);

        let config = UpstreamConfig {
            base_url: format!("http://{addr}"),
            timeout_secs: 5,
        };
        let c = MapsClient::new(&config, "SECRET-API-KEY").expect("client");
        let err = c
            .get(Endpoint::Geocode, &QueryParams::new().push("address", "x"))
            .await
            .unwrap_err();

        let message = err.to_string();
        assert!(message.starts_with("request error: connection failed"));
        assert!(!message.contains("SECRET-API-KEY"));
        assert!(!message.contains("key="));
    }
}

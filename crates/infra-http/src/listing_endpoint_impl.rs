// Listing endpoint over HTTP
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, warn};

use jobboard_core::domain::QueryDescriptor;
use jobboard_core::port::{FetchError, ListingEndpoint, ListingPage};
use jobboard_core::{AppError, Result};

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000/api";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Adapter settings
#[derive(Debug, Clone)]
pub struct HttpEndpointConfig {
    /// API root; the listing lives at `{base_url}/jobs/`
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for HttpEndpointConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl HttpEndpointConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// `GET {base_url}/jobs/` with the query descriptor as query string
pub struct HttpListingEndpoint {
    client: Client,
    jobs_url: String,
}

impl HttpListingEndpoint {
    pub fn new(config: HttpEndpointConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AppError::Config(format!("HTTP client: {e}")))?;

        Ok(Self {
            client,
            jobs_url: format!("{}/jobs/", config.base_url.trim_end_matches('/')),
        })
    }

    pub fn jobs_url(&self) -> &str {
        &self.jobs_url
    }
}

fn transport_error(e: reqwest::Error) -> FetchError {
    if e.is_timeout() {
        FetchError::Transport(format!("request timed out: {e}"))
    } else if e.is_connect() {
        FetchError::Transport(format!("connection failed: {e}"))
    } else {
        FetchError::Transport(e.to_string())
    }
}

#[async_trait]
impl ListingEndpoint for HttpListingEndpoint {
    async fn fetch(&self, query: &QueryDescriptor) -> std::result::Result<ListingPage, FetchError> {
        debug!(url = %self.jobs_url, page = query.page, "Fetching listing page");

        let response = self
            .client
            .get(&self.jobs_url)
            .query(query)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            warn!(status = status.as_u16(), "Listing endpoint rejected request");
            return Err(FetchError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.bytes().await.map_err(transport_error)?;
        ListingPage::from_slice(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jobboard_core::domain::{build_query, FilterState, LocationFilter};
    use jobboard_core::port::FailureCategory;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param, query_param_is_missing};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn endpoint(server: &MockServer) -> HttpListingEndpoint {
        HttpListingEndpoint::new(HttpEndpointConfig::new(server.uri())).unwrap()
    }

    #[test]
    fn test_jobs_url_trailing_slash() {
        let ep = HttpListingEndpoint::new(HttpEndpointConfig::new("http://api.test/api/")).unwrap();
        assert_eq!(ep.jobs_url(), "http://api.test/api/jobs/");

        let ep = HttpListingEndpoint::new(HttpEndpointConfig::default()).unwrap();
        assert_eq!(ep.jobs_url(), "http://127.0.0.1:8000/api/jobs/");
    }

    #[tokio::test]
    async fn test_query_string_carries_descriptor() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/jobs/"))
            .and(query_param("search", "rust"))
            .and(query_param("location_type", "remote"))
            .and(query_param("page", "2"))
            .and(query_param("page_size", "20"))
            .and(query_param("sort", "score"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "results": [{"id": 7, "title": "Rust Engineer", "company": {"name": "Acme"}}],
                "count": 41
            })))
            .expect(1)
            .mount(&server)
            .await;

        let mut filters = FilterState::new("rust", LocationFilter::Remote);
        filters.set_page(2).unwrap();
        let page = endpoint(&server).fetch(&build_query(&filters)).await.unwrap();

        assert_eq!(page.count, 41);
        assert_eq!(page.results[0].id.as_str(), "7");
        assert_eq!(page.results[0].company.name, "Acme");
    }

    #[tokio::test]
    async fn test_absent_filters_left_out() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/jobs/"))
            .and(query_param_is_missing("search"))
            .and(query_param_is_missing("location_type"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"results": [], "count": 0})))
            .expect(1)
            .mount(&server)
            .await;

        let page = endpoint(&server)
            .fetch(&QueryDescriptor::recommended())
            .await
            .unwrap();
        assert!(page.results.is_empty());
    }

    #[tokio::test]
    async fn test_error_status_is_transport_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
            .mount(&server)
            .await;

        let err = endpoint(&server)
            .fetch(&QueryDescriptor::recommended())
            .await
            .unwrap_err();

        assert_eq!(
            err,
            FetchError::Status {
                status: 503,
                message: "maintenance".to_string()
            }
        );
        assert_eq!(err.category(), FailureCategory::Transport);
    }

    #[tokio::test]
    async fn test_non_json_body_is_malformed() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>login</html>"))
            .mount(&server)
            .await;

        let err = endpoint(&server)
            .fetch(&QueryDescriptor::recommended())
            .await
            .unwrap_err();
        assert_eq!(err.category(), FailureCategory::MalformedResponse);
    }

    #[tokio::test]
    async fn test_unreachable_host_is_transport() {
        // Port 9 (discard) on localhost is closed in test environments
        let ep = HttpListingEndpoint::new(
            HttpEndpointConfig::new("http://127.0.0.1:9").with_timeout(Duration::from_secs(2)),
        )
        .unwrap();

        let err = ep.fetch(&QueryDescriptor::recommended()).await.unwrap_err();
        assert!(matches!(err, FetchError::Transport(_)));
    }

    #[tokio::test]
    async fn test_timeout_is_transport() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"results": [], "count": 0}))
                    .set_delay(Duration::from_millis(500)),
            )
            .mount(&server)
            .await;

        let ep = HttpListingEndpoint::new(
            HttpEndpointConfig::new(server.uri()).with_timeout(Duration::from_millis(100)),
        )
        .unwrap();
        let err = ep.fetch(&QueryDescriptor::recommended()).await.unwrap_err();
        assert!(err.to_string().contains("timed out"));
    }
}

//! Fetches arbitrary pages through a CORS pass-through relay.

use super::AcquisitionError;
use reqwest::Client;
use std::time::Duration;
use url::Url;

pub const DEFAULT_RELAY_BASE_URL: &str = "https://api.allorigins.win/raw";

/// GETs `<base>?url=<encoded target>` and returns the HTML body.
#[derive(Clone)]
pub struct RelayFetcher {
    client: Client,
    base_url: String,
}

impl RelayFetcher {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, AcquisitionError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AcquisitionError::RelayUnreachable(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    fn relay_url(&self, target: &Url) -> String {
        format!(
            "{}?url={}",
            self.base_url,
            urlencoding::encode(target.as_str())
        )
    }

    /// Retrieve the target page. Transport failures and non-2xx statuses are
    /// reported as distinct errors.
    pub async fn fetch_html(&self, target: &Url) -> Result<String, AcquisitionError> {
        tracing::debug!(target = %target, relay = %self.base_url, "Fetching page through relay");

        let response = self
            .client
            .get(self.relay_url(target))
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(target = %target, error = %e, "Relay request failed");
                AcquisitionError::RelayUnreachable(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(target = %target, status = status.as_u16(), "Relay returned non-success status");
            return Err(AcquisitionError::OriginUnavailable {
                status: status.as_u16(),
            });
        }

        response
            .text()
            .await
            .map_err(|e| AcquisitionError::RelayUnreachable(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::acquisition::{self, MediaKind};
    use crate::error::ErrorKind;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn fetcher(server: &MockServer) -> RelayFetcher {
        RelayFetcher::new(format!("{}/raw", server.uri()), Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn target_is_url_encoded_into_the_query() {
        let fetcher = RelayFetcher::new("https://relay.test/raw", Duration::from_secs(1)).unwrap();
        let target = Url::parse("https://example.com/a b?x=1&y=2").unwrap();
        assert_eq!(
            fetcher.relay_url(&target),
            "https://relay.test/raw?url=https%3A%2F%2Fexample.com%2Fa%2520b%3Fx%3D1%26y%3D2"
        );
    }

    #[tokio::test]
    async fn fetches_page_and_builds_url_source() {
        let server = MockServer::start().await;
        let body = format!(
            "<html><head><style>p {{}}</style></head><body><nav>Menu</nav><p>{}</p></body></html>",
            "Readable sentence. ".repeat(10)
        );
        Mock::given(method("GET"))
            .and(path("/raw"))
            .and(query_param("url", "https://example.com/article"))
            .respond_with(ResponseTemplate::new(200).set_body_string(body))
            .expect(1)
            .mount(&server)
            .await;

        let source = acquisition::from_url(&fetcher(&server), "https://example.com/article")
            .await
            .unwrap();

        assert_eq!(source.description(), "example.com");
        assert_eq!(source.media_kind(), MediaKind::Url);
        let text = source.text().unwrap();
        assert!(text.starts_with("Readable sentence."));
        assert!(!text.contains("Menu"));
    }

    #[tokio::test]
    async fn non_success_status_is_origin_unavailable() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(403))
            .mount(&server)
            .await;

        let err = acquisition::from_url(&fetcher(&server), "https://blocked.example")
            .await
            .unwrap_err();

        assert_eq!(err, AcquisitionError::OriginUnavailable { status: 403 });
        assert_eq!(err.kind(), ErrorKind::Network);
        assert!(err.to_string().contains("Status: 403"));
    }

    #[tokio::test]
    async fn unreachable_relay_is_distinct_from_origin_failure() {
        let fetcher = RelayFetcher::new("http://127.0.0.1:9/raw", Duration::from_secs(2)).unwrap();
        let err = acquisition::from_url(&fetcher, "https://example.com")
            .await
            .unwrap_err();

        assert!(matches!(err, AcquisitionError::RelayUnreachable(_)));
        assert_eq!(err.kind(), ErrorKind::Network);
    }

    #[tokio::test]
    async fn thin_pages_are_rejected() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string("<html><body><div id=\"app\"></div><script>boot()</script></body></html>"),
            )
            .mount(&server)
            .await;

        let err = acquisition::from_url(&fetcher(&server), "https://spa.example")
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[tokio::test]
    async fn malformed_url_never_reaches_the_relay() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let err = acquisition::from_url(&fetcher(&server), "example dot com")
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Validation);
    }
}

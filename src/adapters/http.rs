use crate::core::Fetcher;
use crate::utils::error::{Result, ServicesError};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// Downloads the services file with a plain GET.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    /// Without a timeout the client default applies.
    pub fn with_timeout(timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder().user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder.build().map_err(|e| ServicesError::ConfigError {
            message: format!("failed to build HTTP client: {}", e),
        })?;
        Ok(Self { client })
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        let fetch_error = |reason: String| ServicesError::FetchError {
            url: url.to_string(),
            reason,
        };

        tracing::debug!("Making request to: {}", url);
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| fetch_error(e.to_string()))?;

        tracing::debug!("Response status: {}", response.status());
        if !response.status().is_success() {
            return Err(fetch_error(format!("HTTP {}", response.status())));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| fetch_error(e.to_string()))?;
        Ok(body.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    #[tokio::test]
    async fn test_fetch_success() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/nmap-services");
            then.status(200).body("http\t80/tcp\t0.484143\n");
        });

        let fetcher = HttpFetcher::new();
        let body = fetcher.fetch(&server.url("/nmap-services")).await.unwrap();

        mock.assert();
        assert_eq!(body, b"http\t80/tcp\t0.484143\n");
    }

    #[tokio::test]
    async fn test_fetch_non_success_status() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/missing");
            then.status(404);
        });

        let fetcher = HttpFetcher::with_timeout(Some(Duration::from_secs(5))).unwrap();
        let result = fetcher.fetch(&server.url("/missing")).await;

        mock.assert();
        match result {
            Err(ServicesError::FetchError { url, reason }) => {
                assert!(url.ends_with("/missing"));
                assert!(reason.contains("404"));
            }
            other => panic!("expected fetch error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_unreachable_host() {
        let fetcher = HttpFetcher::with_timeout(Some(Duration::from_secs(5))).unwrap();
        let result = fetcher.fetch("http://127.0.0.1:1/nmap-services").await;
        assert!(matches!(result, Err(ServicesError::FetchError { .. })));
    }
}

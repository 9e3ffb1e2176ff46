/*
[INPUT]:  HTTP configuration (timeouts) and signed envelopes
[OUTPUT]: reqwest-backed transport returning raw responses
[POS]:    HTTP layer - production transport implementation
[UPDATE]: When adding connection options or changing client behavior
*/

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::http::envelope::{Headers, SignedEnvelope};
use crate::http::transport::{RawResponse, Transport};
use crate::http::{BithumbError, Result};

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub timeout: Duration,
    pub connect_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
        }
    }
}

/// Transport over a pooled reqwest client
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    http_client: Client,
}

impl ReqwestTransport {
    /// Create a transport with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a transport with custom configuration
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .build()?;

        Ok(Self { http_client })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn perform(&self, envelope: &SignedEnvelope) -> Result<RawResponse> {
        let mut builder = self
            .http_client
            .request(envelope.method.clone(), envelope.url.clone());
        for (name, value) in &envelope.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &envelope.body {
            builder = builder.body(body.clone());
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let headers: Headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|value| (name.as_str().to_string(), value.to_string()))
            })
            .collect();
        let body = response.text().await.map_err(BithumbError::Transport)?;

        debug!(status, bytes = body.len(), url = %envelope.url, "response received");

        Ok(RawResponse {
            status,
            headers,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::Method;
    use url::Url;
    use wiremock::matchers::{body_string, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_transport_creation() {
        assert!(ReqwestTransport::new().is_ok());
    }

    #[tokio::test]
    async fn test_perform_forwards_headers_and_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/orders"))
            .and(header("Authorization", "Bearer token"))
            .and(body_string("market=KRW-BTC"))
            .respond_with(
                ResponseTemplate::new(201)
                    .insert_header("x-ratelimit-remaining", "9")
                    .set_body_string(r#"{"uuid":"abc"}"#),
            )
            .expect(1)
            .mount(&server)
            .await;

        let mut headers = Headers::new();
        headers.insert("Authorization".to_string(), "Bearer token".to_string());
        let envelope = SignedEnvelope {
            url: Url::parse(&format!("{}/v1/orders", server.uri())).unwrap(),
            method: Method::POST,
            headers,
            body: Some("market=KRW-BTC".to_string()),
        };

        let response = ReqwestTransport::new()
            .unwrap()
            .perform(&envelope)
            .await
            .expect("perform failed");

        assert_eq!(response.status, 201);
        assert_eq!(response.body, r#"{"uuid":"abc"}"#);
        assert_eq!(response.headers["x-ratelimit-remaining"], "9");
    }
}

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method};

use crate::domain::{ClassifiedError, Headers, OutboundRequest, RawResponse};

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Sends one request and reads the whole response. Errors returned here
/// happened before a response arrived.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn send(&self, request: OutboundRequest) -> Result<RawResponse, ClassifiedError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new() -> Result<Self, ClassifiedError> {
        let client = Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .build()
            .map_err(|err| ClassifiedError::other(format!("failed to create HTTP client: {err}")))?;
        Ok(Self { client })
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: OutboundRequest) -> Result<RawResponse, ClassifiedError> {
        let method = Method::from_bytes(request.method.as_bytes()).map_err(|err| {
            ClassifiedError::other(format!("invalid HTTP method '{}': {err}", request.method))
        })?;

        let mut builder = self.client.request(method, &request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }

        let response = builder
            .body(request.body)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                let value = value.to_str().ok()?;
                Some((name.as_str().to_ascii_lowercase(), value.to_string()))
            })
            .collect::<Headers>();
        let body = response.text().await.map_err(map_transport_error)?;

        Ok(RawResponse {
            status,
            headers,
            body,
        })
    }
}

/// Connect failures are `Network` even when they time out. `Timeout` belongs
/// to the dispatcher's deadline.
fn map_transport_error(error: reqwest::Error) -> ClassifiedError {
    if error.is_connect() {
        return ClassifiedError::network(format!("connection failed: {error}"));
    }
    if error.is_timeout() {
        return ClassifiedError::timeout();
    }
    if error.is_builder() {
        return ClassifiedError::other(format!("invalid request: {error}"));
    }

    ClassifiedError::network(format!("transport error: {error}"))
}

//! JSON-over-HTTP plumbing shared by the remote provider clients.
//!
//! Maps every transport outcome onto the gateway error taxonomy:
//! - connection failures and timeouts become `BackendError`
//! - `404 Not Found` becomes `NotFound`
//! - any other non-success status becomes `BackendError` with the body attached
//! - a success body that does not decode becomes `BackendError`

use crate::error::{GatewayError, Result};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use url::Url;

#[derive(Clone, Debug)]
pub struct HttpBackend {
    name: &'static str,
    base_url: Url,
    client: Client,
}

impl HttpBackend {
    pub fn new(name: &'static str, base_url: Url, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build().map_err(|e| {
            GatewayError::Config {
                message: format!("failed to build HTTP client for {name}: {e}"),
            }
        })?;
        Ok(Self {
            name,
            base_url,
            client,
        })
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Builds `base_url/segment/...`, percent-encoding each segment.
    pub fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                GatewayError::backend(self.name, format!("base URL '{}' cannot have a path", self.base_url))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    pub async fn post_json<T, R>(&self, url: Url, payment_id: Option<&str>, payload: &T) -> Result<R>
    where
        T: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        tracing::debug!(provider = self.name, %url, "POST");
        let request = self.client.post(url.clone()).json(payload);
        self.send(request, url, payment_id).await
    }

    pub async fn get_json<R>(&self, url: Url, payment_id: Option<&str>) -> Result<R>
    where
        R: DeserializeOwned,
    {
        tracing::debug!(provider = self.name, %url, "GET");
        let request = self.client.get(url.clone());
        self.send(request, url, payment_id).await
    }

    async fn send<R>(&self, request: RequestBuilder, url: Url, payment_id: Option<&str>) -> Result<R>
    where
        R: DeserializeOwned,
    {
        let response = request.send().await.map_err(|e| {
            tracing::error!(provider = self.name, %url, error = %e, "request failed");
            let reason = if e.is_timeout() {
                format!("request to {url} timed out")
            } else {
                format!("request to {url} failed: {e}")
            };
            GatewayError::backend(self.name, reason)
        })?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND
            && let Some(id) = payment_id
        {
            tracing::warn!(provider = self.name, %url, payment_id = id, "payment not found");
            return Err(GatewayError::not_found(self.name, id));
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(provider = self.name, %url, %status, "backend returned error status");
            return Err(GatewayError::backend(
                self.name,
                format!("{url} returned status {status}: {}", body.trim()),
            ));
        }

        response.json::<R>().await.map_err(|e| {
            tracing::error!(provider = self.name, %url, error = %e, "failed to decode response");
            GatewayError::backend(self.name, format!("failed to decode response from {url}: {e}"))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn backend(base: &str) -> HttpBackend {
        HttpBackend::new("paypal", Url::parse(base).unwrap(), Duration::from_secs(1)).unwrap()
    }

    #[test]
    fn test_endpoint_joins_segments() {
        let http = backend("http://paypal-mock:8081");
        let url = http.endpoint(&["charges", "abc"]).unwrap();
        assert_eq!(url.as_str(), "http://paypal-mock:8081/charges/abc");
    }

    #[test]
    fn test_endpoint_keeps_base_path() {
        let http = backend("http://localhost:9000/api/");
        let url = http.endpoint(&["refund", "id-1"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:9000/api/refund/id-1");
    }

    #[test]
    fn test_endpoint_encodes_identifier() {
        let http = backend("http://localhost:9000");
        let url = http.endpoint(&["charges", "a/b c"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:9000/charges/a%2Fb%20c");
    }
}

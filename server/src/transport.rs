//! Executes core `HttpRequest` values over the network with reqwest.
//!
//! One `reqwest::Client` is built at startup and shared by every call; it
//! pools connections internally and is cheap to clone.

use std::time::Duration;

use remote_action_core::{ApiError, HttpMethod, HttpRequest, HttpResponse};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Method};

#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(timeout: Duration) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Transport(format!("building HTTP client: {e}")))?;
        Ok(Self { client })
    }

    /// Send `req` and read the whole reply. Non-2xx statuses are returned as
    /// data. Error messages never include the URL, which carries credentials.
    pub async fn execute(&self, req: HttpRequest) -> Result<HttpResponse, ApiError> {
        let method = match req.method {
            HttpMethod::Post => Method::POST,
        };
        let headers = header_map(&req.headers)?;

        let mut builder = self.client.request(method, req.url.as_str()).headers(headers);
        if let Some(body) = req.body {
            builder = builder.body(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| ApiError::Transport(describe(e)))?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|value| (name.to_string(), value.to_string()))
            })
            .collect();
        let body = response
            .bytes()
            .await
            .map_err(|e| ApiError::Transport(format!("reading body: {}", describe(e))))?
            .to_vec();

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

/// Error text with its source chain, URL stripped.
fn describe(err: reqwest::Error) -> String {
    let err = err.without_url();
    let mut message = err.to_string();
    let mut source = std::error::Error::source(&err);
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

fn header_map(headers: &[(String, String)]) -> Result<HeaderMap, ApiError> {
    let mut map = HeaderMap::with_capacity(headers.len());
    for (name, value) in headers {
        let header_name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| ApiError::RequestConstruction(format!("header {name}: {e}")))?;
        // The value may hold credentials; name the header, not the value.
        let header_value = HeaderValue::from_str(value)
            .map_err(|e| ApiError::RequestConstruction(format!("header {name} value: {e}")))?;
        map.append(header_name, header_value);
    }
    Ok(map)
}

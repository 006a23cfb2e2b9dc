use std::time::Duration;

use crate::error::{PetTracerError, Result};

/// HTTP verbs the portal endpoints use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

/// A fully prepared request, ready to go over the wire.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
    pub timeout: Duration,
}

impl ApiRequest {
    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Executes prepared requests and returns the raw response body.
///
/// The default implementation talks to the real portal over HTTPS;
/// tests substitute a canned transport. Implementations map connection
/// failures, timeouts and non-2xx statuses to
/// [`PetTracerError::Network`].
pub trait Transport {
    fn execute(&self, request: &ApiRequest) -> Result<String>;
}

/// [`Transport`] backed by a blocking `reqwest` client. One instance
/// keeps its connection pool for the lifetime of the owning client.
pub struct HttpTransport {
    inner: reqwest::blocking::Client,
}

impl HttpTransport {
    pub fn new() -> HttpTransport {
        HttpTransport {
            inner: reqwest::blocking::Client::new(),
        }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        HttpTransport::new()
    }
}

impl Transport for HttpTransport {
    fn execute(&self, request: &ApiRequest) -> Result<String> {
        let mut builder = match request.method {
            Method::Get => self.inner.get(&request.url),
            Method::Post => self.inner.post(&request.url),
        };
        builder = builder.timeout(request.timeout);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &request.body {
            builder = builder.body(body.clone());
        }

        let response = builder
            .send()
            .and_then(|response| response.error_for_status())
            .map_err(|err| PetTracerError::Network(Box::new(err)))?;

        response
            .text()
            .map_err(|err| PetTracerError::Network(Box::new(err)))
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::{ApiRequest, Method};

    #[test]
    fn header_lookup_is_case_insensitive() {
        let request = ApiRequest {
            method: Method::Get,
            url: "https://example.net".to_string(),
            headers: vec![("Content-Type".to_string(), "application/json".to_string())],
            body: None,
            timeout: Duration::from_secs(10),
        };

        assert_eq!(request.header("content-type"), Some("application/json"));
        assert_eq!(request.header("CONTENT-TYPE"), Some("application/json"));
        assert_eq!(request.header("authorization"), None);
    }
}

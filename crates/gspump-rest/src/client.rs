//! HTTP seam between the pusher and GeoServer

use std::time::Duration;

use reqwest::StatusCode;
use reqwest::blocking::{Client, RequestBuilder};
use reqwest::header::{CONTENT_TYPE, LOCATION};

use crate::{Result, ServerConfig};

/// What the pusher needs to know about a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestResponse {
    pub status: StatusCode,
    /// `Location` header, sent by GeoServer on 201
    pub location: Option<String>,
    pub body: String,
}

impl RestResponse {
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            location: None,
            body: String::new(),
        }
    }
}

/// A request that never produced a response (connection refused, timeout).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct TransportError {
    pub message: String,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(e: reqwest::Error) -> Self {
        Self::new(e.to_string())
    }
}

/// The four verbs of the REST configuration API.
///
/// URLs are absolute. Implementations authenticate every call.
pub trait RestClient {
    fn get(&self, url: &str) -> std::result::Result<RestResponse, TransportError>;

    fn delete(
        &self,
        url: &str,
        params: &[(String, String)],
    ) -> std::result::Result<RestResponse, TransportError>;

    fn post(
        &self,
        url: &str,
        body: &[u8],
        content_type: &str,
    ) -> std::result::Result<RestResponse, TransportError>;

    fn put(
        &self,
        url: &str,
        body: &[u8],
        content_type: &str,
    ) -> std::result::Result<RestResponse, TransportError>;
}

impl<C: RestClient + ?Sized> RestClient for &C {
    fn get(&self, url: &str) -> std::result::Result<RestResponse, TransportError> {
        (**self).get(url)
    }

    fn delete(
        &self,
        url: &str,
        params: &[(String, String)],
    ) -> std::result::Result<RestResponse, TransportError> {
        (**self).delete(url, params)
    }

    fn post(
        &self,
        url: &str,
        body: &[u8],
        content_type: &str,
    ) -> std::result::Result<RestResponse, TransportError> {
        (**self).post(url, body, content_type)
    }

    fn put(
        &self,
        url: &str,
        body: &[u8],
        content_type: &str,
    ) -> std::result::Result<RestResponse, TransportError> {
        (**self).put(url, body, content_type)
    }
}

/// Blocking reqwest client with basic auth.
pub struct HttpRestClient {
    client: Client,
    username: String,
    password: String,
}

impl HttpRestClient {
    pub fn new(config: &ServerConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            client,
            username: config.username.clone(),
            password: config.password.clone(),
        })
    }

    fn send(&self, request: RequestBuilder) -> std::result::Result<RestResponse, TransportError> {
        let response = request
            .basic_auth(&self.username, Some(&self.password))
            .send()?;
        let status = response.status();
        let location = response
            .headers()
            .get(LOCATION)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let body = response.text().unwrap_or_default();
        Ok(RestResponse {
            status,
            location,
            body,
        })
    }
}

impl RestClient for HttpRestClient {
    fn get(&self, url: &str) -> std::result::Result<RestResponse, TransportError> {
        self.send(self.client.get(url))
    }

    fn delete(
        &self,
        url: &str,
        params: &[(String, String)],
    ) -> std::result::Result<RestResponse, TransportError> {
        self.send(self.client.delete(url).query(params))
    }

    fn post(
        &self,
        url: &str,
        body: &[u8],
        content_type: &str,
    ) -> std::result::Result<RestResponse, TransportError> {
        self.send(
            self.client
                .post(url)
                .header(CONTENT_TYPE, content_type)
                .body(body.to_vec()),
        )
    }

    fn put(
        &self,
        url: &str,
        body: &[u8],
        content_type: &str,
    ) -> std::result::Result<RestResponse, TransportError> {
        self.send(
            self.client
                .put(url)
                .header(CONTENT_TYPE, content_type)
                .body(body.to_vec()),
        )
    }
}

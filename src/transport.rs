//! HTTP dispatch.
//!
//! The transport owns the configured `reqwest::Client`. Base URI, bearer
//! token, accept header, user agent, and timeout are applied exactly once,
//! at construction; every call reuses them read-only.

use std::time::Duration;

use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue, USER_AGENT};
use reqwest::{Method, Response, Url};
use tracing::debug;

use crate::config::ClientConfig;
use crate::endpoints::{HttpMethod, ResolvedCall};
use crate::error::Error;

/// Fixed user agent sent with every request.
const USER_AGENT_VALUE: &str = concat!("cr_api/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone)]
pub(crate) struct Transport {
    http: reqwest::Client,
    base: Url,
}

impl Transport {
    pub(crate) fn new(config: &ClientConfig) -> Result<Self, Error> {
        let base = Url::parse(&config.base_uri).map_err(|e| {
            Error::Configuration(format!("invalid base URI {:?}: {e}", config.base_uri))
        })?;
        if base.cannot_be_a_base() {
            return Err(Error::Configuration(format!(
                "base URI {:?} cannot carry route paths",
                config.base_uri
            )));
        }

        let bearer = HeaderValue::from_str(&format!("Bearer {}", config.token)).map_err(|_| {
            Error::Configuration("API token contains characters not allowed in a header".into())
        })?;
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, bearer);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| Error::Configuration(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { http, base })
    }

    /// Dispatch one resolved call. Exactly one attempt; a timeout or
    /// connection failure surfaces as [`Error::Transport`] with no retry.
    pub(crate) async fn send(
        &self,
        call: &ResolvedCall,
        body: Option<&serde_json::Value>,
    ) -> Result<Response, Error> {
        let url = self.url_for(call)?;
        let method = match call.method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
        };
        debug!(%url, ?method, "dispatching request");

        let mut request = self.http.request(method, url);
        if !call.query.is_empty() {
            request = request.query(&call.query);
        }
        if let Some(body) = body {
            request = request.json(body);
        }
        Ok(request.send().await?)
    }

    /// Join the call's path segments onto the base URI. `Url` percent-
    /// encodes each substituted segment, so a `#`-prefixed tag travels as
    /// `%23...` on the wire.
    fn url_for(&self, call: &ResolvedCall) -> Result<Url, Error> {
        let mut url = self.base.clone();
        {
            let mut path = url.path_segments_mut().map_err(|()| {
                Error::Configuration("base URI cannot carry route paths".into())
            })?;
            path.pop_if_empty();
            path.extend(call.segments.iter().map(String::as_str));
        }
        Ok(url)
    }
}

//! Client configuration and option defaulting.

use crate::error::Error;

/// Default per-request timeout in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 6000;

/// Caller-supplied options. Every field is optional; construction fills the
/// unset ones from [`ApiOptions::defaults`] via [`apply_defaults`].
#[derive(Debug, Clone, Default)]
pub struct ApiOptions {
    /// Timeout for awaiting a response until the call fails with a
    /// transport error. Defaults to 6000 milliseconds.
    pub timeout_ms: Option<u64>,
    /// Reject tags containing characters outside `[0-9A-Z]` locally,
    /// before any network call. Defaults to `false`: malformed tags are
    /// sent through and the service's rejection surfaces as an api error.
    pub validate_tags: Option<bool>,
}

impl ApiOptions {
    /// The built-in defaults every unset field falls back to.
    pub fn defaults() -> Self {
        Self {
            timeout_ms: Some(DEFAULT_TIMEOUT_MS),
            validate_tags: Some(false),
        }
    }
}

/// Fill only the unset fields of `user` from `defaults`. Set fields always
/// win, regardless of argument order.
pub fn apply_defaults(user: ApiOptions, defaults: ApiOptions) -> ApiOptions {
    ApiOptions {
        timeout_ms: user.timeout_ms.or(defaults.timeout_ms),
        validate_tags: user.validate_tags.or(defaults.validate_tags),
    }
}

/// Immutable per-client configuration. Owned by the transport after
/// construction; concurrent calls only ever read it.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_uri: String,
    pub token: String,
    pub timeout_ms: u64,
    pub validate_tags: bool,
}

impl ClientConfig {
    /// Validate and assemble the full configuration. An empty base URI or
    /// token fails here, before any client is built.
    pub fn new(
        base_uri: impl Into<String>,
        token: impl Into<String>,
        options: ApiOptions,
    ) -> Result<Self, Error> {
        let base_uri = base_uri.into();
        let token = token.into();
        if base_uri.trim().is_empty() {
            return Err(Error::Configuration("base URI must not be empty".into()));
        }
        if token.trim().is_empty() {
            return Err(Error::Configuration("API token must not be empty".into()));
        }
        let options = apply_defaults(options, ApiOptions::defaults());
        Ok(Self {
            base_uri,
            token,
            timeout_ms: options.timeout_ms.unwrap_or(DEFAULT_TIMEOUT_MS),
            validate_tags: options.validate_tags.unwrap_or(false),
        })
    }
}

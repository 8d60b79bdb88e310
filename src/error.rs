use thiserror::Error;

/// Everything a [`CrApi`](crate::CrApi) call can fail with.
///
/// There is no internal recovery: every variant propagates straight to the
/// caller, and no call is ever retried.
#[derive(Debug, Error)]
pub enum Error {
    /// The client could not be constructed from the given base URI, token,
    /// or options. Nothing was sent.
    #[error("invalid client configuration: {0}")]
    Configuration(String),

    /// A tag failed the allowed-alphabet check. Only raised when
    /// `validate_tags` is enabled, and always before any network call.
    #[error("tag {tag:?} contains {found:?}, outside the tag alphabet [0-9A-Z]")]
    TagValidation { tag: String, found: char },

    /// No usable response was obtained: connection failure, exceeded
    /// timeout, or a 2xx body that could not be read or decoded. The wrapped
    /// `reqwest::Error` distinguishes these via `is_timeout`, `is_connect`
    /// and `is_decode`.
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),

    /// The service answered with a non-2xx status. `reason` and `message`
    /// carry the upstream error payload verbatim when one was present.
    #[error("api error {status} ({})", .reason.as_deref().unwrap_or("no reason given"))]
    Api {
        status: u16,
        reason: Option<String>,
        message: Option<String>,
    },
}

use thiserror::Error;

/// Errors raised while assembling the Canvas configuration.
///
/// Any of these is fatal: the analyzer refuses to issue a single request
/// without a base URL, a token and a link URL.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Canvas base URL is not configured (set CANVAS_URL)")]
    MissingBaseUrl,

    #[error("Canvas API token is not configured (set CANVAS_TOKEN)")]
    MissingToken,

    #[error("Canvas link URL is not configured (set CANVAS_LINK_URL)")]
    MissingLinkUrl,

    #[error("Error retrieving {0} from system keyring")]
    Keyring(String),
}

/// Failure of a single API call.
///
/// The client never propagates these to its caller: they are rendered
/// through the `ErrorReporter` and the call yields `None`.
#[derive(Debug, Error)]
pub enum RequestError {
    #[error("Request to {url} failed ({status}): {body}")]
    Status { url: String, status: u16, body: String },

    #[error("Request to {url} raised an exception: {message}")]
    Transport { url: String, message: String },

    #[error("Failed to decode response from {url}: {message}")]
    Decode { url: String, message: String },

    #[error("Pagination limit exceeded for {url}: more than {pages} pages")]
    PaginationLimit { url: String, pages: usize },
}

/// Transport-level failure: connection refused, DNS, timeout, unreadable body.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct TransportError(pub String);

impl From<reqwest::Error> for TransportError {
    fn from(error: reqwest::Error) -> Self {
        TransportError(error.to_string())
    }
}

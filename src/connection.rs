// HTTP plumbing shared by every Canvas call: the request method, the raw
// response the client inspects, and the transport that actually sends it.
use crate::error::TransportError;
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::blocking::Client;
use reqwest::header::{CONTENT_TYPE, LINK};
use reqwest::Method;

/// Enumeration representing the types of HTTP request methods.
///
/// The optional JSON payload travels with the method, so a follow-up page
/// request reuses exactly what the first page was sent with.
#[derive(Clone, Debug, PartialEq)]
pub enum HttpMethod {
    Get,
    Put(serde_json::Value),
    Post(serde_json::Value),
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Put(_) => "PUT",
            HttpMethod::Post(_) => "POST",
            HttpMethod::Delete => "DELETE",
        }
    }

    pub fn payload(&self) -> Option<&serde_json::Value> {
        match self {
            HttpMethod::Put(body) | HttpMethod::Post(body) => Some(body),
            HttpMethod::Get | HttpMethod::Delete => None,
        }
    }

    fn to_reqwest(&self) -> Method {
        match self {
            HttpMethod::Get => Method::GET,
            HttpMethod::Put(_) => Method::PUT,
            HttpMethod::Post(_) => Method::POST,
            HttpMethod::Delete => Method::DELETE,
        }
    }
}

/// What the client needs from an HTTP response, already read off the wire.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
    /// Target of the `rel="next"` entry of the `Link` header, if any.
    pub next_link: Option<String>,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends one request and hands back the raw response.
///
/// Status codes are not interpreted here; only failures to get a response
/// at all are errors.
pub trait Transport {
    fn send(&self, method: &HttpMethod, url: &str, token: &str)
        -> Result<RawResponse, TransportError>;
}

/// Blocking `reqwest` transport. The inner client keeps its connection pool
/// for the whole run.
#[derive(Clone, Debug, Default)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self::with_client(Client::new())
    }

    pub fn with_client(client: Client) -> Self {
        ReqwestTransport { client }
    }
}

impl Transport for ReqwestTransport {
    fn send(
        &self,
        method: &HttpMethod,
        url: &str,
        token: &str,
    ) -> Result<RawResponse, TransportError> {
        let request_builder = self
            .client
            .request(method.to_reqwest(), url)
            .bearer_auth(token)
            .header(CONTENT_TYPE, "application/json");
        let request_builder = match method.payload() {
            Some(body) => request_builder.json(body),
            None => request_builder,
        };

        let response = request_builder.send()?;

        let status = response.status().as_u16();
        let next_link = response
            .headers()
            .get_all(LINK)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .find_map(parse_next_link);
        let body = response.text()?;

        Ok(RawResponse {
            status,
            body,
            next_link,
        })
    }
}

static LINK_ENTRY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<([^>]*)>((?:\s*;\s*[^;,]+)*)").expect("valid link regex"));
static REL_PARAM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?i)rel\s*=\s*"?([^";]+)"?"#).expect("valid rel regex"));

/// Extracts the `rel="next"` target from a `Link` header value.
///
/// Canvas sends `<url>; rel="current",<url>; rel="next",...`. A `rel` may hold
/// several space separated relation types.
pub fn parse_next_link(header: &str) -> Option<String> {
    LINK_ENTRY.captures_iter(header).find_map(|entry| {
        let params = entry.get(2).map_or("", |m| m.as_str());
        let is_next = REL_PARAM.captures_iter(params).any(|rel| {
            rel[1]
                .split_whitespace()
                .any(|relation| relation.eq_ignore_ascii_case("next"))
        });
        is_next.then(|| entry[1].trim().to_string())
    })
}

// In-memory stand-ins for the network and the UI, shared by the unit tests.
use crate::connection::{HttpMethod, RawResponse, Transport};
use crate::error::TransportError;
use crate::reporter::ErrorReporter;
use crate::CanvasCredentials;
use serde_json::Value;
use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;

pub const BASE_URL: &str = "https://canvas.test/api/v1";
pub const LINK_URL: &str = "https://canvas.test";

pub fn credentials() -> CanvasCredentials {
    CanvasCredentials {
        url_canvas: BASE_URL.to_string(),
        token_canvas: "test-token".to_string(),
        url_links: LINK_URL.to_string(),
    }
}

#[derive(Clone)]
enum Reply {
    Response(RawResponse),
    Failure(String),
}

struct Scripted {
    reply: Reply,
    forever: bool,
}

/// Transport answering from a per-URL script. Unscripted URLs get a 404,
/// like Canvas does for unknown resources.
#[derive(Default)]
pub struct FakeTransport {
    routes: RefCell<HashMap<String, VecDeque<Scripted>>>,
    log: RefCell<Vec<(HttpMethod, String)>>,
}

impl FakeTransport {
    fn push(&self, url: &str, reply: Reply, forever: bool) {
        self.routes
            .borrow_mut()
            .entry(url.to_string())
            .or_default()
            .push_back(Scripted { reply, forever });
    }

    fn page(body: &Value, next: Option<&str>) -> Reply {
        Reply::Response(RawResponse {
            status: 200,
            body: body.to_string(),
            next_link: next.map(String::from),
        })
    }

    pub fn respond_json(&self, endpoint: &str, body: Value) {
        self.respond_page(endpoint, body, None);
    }

    pub fn respond_page(&self, endpoint: &str, body: Value, next: Option<&str>) {
        self.respond_page_url(&format!("{}{}", BASE_URL, endpoint), body, next);
    }

    pub fn respond_page_url(&self, url: &str, body: Value, next: Option<&str>) {
        self.push(url, Self::page(&body, next), false);
    }

    pub fn respond_forever_url(&self, url: &str, body: Value, next: Option<&str>) {
        self.push(url, Self::page(&body, next), true);
    }

    pub fn respond_raw(&self, endpoint: &str, status: u16, body: &str) {
        self.respond_status_url(&format!("{}{}", BASE_URL, endpoint), status, body);
    }

    pub fn respond_status_url(&self, url: &str, status: u16, body: &str) {
        let reply = Reply::Response(RawResponse {
            status,
            body: body.to_string(),
            next_link: None,
        });
        self.push(url, reply, false);
    }

    pub fn respond_error(&self, endpoint: &str, error: TransportError) {
        self.push(&format!("{}{}", BASE_URL, endpoint), Reply::Failure(error.0), false);
    }

    /// `"METHOD url"` for every request sent so far.
    pub fn calls(&self) -> Vec<String> {
        self.log
            .borrow()
            .iter()
            .map(|(method, url)| format!("{} {}", method.as_str(), url))
            .collect()
    }

    pub fn methods(&self) -> Vec<HttpMethod> {
        self.log.borrow().iter().map(|(method, _)| method.clone()).collect()
    }
}

impl Transport for FakeTransport {
    fn send(
        &self,
        method: &HttpMethod,
        url: &str,
        token: &str,
    ) -> Result<RawResponse, TransportError> {
        assert_eq!(token, "test-token");
        self.log.borrow_mut().push((method.clone(), url.to_string()));

        let mut routes = self.routes.borrow_mut();
        let reply = routes.get_mut(url).and_then(|queue| {
            if queue.front()?.forever {
                queue.front().map(|scripted| scripted.reply.clone())
            } else {
                queue.pop_front().map(|scripted| scripted.reply)
            }
        });

        match reply {
            Some(Reply::Response(response)) => Ok(response),
            Some(Reply::Failure(message)) => Err(TransportError(message)),
            None => Ok(RawResponse {
                status: 404,
                body: r#"{"errors":[{"message":"The specified resource does not exist."}]}"#
                    .to_string(),
                next_link: None,
            }),
        }
    }
}

/// Reporter that keeps every message for later assertions. Clones share
/// the same storage.
#[derive(Clone, Default)]
pub struct RecordingReporter {
    errors: Rc<RefCell<Vec<String>>>,
    warnings: Rc<RefCell<Vec<String>>>,
}

impl RecordingReporter {
    pub fn messages(&self) -> Vec<String> {
        self.errors.borrow().clone()
    }

    pub fn warnings(&self) -> Vec<String> {
        self.warnings.borrow().clone()
    }
}

impl ErrorReporter for RecordingReporter {
    fn report(&self, message: &str) {
        self.errors.borrow_mut().push(message.to_string());
    }

    fn warn(&self, message: &str) {
        self.warnings.borrow_mut().push(message.to_string());
    }
}

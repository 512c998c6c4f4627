use crate::assignment::{Assignment, AssignmentSummary};
use crate::connection::{HttpMethod, ReqwestTransport, Transport};
use crate::course::{Account, Course};
use crate::error::{ConfigError, RequestError};
use crate::reporter::{ErrorReporter, LogReporter};
use crate::CanvasCredentials;
use log::debug;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Upper bound on the pages a single paginated call may follow.
pub const DEFAULT_MAX_PAGES: usize = 1000;

/// Main interface for talking to the Canvas REST API.
///
/// `CanvasClient` owns the credentials, the transport (one connection pool
/// for the whole run) and the reporter that receives every failure. Calls
/// never return errors: a failed call is reported and yields `None`, so a
/// broken assignment never stops its siblings from being analyzed.
///
/// Example:
/// ```no_run
/// use canvas_rubric_analyzer::{CanvasClient, CanvasCredentials};
///
/// let credentials = CanvasCredentials::credentials().expect("configured");
/// let client = CanvasClient::new(credentials).expect("base URL set");
/// if let Some(course) = client.fetch_course(123) {
///     println!("{:?}", course.name);
/// }
/// ```
pub struct CanvasClient<T: Transport = ReqwestTransport> {
    credentials: CanvasCredentials,
    transport: T,
    reporter: Box<dyn ErrorReporter>,
    max_pages: usize,
}

impl CanvasClient<ReqwestTransport> {
    /// Client over a fresh `reqwest` connection pool, reporting through `log`.
    pub fn new(credentials: CanvasCredentials) -> Result<Self, ConfigError> {
        CanvasClient::with_transport(credentials, ReqwestTransport::new(), Box::new(LogReporter))
    }
}

impl<T: Transport> CanvasClient<T> {
    /// Fails with a `ConfigError` (base URL first) before any request can be made.
    pub fn with_transport(
        credentials: CanvasCredentials,
        transport: T,
        reporter: Box<dyn ErrorReporter>,
    ) -> Result<Self, ConfigError> {
        credentials.validate()?;
        Ok(CanvasClient {
            credentials,
            transport,
            reporter,
            max_pages: DEFAULT_MAX_PAGES,
        })
    }

    pub fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = max_pages.max(1);
        self
    }

    pub fn credentials(&self) -> &CanvasCredentials {
        &self.credentials
    }

    pub fn reporter(&self) -> &dyn ErrorReporter {
        self.reporter.as_ref()
    }

    #[cfg(test)]
    pub(crate) fn transport_for_tests(&self) -> &T {
        &self.transport
    }

    /// Sends `method` to `base URL + endpoint`.
    ///
    /// With `paginated` the body of every page must be a JSON array; pages
    /// are followed through their `rel="next"` links and the elements are
    /// returned, in order, as one JSON array. Any failure is reported once
    /// and gives `None`.
    pub fn request(&self, method: HttpMethod, endpoint: &str, paginated: bool) -> Option<Value> {
        match self.try_request(&method, endpoint, paginated) {
            Ok(data) => Some(data),
            Err(e) => {
                self.reporter.report(&e.to_string());
                None
            }
        }
    }

    /// Same as [`request`](Self::request) but hands the error back instead of reporting it.
    pub fn try_request(
        &self,
        method: &HttpMethod,
        endpoint: &str,
        paginated: bool,
    ) -> Result<Value, RequestError> {
        let mut url = format!("{}{}", self.credentials.url_canvas, endpoint);
        let mut results = Vec::new();
        let mut pages = 0;

        loop {
            debug!("{} {}", method.as_str(), url);
            let response = self
                .transport
                .send(method, &url, &self.credentials.token_canvas)
                .map_err(|e| RequestError::Transport {
                    url: url.clone(),
                    message: e.to_string(),
                })?;

            if !response.is_success() {
                return Err(RequestError::Status {
                    url,
                    status: response.status,
                    body: response.body,
                });
            }

            let data: Value =
                serde_json::from_str(&response.body).map_err(|e| RequestError::Decode {
                    url: url.clone(),
                    message: e.to_string(),
                })?;

            if !paginated {
                return Ok(data);
            }

            match data {
                Value::Array(items) => results.extend(items),
                other => {
                    return Err(RequestError::Decode {
                        url,
                        message: format!("expected a JSON array page, got {}", json_kind(&other)),
                    })
                }
            }
            pages += 1;

            match response.next_link {
                Some(_) if pages >= self.max_pages => {
                    return Err(RequestError::PaginationLimit {
                        url: format!("{}{}", self.credentials.url_canvas, endpoint),
                        pages: self.max_pages,
                    })
                }
                Some(next) => url = next,
                None => {
                    debug!("{} items in {} page(s) from {}", results.len(), pages, endpoint);
                    return Ok(Value::Array(results));
                }
            }
        }
    }

    /// GET `endpoint` and decode the body into `D`, reporting decode failures.
    fn get_as<D: DeserializeOwned>(&self, endpoint: &str) -> Option<D> {
        let data = self.request(HttpMethod::Get, endpoint, false)?;
        self.decode(endpoint, data)
    }

    /// Decodes an already fetched JSON value, reporting failures against `endpoint`.
    pub fn decode<D: DeserializeOwned>(&self, endpoint: &str, data: Value) -> Option<D> {
        match serde_json::from_value(data) {
            Ok(value) => Some(value),
            Err(e) => {
                let error = RequestError::Decode {
                    url: format!("{}{}", self.credentials.url_canvas, endpoint),
                    message: e.to_string(),
                };
                self.reporter.report(&error.to_string());
                None
            }
        }
    }

    pub fn fetch_course(&self, course_id: u64) -> Option<Course> {
        self.get_as(&format!("/courses/{}", course_id))
    }

    pub fn fetch_account(&self, account_id: u64) -> Option<Account> {
        self.get_as(&format!("/accounts/{}", account_id))
    }

    /// Every page of the course assignment list, left undecoded so each entry
    /// can fail on its own.
    pub fn fetch_assignments(&self, course_id: u64) -> Option<Vec<Value>> {
        match self.request(
            HttpMethod::Get,
            &format!("/courses/{}/assignments", course_id),
            true,
        )? {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn decode_assignment_summary(&self, course_id: u64, entry: Value) -> Option<AssignmentSummary> {
        self.decode(&format!("/courses/{}/assignments", course_id), entry)
    }

    pub fn fetch_assignment(&self, course_id: u64, assignment_id: u64) -> Option<Assignment> {
        self.get_as(&format!(
            "/courses/{}/assignments/{}",
            course_id, assignment_id
        ))
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TransportError;
    use crate::test_support::{credentials, FakeTransport, RecordingReporter, BASE_URL};
    use serde_json::json;

    fn build(transport: FakeTransport, reporter: &RecordingReporter) -> CanvasClient<FakeTransport> {
        CanvasClient::with_transport(credentials(), transport, Box::new(reporter.clone())).unwrap()
    }

    #[test]
    fn test_missing_base_url_is_a_config_error() {
        let mut credentials = credentials();
        credentials.url_canvas = String::new();

        let result = CanvasClient::with_transport(
            credentials,
            FakeTransport::default(),
            Box::new(RecordingReporter::default()),
        );
        assert!(matches!(result, Err(ConfigError::MissingBaseUrl)));
    }

    #[test]
    fn test_missing_token_or_link_url_is_a_config_error() {
        let mut no_token = credentials();
        no_token.token_canvas = "  ".to_string();
        let mut no_link = credentials();
        no_link.url_links = String::new();

        let result = CanvasClient::with_transport(
            no_token,
            FakeTransport::default(),
            Box::new(RecordingReporter::default()),
        );
        assert!(matches!(result, Err(ConfigError::MissingToken)));

        let result = CanvasClient::with_transport(
            no_link,
            FakeTransport::default(),
            Box::new(RecordingReporter::default()),
        );
        assert!(matches!(result, Err(ConfigError::MissingLinkUrl)));
    }

    #[test]
    fn test_single_request_returns_body() {
        let transport = FakeTransport::default();
        transport.respond_json("/courses/42", json!({"id": 42, "name": "Cálculo I"}));
        let reporter = RecordingReporter::default();
        let client = build(transport, &reporter);

        let course = client.request(HttpMethod::Get, "/courses/42", false).unwrap();
        assert_eq!(course["name"], "Cálculo I");
        assert!(reporter.messages().is_empty());
        assert_eq!(client.transport.calls(), vec![format!("GET {}/courses/42", BASE_URL)]);
    }

    #[test]
    fn test_paginated_request_follows_next_links_in_order() {
        let transport = FakeTransport::default();
        let page2 = format!("{}/courses/1/assignments?page=2", BASE_URL);
        let page3 = format!("{}/courses/1/assignments?page=3", BASE_URL);
        transport.respond_page("/courses/1/assignments", json!([{"id": 1}, {"id": 2}]), Some(&page2));
        transport.respond_page_url(&page2, json!([{"id": 3}, {"id": 4}]), Some(&page3));
        transport.respond_page_url(&page3, json!([{"id": 5}, {"id": 6}]), None);
        let reporter = RecordingReporter::default();
        let client = build(transport, &reporter);

        let items = client.fetch_assignments(1).unwrap();
        let ids: Vec<u64> = items.iter().map(|i| i["id"].as_u64().unwrap()).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(client.transport.calls().len(), 3);
        assert_eq!(client.transport.calls()[2], format!("GET {}", page3));
        assert!(reporter.messages().is_empty());
    }

    #[test]
    fn test_next_page_reuses_method_and_payload() {
        let transport = FakeTransport::default();
        let page2 = format!("{}/search?page=2", BASE_URL);
        transport.respond_page("/search", json!(["a"]), Some(&page2));
        transport.respond_page_url(&page2, json!(["b"]), None);
        let reporter = RecordingReporter::default();
        let client = build(transport, &reporter);

        let payload = json!({"query": "rubric"});
        let items = client
            .request(HttpMethod::Post(payload.clone()), "/search", true)
            .unwrap();
        assert_eq!(items, json!(["a", "b"]));
        let methods = client.transport.methods();
        assert_eq!(methods, vec![HttpMethod::Post(payload.clone()), HttpMethod::Post(payload)]);
    }

    #[test]
    fn test_not_found_reports_once_and_returns_none() {
        let reporter = RecordingReporter::default();
        let client = build(FakeTransport::default(), &reporter);

        assert!(client.request(HttpMethod::Get, "/courses/404", false).is_none());
        assert_eq!(reporter.messages().len(), 1);
        assert!(reporter.messages()[0].contains("(404)"));

        let reporter = RecordingReporter::default();
        let client = build(FakeTransport::default(), &reporter);
        assert!(client.request(HttpMethod::Get, "/courses/404/assignments", true).is_none());
        assert_eq!(reporter.messages().len(), 1);
    }

    #[test]
    fn test_error_on_second_page_discards_partial_results() {
        let transport = FakeTransport::default();
        let page2 = format!("{}/courses/1/assignments?page=2", BASE_URL);
        transport.respond_page("/courses/1/assignments", json!([{"id": 1}]), Some(&page2));
        transport.respond_status_url(&page2, 500, "Internal Server Error");
        let reporter = RecordingReporter::default();
        let client = build(transport, &reporter);

        assert!(client.fetch_assignments(1).is_none());
        assert_eq!(reporter.messages().len(), 1);
        assert!(reporter.messages()[0].contains("(500): Internal Server Error"));
    }

    #[test]
    fn test_transport_failure_reports_exception_text() {
        let transport = FakeTransport::default();
        transport.respond_error("/courses/5", TransportError("dns error: no such host".into()));
        let reporter = RecordingReporter::default();
        let client = build(transport, &reporter);

        assert!(client.fetch_course(5).is_none());
        assert_eq!(reporter.messages().len(), 1);
        assert!(reporter.messages()[0].contains("dns error: no such host"));
    }

    #[test]
    fn test_pagination_limit_stops_runaway_server() {
        let transport = FakeTransport::default();
        let looping = format!("{}/courses/1/assignments?page=again", BASE_URL);
        transport.respond_page("/courses/1/assignments", json!([{"id": 1}]), Some(&looping));
        transport.respond_forever_url(&looping, json!([{"id": 2}]), Some(&looping));
        let reporter = RecordingReporter::default();
        let client = build(transport, &reporter).with_max_pages(5);

        let error = client
            .try_request(&HttpMethod::Get, "/courses/1/assignments", true)
            .unwrap_err();
        assert!(matches!(error, RequestError::PaginationLimit { pages: 5, .. }));
        assert_eq!(client.transport.calls().len(), 5);
    }

    #[test]
    fn test_non_array_page_is_a_decode_error() {
        let transport = FakeTransport::default();
        transport.respond_json("/courses/1/assignments", json!({"errors": []}));
        let reporter = RecordingReporter::default();
        let client = build(transport, &reporter);

        assert!(client.fetch_assignments(1).is_none());
        assert_eq!(reporter.messages().len(), 1);
        assert!(reporter.messages()[0].contains("got an object"));
    }

    #[test]
    fn test_invalid_json_body_is_reported() {
        let transport = FakeTransport::default();
        transport.respond_raw("/accounts/3", 200, "<html>maintenance</html>");
        let reporter = RecordingReporter::default();
        let client = build(transport, &reporter);

        assert!(client.fetch_account(3).is_none());
        assert_eq!(reporter.messages().len(), 1);
        assert!(reporter.messages()[0].starts_with("Failed to decode response"));
    }

    #[test]
    fn test_typed_decode_failure_is_reported() {
        let transport = FakeTransport::default();
        transport.respond_json("/courses/9", json!({"name": "missing id"}));
        let reporter = RecordingReporter::default();
        let client = build(transport, &reporter);

        assert!(client.fetch_course(9).is_none());
        assert_eq!(reporter.messages().len(), 1);
    }
}

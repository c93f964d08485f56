//! [`MockRestClient`]: an in-memory stand-in for GeoServer.

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};

use gspump_rest::{RestClient, RestResponse, StatusCode, TransportError};

/// HTTP verb of a recorded call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verb {
    Get,
    Post,
    Put,
    Delete,
}

impl std::fmt::Display for Verb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        };
        write!(f, "{}", name)
    }
}

/// One request as the client saw it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub verb: Verb,
    pub url: String,
    pub params: Vec<(String, String)>,
    pub body: Vec<u8>,
    pub content_type: Option<String>,
}

impl RecordedCall {
    /// `"VERB url"`, handy for asserting call order.
    pub fn line(&self) -> String {
        format!("{} {}", self.verb, self.url)
    }

    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

type Scripted = Result<StatusCode, TransportError>;

/// Records every call and answers from a script.
///
/// Unscripted calls get the answers of an empty server that accepts
/// everything: GET 404, POST 201, PUT 200, DELETE 200.
///
/// # Example
///
/// ```rust,no_run
/// use gspump_test_utils::{MockRestClient, Verb};
/// use gspump_rest::StatusCode;
///
/// let client = MockRestClient::new()
///     .respond(Verb::Get, "http://gs/rest/styles/point.sld", StatusCode::OK);
/// ```
#[derive(Debug, Default)]
pub struct MockRestClient {
    scripts: RefCell<HashMap<(Verb, String), VecDeque<Scripted>>>,
    calls: RefCell<Vec<RecordedCall>>,
}

impl MockRestClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a status for the next `verb` on `url`.
    ///
    /// Queued answers are consumed in order; once the queue is drained
    /// the defaults apply again.
    pub fn respond(self, verb: Verb, url: &str, status: StatusCode) -> Self {
        self.enqueue(verb, url, Ok(status));
        self
    }

    /// Make the next `verb` on `url` fail without a response.
    pub fn fail(self, verb: Verb, url: &str) -> Self {
        self.enqueue(verb, url, Err(TransportError::new("connection refused")));
        self
    }

    fn enqueue(&self, verb: Verb, url: &str, answer: Scripted) {
        self.scripts
            .borrow_mut()
            .entry((verb, url.to_string()))
            .or_default()
            .push_back(answer);
    }

    /// All calls so far, in order.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.borrow().clone()
    }

    /// `"VERB url"` for every call so far.
    pub fn call_lines(&self) -> Vec<String> {
        self.calls.borrow().iter().map(RecordedCall::line).collect()
    }

    /// Calls using `verb`.
    pub fn calls_with(&self, verb: Verb) -> Vec<RecordedCall> {
        self.calls
            .borrow()
            .iter()
            .filter(|call| call.verb == verb)
            .cloned()
            .collect()
    }

    fn answer(
        &self,
        verb: Verb,
        url: &str,
        params: &[(String, String)],
        body: &[u8],
        content_type: Option<&str>,
    ) -> Result<RestResponse, TransportError> {
        self.calls.borrow_mut().push(RecordedCall {
            verb,
            url: url.to_string(),
            params: params.to_vec(),
            body: body.to_vec(),
            content_type: content_type.map(str::to_string),
        });

        let scripted = self
            .scripts
            .borrow_mut()
            .get_mut(&(verb, url.to_string()))
            .and_then(VecDeque::pop_front);
        let status = match scripted {
            Some(answer) => answer?,
            None => default_status(verb),
        };

        let mut response = RestResponse::new(status);
        if status == StatusCode::CREATED {
            response.location = Some(url.to_string());
        }
        if !status.is_success() {
            response.body = format!("{} refused by mock", verb);
        }
        Ok(response)
    }
}

fn default_status(verb: Verb) -> StatusCode {
    match verb {
        Verb::Get => StatusCode::NOT_FOUND,
        Verb::Post => StatusCode::CREATED,
        Verb::Put | Verb::Delete => StatusCode::OK,
    }
}

impl RestClient for MockRestClient {
    fn get(&self, url: &str) -> Result<RestResponse, TransportError> {
        self.answer(Verb::Get, url, &[], &[], None)
    }

    fn delete(
        &self,
        url: &str,
        params: &[(String, String)],
    ) -> Result<RestResponse, TransportError> {
        self.answer(Verb::Delete, url, params, &[], None)
    }

    fn post(
        &self,
        url: &str,
        body: &[u8],
        content_type: &str,
    ) -> Result<RestResponse, TransportError> {
        self.answer(Verb::Post, url, &[], body, Some(content_type))
    }

    fn put(
        &self,
        url: &str,
        body: &[u8],
        content_type: &str,
    ) -> Result<RestResponse, TransportError> {
        self.answer(Verb::Put, url, &[], body, Some(content_type))
    }
}

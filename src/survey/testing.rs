use serde_json::Value;
use std::cell::RefCell;

use crate::error::{Result, SurveyError};
use crate::remote::{RawResponse, SurveyTransport};

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: &'static str,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

/// Replays one canned reply for every call and records what was sent.
pub struct FakeTransport {
    reply: std::result::Result<RawResponse, String>,
    requests: RefCell<Vec<RecordedRequest>>,
}

impl FakeTransport {
    pub fn replying(status: u16, body: &str) -> Self {
        Self {
            reply: Ok(RawResponse {
                status,
                body: body.to_string(),
            }),
            requests: RefCell::new(Vec::new()),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            reply: Err(message.to_string()),
            requests: RefCell::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.requests.borrow().len()
    }

    pub fn last_request(&self) -> Option<RecordedRequest> {
        self.requests.borrow().last().cloned()
    }

    fn respond(&self, request: RecordedRequest) -> Result<RawResponse> {
        self.requests.borrow_mut().push(request);
        self.reply.clone().map_err(SurveyError::Transport)
    }
}

impl SurveyTransport for FakeTransport {
    fn get(&self, path: &str, query: &[(&str, &str)]) -> Result<RawResponse> {
        self.respond(RecordedRequest {
            method: "GET",
            path: path.to_string(),
            query: query
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            body: None,
        })
    }

    fn post(&self, path: &str, body: &Value) -> Result<RawResponse> {
        self.respond(RecordedRequest {
            method: "POST",
            path: path.to_string(),
            query: Vec::new(),
            body: Some(body.clone()),
        })
    }
}

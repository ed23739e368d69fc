use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use serde_json::Value;

use super::{HttpRequest, HttpResponse, Transport};
use crate::errors::{KvError, Result};

/// Replays queued responses in order and records every request.
pub(crate) struct ScriptedTransport {
    responses: Mutex<VecDeque<Result<HttpResponse>>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl ScriptedTransport {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub(crate) fn push(&self, response: HttpResponse) {
        self.responses.lock().unwrap().push_back(Ok(response));
    }

    pub(crate) fn push_json(&self, status: u16, body: Value) {
        self.push(HttpResponse::new(status, body.to_string()));
    }

    pub(crate) fn push_failure(&self, message: &str) {
        self.responses
            .lock()
            .unwrap()
            .push_back(Err(KvError::Transport(message.to_string())));
    }

    pub(crate) fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl Transport for ScriptedTransport {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse> {
        self.requests.lock().unwrap().push(request.clone());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| panic!("no scripted response for {} {}", request.method, request.url))
    }
}

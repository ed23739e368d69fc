//! Blocking HTTP plumbing shared by every Azure client.
//!
//! All requests go through the [`Transport`] trait so the clients can be
//! exercised against an in-memory fake. [`ApiClient`] layers bearer-token
//! authorization, the user agent header and ARM-style error decoding on top.

mod ureq_transport;

#[cfg(test)]
pub(crate) mod testing;

use std::fmt;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;
use zeroize::Zeroizing;

use crate::auth::Authorizer;
use crate::errors::{KvError, Result};

pub use ureq_transport::UreqTransport;

/// Value sent in the `User-Agent` header of every request.
pub fn user_agent() -> String {
    format!("kvprov/{}", env!("CARGO_PKG_VERSION"))
}

/// HTTP verbs used by the ARM and Key Vault APIs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Put,
    Post,
    Delete,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verb = match self {
            Self::Get => "GET",
            Self::Put => "PUT",
            Self::Post => "POST",
            Self::Delete => "DELETE",
        };
        f.write_str(verb)
    }
}

/// Request payload. Form values may carry credentials and are wiped on drop.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Empty,
    Json(Value),
    Form(Vec<(String, Zeroizing<String>)>),
}

impl RequestBody {
    /// Value of the named form field, if this is a form body.
    pub fn form_value(&self, name: &str) -> Option<&str> {
        match self {
            Self::Form(pairs) => pairs
                .iter()
                .find(|(k, _)| k == name)
                .map(|(_, v)| v.as_str()),
            _ => None,
        }
    }
}

/// A fully resolved request. `url` already carries its query string.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: RequestBody,
}

impl HttpRequest {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: Vec::new(),
            body: RequestBody::Empty,
        }
    }

    pub fn header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.push((name.to_string(), value.into()));
        self
    }

    pub fn body(mut self, body: RequestBody) -> Self {
        self.body = body;
        self
    }

    /// Look up a header value (case-insensitive).
    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Status and raw body of a response. Non-2xx statuses are not errors here.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Decode the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_str(&self.body).map_err(|e| {
            KvError::SerializationError(format!("failed to decode response body: {e}"))
        })
    }
}

/// A blocking HTTP transport.
///
/// Implementations only fail for transport-level problems (DNS, TLS,
/// timeouts). Any HTTP status is returned as a response.
pub trait Transport: Send + Sync {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse>;
}

/// Turn a non-2xx response into a [`KvError::RemoteApi`].
///
/// Both ARM and the Key Vault data plane answer with
/// `{"error": {"code": ..., "message": ...}}`.
pub fn api_error(response: &HttpResponse) -> KvError {
    let parsed: Option<Value> = serde_json::from_str(&response.body).ok();
    let err = parsed
        .as_ref()
        .map(|body| body.get("error").or_else(|| body.get("Error")).unwrap_or(body));

    let code = err
        .and_then(|e| e.get("code"))
        .and_then(Value::as_str)
        .unwrap_or("Unknown")
        .to_string();
    let message = err
        .and_then(|e| e.get("message"))
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| {
            let raw = response.body.trim();
            if raw.is_empty() {
                "unknown error".to_string()
            } else {
                raw.to_string()
            }
        });

    KvError::RemoteApi {
        status: response.status,
        code,
        message,
    }
}

/// Authorized client for one API surface (management or data plane).
#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn Transport>,
    authorizer: Arc<dyn Authorizer>,
}

impl ApiClient {
    /// Build a client, obtaining one token up front so a broken authorizer
    /// fails here rather than on the first request.
    pub fn new(transport: Arc<dyn Transport>, authorizer: Arc<dyn Authorizer>) -> Result<Self> {
        authorizer.bearer_token()?;
        Ok(Self {
            transport,
            authorizer,
        })
    }

    /// Send an authorized request and return the response whatever its status.
    pub fn send(&self, method: Method, url: &str, body: RequestBody) -> Result<HttpResponse> {
        let token = self.authorizer.bearer_token()?;
        tracing::debug!(%method, url, "azure request");

        let request = HttpRequest::new(method, url)
            .header("Authorization", format!("Bearer {token}"))
            .header("User-Agent", user_agent())
            .header("Accept", "application/json")
            .body(body);

        let response = self.transport.send(&request)?;
        tracing::debug!(%method, url, status = response.status, "azure response");
        Ok(response)
    }

    /// Send a request and decode a 2xx JSON body.
    pub fn call<T: DeserializeOwned>(
        &self,
        method: Method,
        url: &str,
        body: RequestBody,
    ) -> Result<T> {
        let response = self.send(method, url, body)?;
        if !response.is_success() {
            return Err(api_error(&response));
        }
        response.json()
    }

    /// Send a request whose body is irrelevant; returns the 2xx status.
    pub fn call_status(&self, method: Method, url: &str, body: RequestBody) -> Result<u16> {
        let response = self.send(method, url, body)?;
        if !response.is_success() {
            return Err(api_error(&response));
        }
        Ok(response.status)
    }
}

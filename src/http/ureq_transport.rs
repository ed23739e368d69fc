use std::time::Duration;

use ureq::typestate::WithBody;
use ureq::RequestBuilder;

use super::{HttpRequest, HttpResponse, Method, RequestBody, Transport};
use crate::errors::{KvError, Result};

/// [`Transport`] backed by a blocking `ureq` agent.
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    /// Build a transport. `timeout` bounds each whole request; `None` keeps
    /// the agent default.
    pub fn new(timeout: Option<Duration>) -> Self {
        let config = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(timeout)
            .build();
        Self {
            agent: ureq::Agent::new_with_config(config),
        }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new(None)
    }
}

impl Transport for UreqTransport {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse> {
        let url = request.url.as_str();
        let result = match request.method {
            Method::Get => with_headers(self.agent.get(url), &request.headers).call(),
            Method::Delete => with_headers(self.agent.delete(url), &request.headers).call(),
            Method::Put => send_body(
                with_headers(self.agent.put(url), &request.headers),
                &request.body,
            ),
            Method::Post => send_body(
                with_headers(self.agent.post(url), &request.headers),
                &request.body,
            ),
        };

        let mut response = result
            .map_err(|e| KvError::Transport(format!("{} {}: {e}", request.method, request.url)))?;

        let status = response.status().as_u16();
        let body = response.body_mut().read_to_string().map_err(|e| {
            KvError::Transport(format!(
                "{} {}: failed to read body: {e}",
                request.method, request.url
            ))
        })?;

        Ok(HttpResponse { status, body })
    }
}

fn with_headers<B>(mut builder: RequestBuilder<B>, headers: &[(String, String)]) -> RequestBuilder<B> {
    for (name, value) in headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    builder
}

fn send_body(
    builder: RequestBuilder<WithBody>,
    body: &RequestBody,
) -> std::result::Result<ureq::http::Response<ureq::Body>, ureq::Error> {
    match body {
        RequestBody::Empty => builder.send_empty(),
        RequestBody::Json(value) => builder.send_json(value),
        RequestBody::Form(pairs) => {
            builder.send_form(pairs.iter().map(|(k, v)| (k.as_str(), v.as_str())))
        }
    }
}


#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;
    use wiremock::matchers::{body_json, body_string_contains, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};
    use zeroize::Zeroizing;

    use super::*;
    use crate::auth::StaticToken;
    use crate::http::{api_error, user_agent, ApiClient};

    /// Run a blocking call off the runtime thread that drives the mock server.
    async fn blocking<T: Send + 'static>(f: impl FnOnce() -> T + Send + 'static) -> T {
        tokio::task::spawn_blocking(f).await.unwrap()
    }

    fn client() -> ApiClient {
        ApiClient::new(
            Arc::new(UreqTransport::new(Some(Duration::from_secs(5)))),
            Arc::new(StaticToken::new("tok-1")),
        )
        .unwrap()
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn get_sends_bearer_and_user_agent() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/subscriptions/sub-1/resourceGroups/rg/providers/Microsoft.KeyVault/vaults/v1"))
            .and(header("Authorization", "Bearer tok-1"))
            .and(header("User-Agent", user_agent().as_str()))
            .and(header("Accept", "application/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"name": "v1"})))
            .expect(1)
            .mount(&server)
            .await;

        let url = format!(
            "{}/subscriptions/sub-1/resourceGroups/rg/providers/Microsoft.KeyVault/vaults/v1?api-version=2018-02-14",
            server.uri()
        );
        let response = blocking(move || client().send(Method::Get, &url, RequestBody::Empty))
            .await
            .unwrap();

        assert_eq!(response.status, 200);
        assert_eq!(response.json::<serde_json::Value>().unwrap()["name"], "v1");
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn put_sends_json_body() {
        let server = MockServer::start().await;
        let payload = json!({"location": "westus2", "properties": {"sku": {"name": "standard"}}});
        Mock::given(method("PUT"))
            .and(path("/vaults/v1"))
            .and(body_json(payload.clone()))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({"name": "v1"})))
            .expect(1)
            .mount(&server)
            .await;

        let url = format!("{}/vaults/v1", server.uri());
        let response = blocking(move || client().send(Method::Put, &url, RequestBody::Json(payload)))
            .await
            .unwrap();

        assert_eq!(response.status, 201);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn post_sends_urlencoded_form() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/tenant-1/oauth2/v2.0/token"))
            .and(body_string_contains("grant_type=client_credentials"))
            .and(body_string_contains("client_secret=a%2Bb%26c"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"access_token": "t"})))
            .expect(1)
            .mount(&server)
            .await;

        let request = HttpRequest::new(Method::Post, format!("{}/tenant-1/oauth2/v2.0/token", server.uri()))
            .body(RequestBody::Form(vec![
                ("grant_type".into(), Zeroizing::new("client_credentials".into())),
                ("client_secret".into(), Zeroizing::new("a+b&c".into())),
            ]));
        let response = blocking(move || UreqTransport::default().send(&request))
            .await
            .unwrap();

        assert_eq!(response.status, 200);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn error_status_is_a_response_not_a_transport_error() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/resourcegroups/rg"))
            .respond_with(ResponseTemplate::new(403).set_body_json(json!({
                "error": {"code": "AuthorizationFailed", "message": "no access"}
            })))
            .mount(&server)
            .await;

        let url = format!("{}/resourcegroups/rg", server.uri());
        let response = blocking(move || client().send(Method::Delete, &url, RequestBody::Empty))
            .await
            .unwrap();

        assert_eq!(response.status, 403);
        let err = api_error(&response);
        assert!(err.is_forbidden());
        assert!(matches!(err, KvError::RemoteApi { ref code, .. } if code == "AuthorizationFailed"));
    }

    #[test]
    fn unreachable_host_is_a_transport_error() {
        let port = std::net::TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();
        let url = format!("http://127.0.0.1:{port}/anything");

        let err = UreqTransport::new(Some(Duration::from_secs(2)))
            .send(&HttpRequest::new(Method::Get, url))
            .unwrap_err();

        assert!(matches!(err, KvError::Transport(_)));
    }
}

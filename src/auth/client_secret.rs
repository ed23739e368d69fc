use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;
use zeroize::Zeroizing;

use super::{Authorizer, Resource, TokenCache};
use crate::errors::{KvError, Result};
use crate::http::{HttpRequest, Method, RequestBody, Transport};

/// Token response of the v2 client-credentials endpoint.
#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default = "default_expires_in")]
    expires_in: u64,
}

fn default_expires_in() -> u64 {
    3600
}

/// Service principal credential (client id + client secret).
pub struct ClientSecretCredential {
    token_url: String,
    client_id: String,
    client_secret: Zeroizing<String>,
    resource: Resource,
    transport: Arc<dyn Transport>,
    cache: TokenCache,
}

impl ClientSecretCredential {
    pub fn new(
        login_endpoint: &str,
        tenant_id: &str,
        client_id: &str,
        client_secret: Zeroizing<String>,
        resource: Resource,
        transport: Arc<dyn Transport>,
    ) -> Result<Self> {
        if tenant_id.is_empty() {
            return Err(KvError::Authorizer("tenant id is required".into()));
        }
        if client_id.is_empty() {
            return Err(KvError::Authorizer("client id is required".into()));
        }
        if client_secret.is_empty() {
            return Err(KvError::Authorizer("client secret is empty".into()));
        }

        let token_url = format!(
            "{}/{tenant_id}/oauth2/v2.0/token",
            login_endpoint.trim_end_matches('/')
        );

        Ok(Self {
            token_url,
            client_id: client_id.to_string(),
            client_secret,
            resource,
            transport,
            cache: TokenCache::new(),
        })
    }

    fn request_token(&self) -> Result<(String, Duration)> {
        let form = vec![
            field("grant_type", "client_credentials"),
            field("client_id", &self.client_id),
            ("client_secret".to_string(), self.client_secret.clone()),
            field("scope", self.resource.scope()),
        ];
        let request = HttpRequest::new(Method::Post, &self.token_url)
            .header("User-Agent", crate::http::user_agent())
            .body(RequestBody::Form(form));

        let response = self
            .transport
            .send(&request)
            .map_err(|e| KvError::Authorizer(format!("token request failed: {e}")))?;

        if !response.is_success() {
            return Err(KvError::Authorizer(format!(
                "token endpoint rejected the request: {} {}",
                response.status,
                response.body.trim()
            )));
        }

        let token: TokenResponse = serde_json::from_str(&response.body)
            .map_err(|e| KvError::Authorizer(format!("failed to parse token response: {e}")))?;

        tracing::debug!(resource = ?self.resource, "acquired service principal token");
        Ok((token.access_token, Duration::from_secs(token.expires_in)))
    }
}

fn field(name: &str, value: &str) -> (String, Zeroizing<String>) {
    (name.to_string(), Zeroizing::new(value.to_string()))
}

impl Authorizer for ClientSecretCredential {
    fn bearer_token(&self) -> Result<String> {
        self.cache.get_or_fetch(|| self.request_token())
    }
}

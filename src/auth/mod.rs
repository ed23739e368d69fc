//! Bearer-token authorizers for the management and Key Vault APIs.
//!
//! Credential selection, in order:
//! 1. Service principal — `client_id` from settings plus a client secret
//!    from `AZURE_CLIENT_SECRET` (or the OS keyring with `keyring-store`)
//! 2. Azure CLI — `az account get-access-token`
//!
//! Authorizers are required by every client and validated when the client
//! is built; a failure is always returned to the caller.

mod azure_cli;
mod client_secret;

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use zeroize::Zeroizing;

use crate::config::Settings;
use crate::errors::{KvError, Result};
use crate::http::Transport;

pub use azure_cli::AzureCliCredential;
pub use client_secret::ClientSecretCredential;

/// Environment variable holding the service principal secret.
pub const CLIENT_SECRET_VAR: &str = "AZURE_CLIENT_SECRET";

/// Supplies bearer tokens for one API audience.
pub trait Authorizer: Send + Sync {
    fn bearer_token(&self) -> Result<String>;
}

/// The API surface a token is issued for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    /// Azure Resource Manager (vault and resource group CRUD).
    Management,
    /// Key Vault data plane (key operations).
    KeyVault,
}

impl Resource {
    /// OAuth2 v2 scope for the client-credentials flow.
    pub fn scope(self) -> &'static str {
        match self {
            Self::Management => "https://management.azure.com/.default",
            Self::KeyVault => "https://vault.azure.net/.default",
        }
    }

    /// Resource URI understood by `az account get-access-token`.
    pub fn resource_uri(self) -> &'static str {
        match self {
            Self::Management => "https://management.azure.com/",
            Self::KeyVault => "https://vault.azure.net",
        }
    }
}

/// A fixed token, for pre-acquired credentials and tests.
pub struct StaticToken(String);

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }
}

impl Authorizer for StaticToken {
    fn bearer_token(&self) -> Result<String> {
        if self.0.is_empty() {
            return Err(KvError::Authorizer("static token is empty".into()));
        }
        Ok(self.0.clone())
    }
}

/// Tokens are refreshed this long before they expire.
const EXPIRY_MARGIN: Duration = Duration::from_secs(60);

/// Single-slot token cache shared by the credential types.
pub(crate) struct TokenCache {
    slot: Mutex<Option<(String, Instant)>>,
}

impl TokenCache {
    pub(crate) fn new() -> Self {
        Self {
            slot: Mutex::new(None),
        }
    }

    /// Return the cached token, or fetch a new one with `fetch`, which
    /// yields the token and its lifetime.
    pub(crate) fn get_or_fetch<F>(&self, fetch: F) -> Result<String>
    where
        F: FnOnce() -> Result<(String, Duration)>,
    {
        let mut slot = self
            .slot
            .lock()
            .map_err(|_| KvError::Authorizer("token cache lock poisoned".into()))?;

        if let Some((token, expiry)) = slot.as_ref() {
            if Instant::now() < *expiry {
                return Ok(token.clone());
            }
        }

        let (token, lifetime) = fetch()?;
        let expiry = Instant::now() + lifetime.saturating_sub(EXPIRY_MARGIN);
        *slot = Some((token.clone(), expiry));
        Ok(token)
    }
}

/// Find the service principal secret: environment first, then the keyring.
pub fn resolve_client_secret(settings: &Settings) -> Option<Zeroizing<String>> {
    if let Ok(secret) = std::env::var(CLIENT_SECRET_VAR) {
        if !secret.is_empty() {
            return Some(Zeroizing::new(secret));
        }
    }

    #[cfg(feature = "keyring-store")]
    if !settings.client_id.is_empty() {
        if let Ok(Some(secret)) =
            crate::keyring::get_client_secret(&settings.tenant_id, &settings.client_id)
        {
            return Some(Zeroizing::new(secret));
        }
    }

    #[cfg(not(feature = "keyring-store"))]
    let _ = settings;

    None
}

/// Build the authorizer for `resource` from the credential chain.
pub fn authorizer_for(
    settings: &Settings,
    resource: Resource,
    transport: Arc<dyn Transport>,
) -> Result<Arc<dyn Authorizer>> {
    if !settings.client_id.is_empty() {
        if let Some(secret) = resolve_client_secret(settings) {
            tracing::debug!(?resource, "using service principal credential");
            let credential = ClientSecretCredential::new(
                &settings.login_endpoint,
                &settings.tenant_id,
                &settings.client_id,
                secret,
                resource,
                transport,
            )?;
            return Ok(Arc::new(credential));
        }
    }

    tracing::debug!(?resource, "using Azure CLI credential");
    Ok(Arc::new(AzureCliCredential::new(&settings.tenant_id, resource)))
}

use std::process::Command;
use std::time::Duration;

use serde::Deserialize;

use super::{Authorizer, Resource, TokenCache};
use crate::errors::{KvError, Result};

/// Used when the CLI output carries no usable expiry.
const FALLBACK_LIFETIME: Duration = Duration::from_secs(300);

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CliToken {
    access_token: String,
    /// Unix timestamp, present in Azure CLI 2.54+.
    #[serde(default, rename = "expires_on")]
    expires_on: Option<i64>,
}

/// Credential that shells out to `az account get-access-token`.
pub struct AzureCliCredential {
    tenant_id: String,
    resource: Resource,
    cache: TokenCache,
}

impl AzureCliCredential {
    pub fn new(tenant_id: &str, resource: Resource) -> Self {
        Self {
            tenant_id: tenant_id.to_string(),
            resource,
            cache: TokenCache::new(),
        }
    }

    fn args(&self) -> Vec<String> {
        let mut args = vec![
            "account".to_string(),
            "get-access-token".to_string(),
            "--resource".to_string(),
            self.resource.resource_uri().to_string(),
            "--output".to_string(),
            "json".to_string(),
        ];
        if !self.tenant_id.is_empty() {
            args.push("--tenant".to_string());
            args.push(self.tenant_id.clone());
        }
        args
    }

    fn request_token(&self) -> Result<(String, Duration)> {
        let output = Command::new("az").args(self.args()).output().map_err(|e| {
            KvError::Authorizer(format!(
                "az CLI not found: {e}. Install the Azure CLI or set AZURE_CLIENT_SECRET."
            ))
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(KvError::Authorizer(format!(
                "az account get-access-token failed: {}. Run `az login` first.",
                stderr.trim()
            )));
        }

        parse_cli_token(&output.stdout, chrono::Utc::now().timestamp())
    }
}

impl Authorizer for AzureCliCredential {
    fn bearer_token(&self) -> Result<String> {
        self.cache.get_or_fetch(|| self.request_token())
    }
}

fn parse_cli_token(stdout: &[u8], now: i64) -> Result<(String, Duration)> {
    let token: CliToken = serde_json::from_slice(stdout)
        .map_err(|e| KvError::Authorizer(format!("failed to parse az CLI output: {e}")))?;

    let lifetime = token
        .expires_on
        .and_then(|at| u64::try_from(at - now).ok())
        .map_or(FALLBACK_LIFETIME, Duration::from_secs);

    Ok((token.access_token, lifetime))
}

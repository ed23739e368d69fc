//! Key creation on the Key Vault data plane.

use super::model::{
    JsonWebKeyOperation, JsonWebKeyType, KeyAttributes, KeyBundle, KeyCreateParameters,
};
use super::vaults::VaultManager;
use crate::errors::{KvError, Result};
use crate::http::{ApiClient, Method, RequestBody};
use crate::naming::validate_key_name;

/// Data-plane API version for keys.
pub const KEYS_API_VERSION: &str = "7.0";

/// RSA key size. 2048 is the only size the samples create.
pub const RSA_KEY_SIZE: u32 = 2048;

/// Binding for the keys API of any vault, addressed by vault URI.
#[derive(Clone)]
pub struct KeysClient {
    api: ApiClient,
}

impl KeysClient {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub fn create_key(
        &self,
        vault_uri: &str,
        key_name: &str,
        parameters: &KeyCreateParameters,
    ) -> Result<KeyBundle> {
        let url = format!(
            "{}/keys/{key_name}/create?api-version={KEYS_API_VERSION}",
            vault_uri.trim_end_matches('/')
        );
        let body = serde_json::to_value(parameters).map_err(|e| {
            KvError::SerializationError(format!("failed to encode key parameters: {e}"))
        })?;
        self.api.call(Method::Post, &url, RequestBody::Json(body))
    }
}

/// Parameters of the enabled RSA-2048 key the samples create.
pub fn rsa_key_parameters() -> KeyCreateParameters {
    KeyCreateParameters {
        kty: JsonWebKeyType::Rsa,
        key_size: Some(RSA_KEY_SIZE),
        key_ops: JsonWebKeyOperation::ALL.to_vec(),
        attributes: Some(KeyAttributes {
            enabled: Some(true),
            ..KeyAttributes::default()
        }),
    }
}

/// Creates keys in vaults resolved through the lifecycle manager.
pub struct KeyManager {
    client: KeysClient,
}

impl KeyManager {
    pub fn new(client: KeysClient) -> Self {
        Self { client }
    }

    /// Look up the vault's URI, then create an enabled RSA-2048 key with
    /// every operation allowed.
    ///
    /// Fails with the data plane's 403 when the caller has no key-create
    /// grant, so permissions must be set before this runs.
    ///
    /// A vault whose GET carries no `vaultUri` yields a `RemoteApi` 409 with
    /// code `VaultUriUnavailable`. That error is raised locally; no request
    /// reaches the data plane and the service never sent that code.
    pub fn create_key(
        &self,
        vaults: &VaultManager,
        group: &str,
        vault: &str,
        key_name: &str,
    ) -> Result<KeyBundle> {
        validate_key_name(key_name)?;

        let found = vaults.get_vault(group, vault)?;
        let vault_uri = found.vault_uri().ok_or_else(|| KvError::RemoteApi {
            status: 409,
            code: "VaultUriUnavailable".into(),
            message: format!("vault '{vault}' has no URI yet"),
        })?;

        let key = self
            .client
            .create_key(vault_uri, key_name, &rsa_key_parameters())?;
        tracing::info!(vault, key = key_name, kid = key.kid(), "key created");
        Ok(key)
    }
}

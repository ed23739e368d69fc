//! OS keyring integration for the service principal secret.
//!
//! Stores and retrieves the client secret from the operating system's
//! secure credential store:
//! - macOS: Keychain
//! - Windows: Credential Manager
//! - Linux: Secret Service (GNOME Keyring / KDE Wallet)
//!
//! All operations fail gracefully: if the keyring is unavailable, the
//! error is returned and the caller falls back to the Azure CLI credential.

use crate::errors::{KvError, Result};

/// Service name used in the OS keyring.
const SERVICE_NAME: &str = "kvprov";

/// One entry per tenant/client pair.
fn entry_key(tenant_id: &str, client_id: &str) -> String {
    format!("sp:{tenant_id}/{client_id}")
}

fn entry(tenant_id: &str, client_id: &str) -> Result<keyring::Entry> {
    keyring::Entry::new(SERVICE_NAME, &entry_key(tenant_id, client_id))
        .map_err(|e| KvError::KeyringError(format!("failed to create keyring entry: {e}")))
}

/// Store a client secret in the OS keyring.
pub fn store_client_secret(tenant_id: &str, client_id: &str, secret: &str) -> Result<()> {
    entry(tenant_id, client_id)?
        .set_password(secret)
        .map_err(|e| KvError::KeyringError(format!("failed to store secret in keyring: {e}")))
}

/// Retrieve a client secret. Returns `None` if nothing is stored.
pub fn get_client_secret(tenant_id: &str, client_id: &str) -> Result<Option<String>> {
    match entry(tenant_id, client_id)?.get_password() {
        Ok(secret) => Ok(Some(secret)),
        Err(keyring::Error::NoEntry) => Ok(None),
        Err(e) => Err(KvError::KeyringError(format!(
            "failed to read from keyring: {e}"
        ))),
    }
}

/// Delete a stored client secret.
pub fn delete_client_secret(tenant_id: &str, client_id: &str) -> Result<()> {
    match entry(tenant_id, client_id)?.delete_credential() {
        Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
        Err(e) => Err(KvError::KeyringError(format!(
            "failed to delete from keyring: {e}"
        ))),
    }
}

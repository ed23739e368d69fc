//! `kvprov auth keyring` — store the service principal secret in the OS
//! keyring so later runs need no `AZURE_CLIENT_SECRET`.
//!
//! When the keyring feature is not compiled in, the command returns a
//! helpful error message.

use crate::cli::Cli;
use crate::errors::{KvError, Result};

/// Execute `kvprov auth keyring` — save or delete the secret.
pub fn execute_keyring(cli: &Cli, delete: bool) -> Result<()> {
    #[cfg(feature = "keyring-store")]
    {
        use crate::cli::output;

        let settings = crate::cli::load_settings(cli)?;
        if settings.tenant_id.is_empty() || settings.client_id.is_empty() {
            return Err(KvError::ConfigError(
                "tenant id and client id are required to address the keyring entry".into(),
            ));
        }

        if delete {
            crate::keyring::delete_client_secret(&settings.tenant_id, &settings.client_id)?;
            output::success("Client secret removed from OS keyring.");
        } else {
            let secret = zeroize::Zeroizing::new(
                dialoguer::Password::new()
                    .with_prompt("Client secret")
                    .interact()
                    .map_err(|e| KvError::CommandFailed(format!("password prompt: {e}")))?,
            );
            crate::keyring::store_client_secret(
                &settings.tenant_id,
                &settings.client_id,
                &secret,
            )?;
            output::success("Client secret saved to OS keyring.");
        }

        Ok(())
    }

    #[cfg(not(feature = "keyring-store"))]
    {
        let _ = (cli, delete);
        Err(KvError::KeyringError(
            "keyring support not compiled; rebuild with `cargo build --features keyring-store`"
                .into(),
        ))
    }
}

//! `kvprov vault create` and `kvprov vault create-with-policies`.

use crate::cli::output;
use crate::cli::{session, Cli};
use crate::errors::Result;

/// Execute `vault create`: a vault with no access policies.
pub fn execute(cli: &Cli, name: &str, vault_tenant: Option<&str>) -> Result<()> {
    let session = session(cli)?;
    let settings = session.settings();
    let tenant = vault_tenant.unwrap_or(&settings.tenant_id);

    let vault = session
        .vaults()?
        .create_vault(&settings.group_name, name, &settings.location, tenant)?;

    output::success(&format!(
        "Vault '{}' created in {}",
        vault.name(),
        vault.location()
    ));
    if let Some(uri) = vault.vault_uri() {
        output::info(&format!("URI: {uri}"));
    }
    output::tip(&format!(
        "Run `kvprov vault set-permissions {name}` before creating keys."
    ));
    Ok(())
}

/// Execute `vault create-with-policies`.
pub fn execute_with_policies(cli: &Cli, name: &str, principal: &str) -> Result<()> {
    let session = session(cli)?;
    let group = &session.settings().group_name;

    let vault = session
        .vaults()?
        .create_vault_with_policies(group, name, principal)?;

    output::success(&format!(
        "Vault '{}' created with {} access polic{}",
        vault.name(),
        vault.properties.access_policies.len(),
        if vault.properties.access_policies.len() == 1 { "y" } else { "ies" }
    ));
    Ok(())
}

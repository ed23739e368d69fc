//! `kvprov vault set-permissions` and `set-permissions-deployment`.

use crate::cli::output;
use crate::cli::{policy_mode, session, Cli};
use crate::errors::Result;

/// Execute `vault set-permissions`.
pub fn execute(cli: &Cli, name: &str, merge: bool) -> Result<()> {
    let session = session(cli)?;
    let group = &session.settings().group_name;

    let vault = session
        .vaults()?
        .set_vault_permissions(group, name, policy_mode(merge))?;

    output::success(&format!(
        "Set permissions on '{}' ({} policies)",
        vault.name(),
        vault.properties.access_policies.len()
    ));
    Ok(())
}

/// Execute `vault set-permissions-deployment`.
pub fn execute_deployment(cli: &Cli, name: &str, principal: &str, merge: bool) -> Result<()> {
    let session = session(cli)?;
    let group = &session.settings().group_name;

    let vault = session.vaults()?.set_vault_permissions_for_deployment(
        group,
        name,
        principal,
        policy_mode(merge),
    )?;

    output::success(&format!(
        "Set deployment permissions on '{}' ({} policies)",
        vault.name(),
        vault.properties.access_policies.len()
    ));
    Ok(())
}

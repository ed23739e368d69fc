//! `kvprov group create` and `kvprov group delete`.

use dialoguer::Confirm;

use crate::cli::output;
use crate::cli::{session, Cli};
use crate::errors::{KvError, Result};

/// Execute `group create`.
pub fn execute_create(cli: &Cli, name: Option<&str>) -> Result<()> {
    let session = session(cli)?;
    let settings = session.settings();
    let name = name.unwrap_or(&settings.group_name);

    let group = session.groups()?.create_group(name, &settings.location)?;
    output::success(&format!("Resource group '{name}' ready in {}", group.location));
    Ok(())
}

/// Execute `group delete`.
pub fn execute_delete(cli: &Cli, name: Option<&str>, force: bool) -> Result<()> {
    let session = session(cli)?;
    let name = name.unwrap_or(&session.settings().group_name);

    if !force && !confirm_group_delete(name)? {
        output::info("Cancelled.");
        return Ok(());
    }

    let status = session.groups()?.delete_group(name)?;
    output::success(&format!(
        "Deletion of resource group '{name}' accepted (HTTP {status})"
    ));
    output::tip("Deletion continues in the background and may take several minutes.");
    Ok(())
}

/// Ask before deleting a resource group and everything in it.
pub(crate) fn confirm_group_delete(name: &str) -> Result<bool> {
    Confirm::new()
        .with_prompt(format!(
            "Delete resource group '{name}' and every vault in it?"
        ))
        .default(false)
        .interact()
        .map_err(|e| KvError::CommandFailed(format!("confirm prompt: {e}")))
}

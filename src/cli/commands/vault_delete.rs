//! `kvprov vault delete` — remove a vault.

use dialoguer::Confirm;

use crate::cli::output;
use crate::cli::{session, Cli};
use crate::errors::{KvError, Result};

/// Execute the `vault delete` command.
pub fn execute(cli: &Cli, name: &str, force: bool) -> Result<()> {
    // Unless --force is set, ask for confirmation before deleting.
    if !force {
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete vault '{name}'?"))
            .default(false)
            .interact()
            .map_err(|e| KvError::CommandFailed(format!("confirm prompt: {e}")))?;

        if !confirmed {
            output::info("Cancelled.");
            return Ok(());
        }
    }

    let session = session(cli)?;
    let group = &session.settings().group_name;
    let status = session.vaults()?.delete_vault(group, name)?;

    if status == 204 {
        output::warning(&format!("Vault '{name}' did not exist"));
    } else {
        output::success(&format!("Deleted vault '{name}'"));
    }
    Ok(())
}

//! `kvprov cleanup` — tear down the configured resource group.

use crate::cli::commands::group::confirm_group_delete;
use crate::cli::output;
use crate::cli::{session, Cli};
use crate::errors::Result;
use crate::resources::CleanupOutcome;

/// Execute the `cleanup` command.
pub fn execute(cli: &Cli, force: bool) -> Result<()> {
    let session = session(cli)?;
    let settings = session.settings();

    if !settings.keep_resources && !force && !confirm_group_delete(&settings.group_name)? {
        output::info("Cancelled.");
        return Ok(());
    }

    let groups = session.groups()?;
    match session.cleanup(&groups).run()? {
        CleanupOutcome::Kept => {
            output::info(&format!("Keeping resource group '{}'", settings.group_name));
        }
        CleanupOutcome::Deleted(status) => {
            output::success(&format!(
                "Deletion of resource group '{}' accepted (HTTP {status})",
                settings.group_name
            ));
        }
    }
    Ok(())
}

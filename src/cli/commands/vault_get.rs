//! `kvprov vault get` — show one vault and its access policies.

use crate::cli::output;
use crate::cli::{session, Cli};
use crate::errors::Result;

/// Execute the `vault get` command.
pub fn execute(cli: &Cli, name: &str) -> Result<()> {
    let session = session(cli)?;
    let group = &session.settings().group_name;

    let vault = session.vaults()?.get_vault(group, name)?;
    output::print_vault(&vault);
    Ok(())
}

//! `kvprov key create` — create an RSA key in a vault.

use crate::cli::output;
use crate::cli::{session, Cli};
use crate::errors::Result;

/// Execute the `key create` command.
pub fn execute(cli: &Cli, vault: &str, name: &str) -> Result<()> {
    let session = session(cli)?;
    let group = &session.settings().group_name;

    let vaults = session.vaults()?;
    let key = session.keys()?.create_key(&vaults, group, vault, name)?;

    output::success(&format!("Created key '{name}' in '{vault}'"));
    output::print_key(&key);
    Ok(())
}

//! `kvprov vault list` — vaults in the subscription, then in the group.

use crate::cli::output;
use crate::cli::{session, Cli};
use crate::errors::Result;
use crate::keyvault::{Pager, Vault};

/// Execute the `vault list` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let session = session(cli)?;
    let vaults = session.vaults()?;
    let listing = vaults.list_vaults();

    let settings = session.settings();
    output::info(&format!("Subscription {}", settings.subscription_id));
    print_listing(listing.subscription)?;

    output::info(&format!("Resource group {}", settings.group_name));
    print_listing(listing.resource_group)?;
    Ok(())
}

/// Drain a pager and print it; a failed page ends the listing with an error.
fn print_listing(pager: Pager<'_, Vault>) -> Result<()> {
    let vaults = pager.collect::<Result<Vec<_>>>()?;
    output::print_vaults_table(&vaults);
    Ok(())
}

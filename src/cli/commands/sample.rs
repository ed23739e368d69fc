//! `kvprov sample` — run the full provisioning scenario.

use crate::cli::output;
use crate::cli::{session, Cli};
use crate::errors::{KvError, Result};
use crate::resources::CleanupOutcome;
use crate::sample::{self, SampleNames};

/// Execute the `sample` command.
pub fn execute(
    cli: &Cli,
    group: Option<&str>,
    vault: Option<&str>,
    key: Option<&str>,
) -> Result<()> {
    let session = session(cli)?;

    let mut names = SampleNames::generate(session.settings());
    if let Some(group) = group {
        names.group = group.to_string();
    }
    if let Some(vault) = vault {
        names.vault = vault.to_string();
    }
    if let Some(key) = key {
        names.key = key.to_string();
    }

    output::info(&format!(
        "group {} / vault {} / key {}",
        names.group, names.vault, names.key
    ));

    let report = sample::run(&session, &names, |line| println!("{line}"))?;

    match &report.cleanup {
        Ok(CleanupOutcome::Kept) => {
            output::tip(&format!("Resource group '{}' was kept.", names.group))
        }
        Ok(CleanupOutcome::Deleted(_)) => {
            output::info(&format!("Resource group '{}' is being deleted.", names.group))
        }
        Err(_) => {}
    }

    if report.succeeded() {
        Ok(())
    } else {
        let failed = report.failures.len() + usize::from(report.cleanup.is_err());
        Err(KvError::CommandFailed(format!("{failed} step(s) failed")))
    }
}

//! End-to-end provisioning run: group, vault, permissions, key, cleanup.

use crate::config::Settings;
use crate::errors::{KvError, Result};
use crate::keyvault::PolicyMode;
use crate::naming::{generate_group_name, generate_with_prefix, SUFFIX_LEN};
use crate::resources::{Cleanup, CleanupOutcome};
use crate::session::Session;

pub const VAULT_PREFIX: &str = "vault-sample-rs-";
pub const KEY_PREFIX: &str = "key-sample-rs-";
pub const GROUP_AFFIX: &str = "KeyVault";

/// Names used by one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleNames {
    pub group: String,
    pub vault: String,
    pub key: String,
}

impl SampleNames {
    /// Random names derived from the configured base group name.
    pub fn generate(settings: &Settings) -> Self {
        Self {
            group: generate_group_name(&settings.group_name, GROUP_AFFIX),
            vault: generate_with_prefix(VAULT_PREFIX, SUFFIX_LEN),
            key: generate_with_prefix(KEY_PREFIX, SUFFIX_LEN),
        }
    }
}

/// Result of a run.
#[derive(Debug)]
pub struct SampleReport {
    /// Steps that failed, with their errors, in order.
    pub failures: Vec<(&'static str, KvError)>,
    pub cleanup: Result<CleanupOutcome>,
}

impl SampleReport {
    pub fn succeeded(&self) -> bool {
        self.failures.is_empty() && self.cleanup.is_ok()
    }
}

/// Run every step, reporting progress through `emit`.
///
/// A failing step is reported and the run moves on; cleanup always runs.
/// Only client construction (credential failures) aborts the run.
pub fn run<F>(session: &Session, names: &SampleNames, mut emit: F) -> Result<SampleReport>
where
    F: FnMut(&str),
{
    let settings = session.settings();
    let groups = session.groups()?;
    let vaults = session.vaults()?;
    let keys = session.keys()?;

    let mut failures = Vec::new();
    let outcome = groups
        .create_group(&names.group, &settings.location)
        .map(|_| ());
    if let Err(e) = outcome {
        tracing::warn!(group = %names.group, error = %e, "resource group creation failed");
        emit(&e.to_string());
        failures.push(("create group", e));
    }

    let mut step = |name: &'static str, outcome: Result<()>, emit: &mut F| match outcome {
        Ok(()) => emit(name),
        Err(e) => {
            tracing::warn!(step = name, error = %e, "sample step failed");
            emit(&e.to_string());
            failures.push((name, e));
        }
    };

    let outcome = vaults
        .create_vault(&names.group, &names.vault, &settings.location, &settings.tenant_id)
        .map(|_| ());
    step("vault created", outcome, &mut emit);

    let outcome = vaults
        .set_vault_permissions(&names.group, &names.vault, PolicyMode::Replace)
        .map(|_| ());
    step("set vault permissions", outcome, &mut emit);

    let outcome = keys
        .create_key(&vaults, &names.group, &names.vault, &names.key)
        .map(|_| ());
    step("created key", outcome, &mut emit);

    let cleanup = Cleanup::new(&groups, &names.group, settings.keep_resources).run();
    if let Err(e) = &cleanup {
        emit(&e.to_string());
    }

    Ok(SampleReport { failures, cleanup })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_names_follow_prefixes() {
        let settings = Settings::default();
        let names = SampleNames::generate(&settings);
        assert!(names.group.starts_with("kvprov-samples-KeyVault-"));
        assert!(names.vault.starts_with(VAULT_PREFIX));
        assert!(names.key.starts_with(KEY_PREFIX));
        assert!(crate::naming::validate_vault_name(&names.vault).is_ok());
    }
}

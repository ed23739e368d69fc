use super::groups::GroupsClient;
use crate::errors::Result;

/// What [`Cleanup::run`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CleanupOutcome {
    /// Keep flag set; nothing was deleted.
    Kept,
    /// Group deletion was accepted with this status.
    Deleted(u16),
}

/// End-of-run teardown.
///
/// Deletes the owning resource group, which removes every vault and key
/// created under it. Individual vaults are never deleted one by one.
pub struct Cleanup<'a> {
    groups: &'a GroupsClient,
    group_name: &'a str,
    keep_resources: bool,
}

impl<'a> Cleanup<'a> {
    pub fn new(groups: &'a GroupsClient, group_name: &'a str, keep_resources: bool) -> Self {
        Self {
            groups,
            group_name,
            keep_resources,
        }
    }

    pub fn run(&self) -> Result<CleanupOutcome> {
        if self.keep_resources {
            tracing::info!(group = self.group_name, "resources cleanup: keeping resources");
            return Ok(CleanupOutcome::Kept);
        }
        tracing::info!(group = self.group_name, "resources cleanup: deleting resources");
        let status = self.groups.delete_group(self.group_name)?;
        Ok(CleanupOutcome::Deleted(status))
    }
}

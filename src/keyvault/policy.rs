//! Access-policy assembly.
//!
//! Builds the permission sets the lifecycle operations grant and combines
//! policy lists for the two update modes.

use uuid::Uuid;

use super::model::{AccessPolicyEntry, KeyPermission, Permissions, SecretPermission};
use crate::errors::{KvError, Result};

/// How a permissions update treats the vault's existing policy list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PolicyMode {
    /// Overwrite the list; principals not in the update lose access.
    #[default]
    Replace,
    /// Read the current list and union permissions per principal.
    Merge,
}

impl Permissions {
    /// keys {get, list, create}, secrets {get, set, list}.
    pub fn key_and_secret_manager() -> Self {
        Self {
            keys: vec![KeyPermission::Get, KeyPermission::List, KeyPermission::Create],
            secrets: vec![
                SecretPermission::Get,
                SecretPermission::Set,
                SecretPermission::List,
            ],
            certificates: Vec::new(),
        }
    }

    /// keys {create}, secrets {set}.
    pub fn create_and_set() -> Self {
        Self {
            keys: vec![KeyPermission::Create],
            secrets: vec![SecretPermission::Set],
            certificates: Vec::new(),
        }
    }

    pub fn allows_key(&self, permission: KeyPermission) -> bool {
        self.keys.contains(&permission)
    }

    /// Add every permission of `other` not already present, keeping order.
    pub fn union(&mut self, other: &Permissions) {
        extend_unique(&mut self.keys, &other.keys);
        extend_unique(&mut self.secrets, &other.secrets);
        extend_unique(&mut self.certificates, &other.certificates);
    }
}

fn extend_unique<T: PartialEq + Copy>(target: &mut Vec<T>, extra: &[T]) {
    for item in extra {
        if !target.contains(item) {
            target.push(*item);
        }
    }
}

impl AccessPolicyEntry {
    /// Build an entry. The principal object id must be non-empty.
    pub fn new(tenant_id: Uuid, object_id: &str, permissions: Permissions) -> Result<Self> {
        let object_id = object_id.trim();
        if object_id.is_empty() {
            return Err(KvError::InvalidArgument(
                "access policy entry requires a non-empty principal object id".into(),
            ));
        }
        Ok(Self {
            tenant_id,
            object_id: object_id.to_string(),
            application_id: None,
            permissions,
        })
    }

    fn same_principal(&self, other: &AccessPolicyEntry) -> bool {
        self.tenant_id == other.tenant_id
            && self.object_id.eq_ignore_ascii_case(&other.object_id)
            && self.application_id == other.application_id
    }
}

/// Reject entries without a principal. ARM accepts nothing else.
pub fn validate_policies(policies: &[AccessPolicyEntry]) -> Result<()> {
    for (i, entry) in policies.iter().enumerate() {
        if entry.object_id.trim().is_empty() {
            return Err(KvError::InvalidArgument(format!(
                "access policy entry {i} has no principal object id"
            )));
        }
    }
    Ok(())
}

/// Merge `incoming` into `existing`.
///
/// Entries for the same principal have their permissions unioned; new
/// principals are appended. Unrelated existing entries are kept as is.
pub fn merge_policies(
    existing: Vec<AccessPolicyEntry>,
    incoming: Vec<AccessPolicyEntry>,
) -> Vec<AccessPolicyEntry> {
    let mut merged = existing;
    for entry in incoming {
        match merged.iter_mut().find(|e| e.same_principal(&entry)) {
            Some(current) => current.permissions.union(&entry.permissions),
            None => merged.push(entry),
        }
    }
    merged
}

/// Combine the current list with an update according to `mode`.
pub fn apply_policy_update(
    mode: PolicyMode,
    current: Vec<AccessPolicyEntry>,
    update: Vec<AccessPolicyEntry>,
) -> Vec<AccessPolicyEntry> {
    match mode {
        PolicyMode::Replace => merge_policies(Vec::new(), update),
        PolicyMode::Merge => merge_policies(current, update),
    }
}

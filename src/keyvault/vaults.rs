//! Vault lifecycle: create, fetch, list, delete and access-policy updates.
//!
//! `VaultsClient` is a thin binding over the ARM vaults API.
//! `VaultManager` assembles the payloads for each lifecycle operation on
//! top of it. Every call is a synchronous round-trip; nothing is cached.

use uuid::Uuid;

use super::model::{
    AccessPolicyEntry, Permissions, Vault, VaultCreateOrUpdateParameters, VaultProperties,
};
use super::pager::Pager;
use super::policy::{apply_policy_update, validate_policies, PolicyMode};
use crate::config::settings::parse_tenant_id;
use crate::config::Settings;
use crate::errors::{KvError, Result};
use crate::http::{ApiClient, Method, RequestBody};
use crate::naming::validate_vault_name;

/// ARM API version of `Microsoft.KeyVault/vaults`.
pub const VAULTS_API_VERSION: &str = "2018-02-14";

/// Binding for `Microsoft.KeyVault/vaults` in one subscription.
#[derive(Clone)]
pub struct VaultsClient {
    api: ApiClient,
    endpoint: String,
    subscription_id: String,
}

impl VaultsClient {
    pub fn new(api: ApiClient, endpoint: &str, subscription_id: &str) -> Self {
        Self {
            api,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            subscription_id: subscription_id.to_string(),
        }
    }

    fn group_path(&self, group: &str) -> String {
        format!(
            "{}/subscriptions/{}/resourceGroups/{group}/providers/Microsoft.KeyVault/vaults",
            self.endpoint, self.subscription_id
        )
    }

    fn vault_url(&self, group: &str, name: &str) -> String {
        format!(
            "{}/{name}?api-version={VAULTS_API_VERSION}",
            self.group_path(group)
        )
    }

    /// PUT the vault. Idempotent on the service side.
    pub fn create_or_update(
        &self,
        group: &str,
        name: &str,
        parameters: &VaultCreateOrUpdateParameters,
    ) -> Result<Vault> {
        let body = serde_json::to_value(parameters).map_err(|e| {
            KvError::SerializationError(format!("failed to encode vault parameters: {e}"))
        })?;
        self.api
            .call(Method::Put, &self.vault_url(group, name), RequestBody::Json(body))
    }

    pub fn get(&self, group: &str, name: &str) -> Result<Vault> {
        self.api
            .call(Method::Get, &self.vault_url(group, name), RequestBody::Empty)
    }

    /// Returns the acknowledgment status (200, or 204 when already gone).
    pub fn delete(&self, group: &str, name: &str) -> Result<u16> {
        self.api
            .call_status(Method::Delete, &self.vault_url(group, name), RequestBody::Empty)
    }

    /// All vaults in the subscription.
    pub fn list_by_subscription(&self) -> Pager<'_, Vault> {
        let url = format!(
            "{}/subscriptions/{}/providers/Microsoft.KeyVault/vaults?api-version={VAULTS_API_VERSION}",
            self.endpoint, self.subscription_id
        );
        Pager::new(&self.api, url)
    }

    /// All vaults in one resource group.
    pub fn list_by_resource_group(&self, group: &str) -> Pager<'_, Vault> {
        let url = format!("{}?api-version={VAULTS_API_VERSION}", self.group_path(group));
        Pager::new(&self.api, url)
    }
}

/// The two listings produced by [`VaultManager::list_vaults`].
pub struct VaultListing<'a> {
    pub subscription: Pager<'a, Vault>,
    pub resource_group: Pager<'a, Vault>,
}

/// Vault lifecycle operations with the payloads the samples use.
pub struct VaultManager {
    client: VaultsClient,
    location: String,
    tenant_id: String,
    client_id: String,
    operator_object_id: String,
    group_name: String,
}

impl VaultManager {
    pub fn new(client: VaultsClient, settings: &Settings) -> Self {
        Self {
            client,
            location: settings.location.clone(),
            tenant_id: settings.tenant_id.clone(),
            client_id: settings.client_id.clone(),
            operator_object_id: settings.operator_object_id.clone(),
            group_name: settings.group_name.clone(),
        }
    }

    fn tenant(&self) -> Result<Uuid> {
        parse_tenant_id(&self.tenant_id)
    }

    /// PUT then GET, so callers see server-assigned fields like `vaultUri`.
    fn put_and_fetch(
        &self,
        group: &str,
        vault: &str,
        parameters: &VaultCreateOrUpdateParameters,
    ) -> Result<Vault> {
        validate_policies(&parameters.properties.access_policies)?;
        self.client.create_or_update(group, vault, parameters)?;
        self.client.get(group, vault)
    }

    /// Create a vault with no access policies and the standard SKU.
    pub fn create_vault(
        &self,
        group: &str,
        vault: &str,
        location: &str,
        tenant_id: &str,
    ) -> Result<Vault> {
        validate_vault_name(vault)?;
        let tenant = parse_tenant_id(tenant_id)?;

        let parameters =
            VaultCreateOrUpdateParameters::new(location, VaultProperties::new(tenant));
        let created = self.put_and_fetch(group, vault, &parameters)?;
        tracing::info!(group, vault, location, "vault created");
        Ok(created)
    }

    /// Create a vault with disk encryption enabled, granting `principal_id`
    /// key-create and secret-set rights. An empty principal yields a vault
    /// with no policies.
    pub fn create_vault_with_policies(
        &self,
        group: &str,
        vault: &str,
        principal_id: &str,
    ) -> Result<Vault> {
        validate_vault_name(vault)?;
        let tenant = self.tenant()?;

        let mut properties = VaultProperties::new(tenant);
        properties.enabled_for_disk_encryption = Some(true);
        if !principal_id.trim().is_empty() {
            properties.access_policies.push(AccessPolicyEntry::new(
                tenant,
                principal_id,
                Permissions::create_and_set(),
            )?);
        }

        let parameters = VaultCreateOrUpdateParameters::new(&self.location, properties);
        let created = self.put_and_fetch(group, vault, &parameters)?;
        tracing::info!(
            group,
            vault,
            policies = created.properties.access_policies.len(),
            "vault created with policies"
        );
        Ok(created)
    }

    /// Grant the configured client and operator principals
    /// keys {get, list, create} and secrets {get, set, list}.
    pub fn set_vault_permissions(&self, group: &str, vault: &str, mode: PolicyMode) -> Result<Vault> {
        let tenant = self.tenant()?;
        let grants = vec![
            AccessPolicyEntry::new(tenant, &self.client_id, Permissions::key_and_secret_manager())?,
            AccessPolicyEntry::new(
                tenant,
                &self.operator_object_id,
                Permissions::key_and_secret_manager(),
            )?,
        ];

        self.update_policies(group, vault, mode, tenant, grants, |_| {})
    }

    /// Like [`set_vault_permissions`](Self::set_vault_permissions) for the
    /// client, plus `principal_id`, and enables deployment and template
    /// deployment. `principal_id` must be non-empty.
    pub fn set_vault_permissions_for_deployment(
        &self,
        group: &str,
        vault: &str,
        principal_id: &str,
        mode: PolicyMode,
    ) -> Result<Vault> {
        let tenant = self.tenant()?;
        let grants = vec![
            AccessPolicyEntry::new(tenant, &self.client_id, Permissions::key_and_secret_manager())?,
            AccessPolicyEntry::new(tenant, principal_id, Permissions::key_and_secret_manager())?,
        ];

        self.update_policies(group, vault, mode, tenant, grants, |properties| {
            properties.enabled_for_deployment = Some(true);
            properties.enabled_for_template_deployment = Some(true);
        })
    }

    /// Replace starts from a fresh payload in the configured location.
    /// Merge starts from the fetched vault, so its location, SKU, tags and
    /// flags survive; only `access_policies` and the flags set by
    /// `enable` change.
    fn update_policies(
        &self,
        group: &str,
        vault: &str,
        mode: PolicyMode,
        tenant: Uuid,
        grants: Vec<AccessPolicyEntry>,
        enable: impl FnOnce(&mut VaultProperties),
    ) -> Result<Vault> {
        validate_vault_name(vault)?;
        let mut parameters = match mode {
            PolicyMode::Replace => {
                VaultCreateOrUpdateParameters::new(&self.location, VaultProperties::new(tenant))
            }
            PolicyMode::Merge => {
                let current = self.client.get(group, vault)?;
                let location = current.location.as_deref().unwrap_or(&self.location);
                let mut parameters =
                    VaultCreateOrUpdateParameters::new(location, current.properties);
                parameters.tags = current.tags;
                parameters.properties.vault_uri = None;
                parameters
            }
        };

        let current = std::mem::take(&mut parameters.properties.access_policies);
        parameters.properties.access_policies = apply_policy_update(mode, current, grants);
        enable(&mut parameters.properties);

        let updated = self.put_and_fetch(group, vault, &parameters)?;
        tracing::info!(
            group,
            vault,
            ?mode,
            policies = updated.properties.access_policies.len(),
            "vault permissions set"
        );
        Ok(updated)
    }

    /// Fetch one vault. A missing vault is a `RemoteApi` 404.
    pub fn get_vault(&self, group: &str, vault: &str) -> Result<Vault> {
        self.client.get(group, vault)
    }

    /// Lazy listings of every vault in the subscription and in the
    /// configured resource group.
    pub fn list_vaults(&self) -> VaultListing<'_> {
        VaultListing {
            subscription: self.client.list_by_subscription(),
            resource_group: self.client.list_by_resource_group(&self.group_name),
        }
    }

    /// Delete a vault; returns the raw acknowledgment status.
    pub fn delete_vault(&self, group: &str, vault: &str) -> Result<u16> {
        let status = self.client.delete(group, vault)?;
        tracing::info!(group, vault, status, "vault deleted");
        Ok(status)
    }
}

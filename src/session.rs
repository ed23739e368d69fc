//! Wiring from settings to ready-to-use managers.

use std::sync::Arc;

use crate::auth::{authorizer_for, Authorizer, Resource};
use crate::config::Settings;
use crate::errors::Result;
use crate::http::{ApiClient, Transport, UreqTransport};
use crate::keyvault::{KeyManager, KeysClient, VaultManager, VaultsClient};
use crate::resources::{Cleanup, GroupsClient};

/// Validated settings plus the transport and the two authorizers
/// (management scope and vault scope) every client is built from.
pub struct Session {
    settings: Settings,
    transport: Arc<dyn Transport>,
    management: Arc<dyn Authorizer>,
    key_vault: Arc<dyn Authorizer>,
}

impl Session {
    /// Validate `settings` and build the real HTTP transport and credentials.
    pub fn from_settings(settings: Settings) -> Result<Self> {
        settings.validate()?;
        let transport: Arc<dyn Transport> = Arc::new(UreqTransport::new(settings.request_timeout()));
        let management = authorizer_for(&settings, Resource::Management, transport.clone())?;
        let key_vault = authorizer_for(&settings, Resource::KeyVault, transport.clone())?;
        Ok(Self {
            settings,
            transport,
            management,
            key_vault,
        })
    }

    /// Build a session around an explicit transport and authorizers.
    pub fn with_authorizers(
        settings: Settings,
        transport: Arc<dyn Transport>,
        management: Arc<dyn Authorizer>,
        key_vault: Arc<dyn Authorizer>,
    ) -> Result<Self> {
        settings.validate()?;
        Ok(Self {
            settings,
            transport,
            management,
            key_vault,
        })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    fn management_api(&self) -> Result<ApiClient> {
        ApiClient::new(self.transport.clone(), self.management.clone())
    }

    pub fn vaults(&self) -> Result<VaultManager> {
        let client = VaultsClient::new(
            self.management_api()?,
            &self.settings.management_endpoint,
            &self.settings.subscription_id,
        );
        Ok(VaultManager::new(client, &self.settings))
    }

    pub fn keys(&self) -> Result<KeyManager> {
        let api = ApiClient::new(self.transport.clone(), self.key_vault.clone())?;
        Ok(KeyManager::new(KeysClient::new(api)))
    }

    pub fn groups(&self) -> Result<GroupsClient> {
        Ok(GroupsClient::new(
            self.management_api()?,
            &self.settings.management_endpoint,
            &self.settings.subscription_id,
        ))
    }

    /// Cleanup for the configured resource group.
    pub fn cleanup<'a>(&'a self, groups: &'a GroupsClient) -> Cleanup<'a> {
        Cleanup::new(groups, &self.settings.group_name, self.settings.keep_resources)
    }
}

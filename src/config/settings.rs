use std::path::Path;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{KvError, Result};

/// Principal granted access alongside the client by `set_vault_permissions`.
pub const DEFAULT_OPERATOR_OBJECT_ID: &str = "204b2841-e25d-455c-afd8-630a1244041e";

/// Subscription, tenant and group settings shared by every operation.
///
/// Loaded from `.kvprov.toml`, then overridden by `AZURE_*` environment
/// variables, then by command-line flags. Every field has a default so an
/// empty file (or none) is valid until `validate` runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Azure subscription that owns the resource groups.
    #[serde(default)]
    pub subscription_id: String,

    /// Azure AD tenant (must be a UUID).
    #[serde(default)]
    pub tenant_id: String,

    /// Application (client) id used for authentication and access policies.
    #[serde(default)]
    pub client_id: String,

    /// Resource group holding the vaults.
    #[serde(default = "default_group_name")]
    pub group_name: String,

    /// Azure region for new resources.
    #[serde(default = "default_location")]
    pub location: String,

    /// Skip resource-group deletion at the end of a run.
    #[serde(default)]
    pub keep_resources: bool,

    /// Second principal granted key/secret rights by `set-permissions`.
    #[serde(default = "default_operator_object_id")]
    pub operator_object_id: String,

    /// Resource Manager base URL.
    #[serde(default = "default_management_endpoint")]
    pub management_endpoint: String,

    /// Azure AD login base URL.
    #[serde(default = "default_login_endpoint")]
    pub login_endpoint: String,

    /// Whole-request timeout in seconds (transport default when unset).
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

// ── Serde default helpers ────────────────────────────────────────────

fn default_group_name() -> String {
    "kvprov-samples".to_string()
}

fn default_location() -> String {
    "westus2".to_string()
}

fn default_operator_object_id() -> String {
    DEFAULT_OPERATOR_OBJECT_ID.to_string()
}

fn default_management_endpoint() -> String {
    "https://management.azure.com".to_string()
}

fn default_login_endpoint() -> String {
    "https://login.microsoftonline.com".to_string()
}

// ── Implementation ───────────────────────────────────────────────────

impl Default for Settings {
    fn default() -> Self {
        Self {
            subscription_id: String::new(),
            tenant_id: String::new(),
            client_id: String::new(),
            group_name: default_group_name(),
            location: default_location(),
            keep_resources: false,
            operator_object_id: default_operator_object_id(),
            management_endpoint: default_management_endpoint(),
            login_endpoint: default_login_endpoint(),
            request_timeout_secs: None,
        }
    }
}

/// Parse a tenant id, rejecting anything that is not a UUID.
pub fn parse_tenant_id(tenant_id: &str) -> Result<Uuid> {
    Uuid::parse_str(tenant_id.trim()).map_err(|_| {
        KvError::InvalidArgument(format!("tenant id '{tenant_id}' is not a valid UUID"))
    })
}

/// Interpret a boolean-ish environment value.
fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}

impl Settings {
    /// Name of the config file we look for in the working directory.
    pub const FILE_NAME: &'static str = ".kvprov.toml";

    /// Load settings from `<dir>/.kvprov.toml`.
    ///
    /// If the file does not exist, defaults are returned.
    /// If the file exists but cannot be parsed, an error is returned.
    pub fn load(dir: &Path) -> Result<Self> {
        Self::load_file(&dir.join(Self::FILE_NAME), false)
    }

    /// Load settings from an explicit path. With `required`, a missing
    /// file is an error instead of yielding defaults.
    pub fn load_file(path: &Path, required: bool) -> Result<Self> {
        if !path.exists() {
            if required {
                return Err(KvError::ConfigError(format!(
                    "config file {} does not exist",
                    path.display()
                )));
            }
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)?;

        let settings: Settings = toml::from_str(&contents).map_err(|e| {
            KvError::ConfigError(format!("Failed to parse {}: {e}", path.display()))
        })?;

        Ok(settings)
    }

    /// Apply `AZURE_*` overrides through `lookup` (normally `std::env::var`).
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let set = |target: &mut String, var: &str| {
            if let Some(value) = lookup(var).filter(|v| !v.is_empty()) {
                *target = value;
            }
        };

        set(&mut self.subscription_id, "AZURE_SUBSCRIPTION_ID");
        set(&mut self.tenant_id, "AZURE_TENANT_ID");
        set(&mut self.client_id, "AZURE_CLIENT_ID");
        set(&mut self.group_name, "AZURE_BASE_GROUP_NAME");
        set(&mut self.location, "AZURE_LOCATION_DEFAULT");
        set(&mut self.operator_object_id, "AZURE_OBJECT_ID");

        if let Some(raw) = lookup("AZURE_KEEP_SAMPLE_RESOURCES") {
            self.keep_resources = parse_flag(&raw).ok_or_else(|| {
                KvError::ConfigError(format!(
                    "AZURE_KEEP_SAMPLE_RESOURCES must be a boolean, got '{raw}'"
                ))
            })?;
        }

        Ok(())
    }

    /// Check that everything the API calls need is present and well formed.
    pub fn validate(&self) -> Result<()> {
        if self.subscription_id.trim().is_empty() {
            return Err(KvError::ConfigError(
                "subscription id is required (AZURE_SUBSCRIPTION_ID or --subscription-id)".into(),
            ));
        }
        if self.tenant_id.trim().is_empty() {
            return Err(KvError::ConfigError(
                "tenant id is required (AZURE_TENANT_ID or --tenant-id)".into(),
            ));
        }
        parse_tenant_id(&self.tenant_id)?;

        if self.group_name.trim().is_empty() {
            return Err(KvError::ConfigError("resource group name cannot be empty".into()));
        }
        if self.location.trim().is_empty() {
            return Err(KvError::ConfigError("location cannot be empty".into()));
        }
        Ok(())
    }

    /// Request timeout as a `Duration`.
    pub fn request_timeout(&self) -> Option<std::time::Duration> {
        self.request_timeout_secs.map(std::time::Duration::from_secs)
    }
}

// ── Tests ────────────────────────────────────────────────────────────

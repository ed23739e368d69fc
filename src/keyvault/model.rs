//! Wire types for the vaults (ARM `2018-02-14`) and keys (`7.0`) APIs.
//!
//! Field names follow the service JSON; optional response fields are
//! `Option` because the service omits them until they are known (a vault
//! has no `vaultUri` before it is active, for example).

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ── Vaults ───────────────────────────────────────────────────────────

/// SKU family. Key Vault only offers `A`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SkuFamily {
    #[default]
    A,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SkuName {
    #[default]
    Standard,
    Premium,
}

/// Service tier of a vault.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Sku {
    pub family: SkuFamily,
    pub name: SkuName,
}

impl Sku {
    /// `standard` / `A`, used for every vault this crate creates.
    pub fn standard() -> Self {
        Self {
            family: SkuFamily::A,
            name: SkuName::Standard,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum KeyPermission {
    Encrypt,
    Decrypt,
    WrapKey,
    UnwrapKey,
    Sign,
    Verify,
    Get,
    List,
    Create,
    Update,
    Import,
    Delete,
    Backup,
    Restore,
    Recover,
    Purge,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SecretPermission {
    Get,
    List,
    Set,
    Delete,
    Backup,
    Restore,
    Recover,
    Purge,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CertificatePermission {
    Get,
    List,
    Delete,
    Create,
    Import,
    Update,
    Managecontacts,
    Getissuers,
    Listissuers,
    Setissuers,
    Deleteissuers,
    Manageissuers,
    Recover,
    Purge,
}

/// Operations a principal may perform, per object kind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permissions {
    #[serde(default)]
    pub keys: Vec<KeyPermission>,
    #[serde(default)]
    pub secrets: Vec<SecretPermission>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub certificates: Vec<CertificatePermission>,
}

/// A grant binding one principal to a set of permissions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessPolicyEntry {
    pub tenant_id: Uuid,
    pub object_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application_id: Option<Uuid>,
    pub permissions: Permissions,
}

/// Vault properties, sent on create-or-update and returned on read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VaultProperties {
    pub tenant_id: Uuid,
    pub sku: Sku,
    #[serde(default)]
    pub access_policies: Vec<AccessPolicyEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vault_uri: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled_for_deployment: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled_for_disk_encryption: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled_for_template_deployment: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable_soft_delete: Option<bool>,
}

impl VaultProperties {
    /// Standard SKU, no policies, no flags.
    pub fn new(tenant_id: Uuid) -> Self {
        Self {
            tenant_id,
            sku: Sku::standard(),
            access_policies: Vec::new(),
            vault_uri: None,
            enabled_for_deployment: None,
            enabled_for_disk_encryption: None,
            enabled_for_template_deployment: None,
            enable_soft_delete: None,
        }
    }
}

/// Body of a vault create-or-update request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VaultCreateOrUpdateParameters {
    pub location: String,
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub tags: HashMap<String, String>,
    pub properties: VaultProperties,
}

impl VaultCreateOrUpdateParameters {
    pub fn new(location: &str, properties: VaultProperties) -> Self {
        Self {
            location: location.to_string(),
            tags: HashMap::new(),
            properties,
        }
    }
}

/// A vault resource as returned by ARM.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Vault {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, rename = "type")]
    pub resource_type: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub tags: HashMap<String, String>,
    pub properties: VaultProperties,
}

impl Vault {
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }

    pub fn location(&self) -> &str {
        self.location.as_deref().unwrap_or("")
    }

    pub fn vault_uri(&self) -> Option<&str> {
        self.properties.vault_uri.as_deref()
    }
}

/// One page of an ARM list response.
#[derive(Debug, Deserialize)]
pub struct Page<T> {
    #[serde(default = "Vec::new")]
    pub value: Vec<T>,
    #[serde(default, rename = "nextLink")]
    pub next_link: Option<String>,
}

// ── Keys ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JsonWebKeyType {
    #[serde(rename = "RSA")]
    Rsa,
    #[serde(rename = "RSA-HSM")]
    RsaHsm,
    #[serde(rename = "EC")]
    Ec,
    #[serde(rename = "EC-HSM")]
    EcHsm,
    #[serde(rename = "oct")]
    Oct,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum JsonWebKeyOperation {
    Encrypt,
    Decrypt,
    Sign,
    Verify,
    WrapKey,
    UnwrapKey,
}

impl JsonWebKeyOperation {
    /// Every operation an RSA key supports.
    pub const ALL: [JsonWebKeyOperation; 6] = [
        Self::Encrypt,
        Self::Decrypt,
        Self::Sign,
        Self::Verify,
        Self::WrapKey,
        Self::UnwrapKey,
    ];
}

/// Key attributes. Timestamps are Unix seconds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyAttributes {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recovery_level: Option<String>,
}

/// Body of a key creation request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeyCreateParameters {
    pub kty: JsonWebKeyType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_size: Option<u32>,
    pub key_ops: Vec<JsonWebKeyOperation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attributes: Option<KeyAttributes>,
}

/// Public part of a key.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct JsonWebKey {
    #[serde(default)]
    pub kid: Option<String>,
    #[serde(default)]
    pub kty: Option<JsonWebKeyType>,
    #[serde(default)]
    pub key_ops: Vec<JsonWebKeyOperation>,
    /// RSA modulus, base64url.
    #[serde(default)]
    pub n: Option<String>,
    /// RSA public exponent, base64url.
    #[serde(default)]
    pub e: Option<String>,
}

/// A key as returned by the data plane.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct KeyBundle {
    pub key: JsonWebKey,
    #[serde(default)]
    pub attributes: KeyAttributes,
    #[serde(default)]
    pub tags: HashMap<String, String>,
}

impl KeyBundle {
    pub fn kid(&self) -> &str {
        self.key.kid.as_deref().unwrap_or("")
    }
}

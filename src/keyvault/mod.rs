//! Key Vault module — vault lifecycle, access policies and keys.
//!
//! This module provides:
//! - Wire types for the vaults and keys APIs (`model`)
//! - Access-policy assembly and merge/replace updates (`policy`)
//! - Lazy `nextLink` pagination (`pager`)
//! - `VaultsClient` / `VaultManager` for the control plane (`vaults`)
//! - `KeysClient` / `KeyManager` for the data plane (`keys`)

pub mod keys;
pub mod model;
pub mod pager;
pub mod policy;
pub mod vaults;

// Re-export the most commonly used items.
pub use keys::{KeyManager, KeysClient};
pub use model::{AccessPolicyEntry, KeyBundle, Permissions, Vault};
pub use pager::Pager;
pub use policy::PolicyMode;
pub use vaults::{VaultListing, VaultManager, VaultsClient};

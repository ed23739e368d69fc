//! One module per command; each exposes `execute`.

pub mod auth;
pub mod cleanup;
pub mod completions;
pub mod group;
pub mod key_create;
pub mod sample;
pub mod vault_create;
pub mod vault_delete;
pub mod vault_get;
pub mod vault_list;
pub mod vault_policies;

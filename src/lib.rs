pub mod auth;
pub mod cli;
pub mod config;
pub mod errors;
pub mod http;
pub mod keyvault;
pub mod naming;
pub mod resources;
pub mod sample;
pub mod session;

#[cfg(feature = "keyring-store")]
pub mod keyring;

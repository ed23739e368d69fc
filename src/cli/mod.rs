//! CLI module — Clap argument parser, output helpers, and command implementations.

pub mod commands;
pub mod output;

use std::path::PathBuf;

use clap::Parser;

use crate::config::Settings;
use crate::errors::Result;
use crate::keyvault::PolicyMode;
use crate::session::Session;

/// kvprov CLI: Azure Key Vault provisioning.
#[derive(Parser)]
#[command(
    name = "kvprov",
    about = "Provision Azure Key Vault vaults, access policies and keys",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: ./.kvprov.toml)
    #[arg(long, env = "KVPROV_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Azure subscription id
    #[arg(long, global = true)]
    pub subscription_id: Option<String>,

    /// Azure AD tenant id (UUID)
    #[arg(long, global = true)]
    pub tenant_id: Option<String>,

    /// Application (client) id
    #[arg(long, global = true)]
    pub client_id: Option<String>,

    /// Resource group holding the vaults
    #[arg(short, long, global = true)]
    pub group: Option<String>,

    /// Azure region for new resources
    #[arg(short, long, global = true)]
    pub location: Option<String>,

    /// Keep resources instead of deleting the resource group at the end
    #[arg(long, global = true)]
    pub keep_resources: bool,

    /// Verbose diagnostic logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// All available subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Create, inspect, list and delete vaults
    Vault {
        #[command(subcommand)]
        action: VaultAction,
    },

    /// Manage keys inside a vault
    Key {
        #[command(subcommand)]
        action: KeyAction,
    },

    /// Create or delete resource groups
    Group {
        #[command(subcommand)]
        action: GroupAction,
    },

    /// Delete the configured resource group (unless --keep-resources)
    Cleanup {
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// Run the full scenario: group, vault, permissions, key, cleanup
    Sample {
        /// Resource group name (default: random)
        #[arg(long)]
        group_name: Option<String>,
        /// Vault name (default: random)
        #[arg(long)]
        vault: Option<String>,
        /// Key name (default: random)
        #[arg(long)]
        key: Option<String>,
    },

    /// Manage stored credentials
    Auth {
        #[command(subcommand)]
        action: AuthAction,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for (bash, zsh, fish, powershell)
        shell: String,
    },
}

/// Vault subcommands.
#[derive(clap::Subcommand)]
pub enum VaultAction {
    /// Create a vault with no access policies
    Create {
        /// Vault name
        name: String,
        /// Tenant the vault trusts (default: configured tenant)
        #[arg(long)]
        vault_tenant: Option<String>,
    },

    /// Create a vault with disk encryption and a key-create/secret-set grant
    CreateWithPolicies {
        /// Vault name
        name: String,
        /// Principal (object id) to grant; omit for no policies
        #[arg(long, default_value = "")]
        principal: String,
    },

    /// Grant the client and operator principals key and secret access
    SetPermissions {
        /// Vault name
        name: String,
        /// Merge with existing policies instead of replacing them
        #[arg(long)]
        merge: bool,
    },

    /// Grant access to the client and a principal, enabling deployment
    SetPermissionsDeployment {
        /// Vault name
        name: String,
        /// Principal (object id) to grant
        #[arg(long)]
        principal: String,
        /// Merge with existing policies instead of replacing them
        #[arg(long)]
        merge: bool,
    },

    /// Show one vault
    Get {
        /// Vault name
        name: String,
    },

    /// List vaults in the subscription and in the resource group
    List,

    /// Delete a vault
    Delete {
        /// Vault name
        name: String,
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
}

/// Key subcommands.
#[derive(clap::Subcommand)]
pub enum KeyAction {
    /// Create an RSA-2048 key with every operation allowed
    Create {
        /// Vault name
        vault: String,
        /// Key name
        name: String,
    },
}

/// Resource group subcommands.
#[derive(clap::Subcommand)]
pub enum GroupAction {
    /// Create (or update) a resource group
    Create {
        /// Group name (default: configured group)
        name: Option<String>,
    },

    /// Delete a resource group and everything in it
    Delete {
        /// Group name (default: configured group)
        name: Option<String>,
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
}

/// Auth subcommands.
#[derive(clap::Subcommand)]
pub enum AuthAction {
    /// Save the service principal secret to the OS keyring
    Keyring {
        /// Remove the secret from the keyring instead of saving
        #[arg(long)]
        delete: bool,
    },
}

// ---------------------------------------------------------------------------
// Shared helpers used by multiple commands
// ---------------------------------------------------------------------------

/// Policy mode from a `--merge` flag.
pub fn policy_mode(merge: bool) -> PolicyMode {
    if merge {
        PolicyMode::Merge
    } else {
        PolicyMode::Replace
    }
}

/// Resolve settings: config file, then environment, then flags.
///
/// Not validated; commands that talk to Azure validate through
/// [`session`].
pub fn load_settings(cli: &Cli) -> Result<Settings> {
    load_settings_with(cli, |var| std::env::var(var).ok())
}

fn load_settings_with<F>(cli: &Cli, lookup: F) -> Result<Settings>
where
    F: Fn(&str) -> Option<String>,
{
    let mut settings = match &cli.config {
        Some(path) => Settings::load_file(path, true)?,
        None => Settings::load(&std::env::current_dir()?)?,
    };
    settings.apply_env(lookup)?;
    apply_flags(cli, &mut settings);
    Ok(settings)
}

fn apply_flags(cli: &Cli, settings: &mut Settings) {
    let overrides = [
        (&cli.subscription_id, &mut settings.subscription_id),
        (&cli.tenant_id, &mut settings.tenant_id),
        (&cli.client_id, &mut settings.client_id),
        (&cli.group, &mut settings.group_name),
        (&cli.location, &mut settings.location),
    ];
    for (flag, target) in overrides {
        if let Some(value) = flag {
            *target = value.clone();
        }
    }
    if cli.keep_resources {
        settings.keep_resources = true;
    }
}

/// Validated settings wired to the real transport and credentials.
pub fn session(cli: &Cli) -> Result<Session> {
    Session::from_settings(load_settings(cli)?)
}

use clap::Parser;
use kvprov::cli::commands;
use kvprov::cli::{AuthAction, Cli, Commands, GroupAction, KeyAction, VaultAction};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Vault { ref action } => match action {
            VaultAction::Create {
                ref name,
                ref vault_tenant,
            } => commands::vault_create::execute(&cli, name, vault_tenant.as_deref()),
            VaultAction::CreateWithPolicies {
                ref name,
                ref principal,
            } => commands::vault_create::execute_with_policies(&cli, name, principal),
            VaultAction::SetPermissions { ref name, merge } => {
                commands::vault_policies::execute(&cli, name, *merge)
            }
            VaultAction::SetPermissionsDeployment {
                ref name,
                ref principal,
                merge,
            } => commands::vault_policies::execute_deployment(&cli, name, principal, *merge),
            VaultAction::Get { ref name } => commands::vault_get::execute(&cli, name),
            VaultAction::List => commands::vault_list::execute(&cli),
            VaultAction::Delete { ref name, force } => {
                commands::vault_delete::execute(&cli, name, *force)
            }
        },
        Commands::Key { ref action } => match action {
            KeyAction::Create {
                ref vault,
                ref name,
            } => commands::key_create::execute(&cli, vault, name),
        },
        Commands::Group { ref action } => match action {
            GroupAction::Create { ref name } => {
                commands::group::execute_create(&cli, name.as_deref())
            }
            GroupAction::Delete { ref name, force } => {
                commands::group::execute_delete(&cli, name.as_deref(), *force)
            }
        },
        Commands::Cleanup { force } => commands::cleanup::execute(&cli, force),
        Commands::Sample {
            ref group_name,
            ref vault,
            ref key,
        } => commands::sample::execute(
            &cli,
            group_name.as_deref(),
            vault.as_deref(),
            key.as_deref(),
        ),
        Commands::Auth { ref action } => match action {
            AuthAction::Keyring { delete } => commands::auth::execute_keyring(&cli, *delete),
        },
        Commands::Completions { ref shell } => commands::completions::execute(shell),
    };

    if let Err(e) = result {
        kvprov::cli::output::error(&e.to_string());
        std::process::exit(1);
    }
}

/// Diagnostics go to stderr; `RUST_LOG` wins over `--verbose`.
fn init_tracing(verbose: bool) {
    let default = if verbose { "kvprov=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

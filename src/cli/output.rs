//! Colored terminal output helpers.
//!
//! All user-facing output goes through these functions so we get
//! consistent styling across every command.

use chrono::{DateTime, Utc};
use comfy_table::{ContentArrangement, Table};
use console::style;

use crate::keyvault::{KeyBundle, Vault};

/// Print a green success message: "check_mark {msg}"
pub fn success(msg: &str) {
    println!("{} {}", style("\u{2713}").green().bold(), msg);
}

/// Print a red error message: "x_mark {msg}"
pub fn error(msg: &str) {
    eprintln!("{} {}", style("\u{2717}").red().bold(), msg);
}

/// Print a yellow warning: "warning_sign {msg}"
pub fn warning(msg: &str) {
    eprintln!("{} {}", style("\u{26a0}").yellow().bold(), msg);
}

/// Print a blue info message: "info_sign {msg}"
pub fn info(msg: &str) {
    println!("{} {}", style("\u{2139}").blue().bold(), msg);
}

/// Print a dim tip/hint: "arrow {msg}"
pub fn tip(msg: &str) {
    println!("{} {}", style("\u{2192}").dim(), style(msg).dim());
}

/// Print a table of vaults (Name, Location, URI, Policies).
pub fn print_vaults_table(vaults: &[Vault]) {
    if vaults.is_empty() {
        info("No vaults found.");
        tip("Run `kvprov vault create <NAME>` to create one.");
        return;
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Name", "Location", "URI", "Policies"]);

    for v in vaults {
        table.add_row(vec![
            v.name().to_string(),
            v.location().to_string(),
            v.vault_uri().unwrap_or("-").to_string(),
            v.properties.access_policies.len().to_string(),
        ]);
    }

    println!("{table}");
}

/// Print one vault with its access policies.
pub fn print_vault(vault: &Vault) {
    println!("{}  {}", style("Name").bold(), vault.name());
    println!("{}  {}", style("Location").bold(), vault.location());
    if let Some(id) = &vault.id {
        println!("{}  {}", style("Id").bold(), style(id).dim());
    }
    println!("{}  {}", style("URI").bold(), vault.vault_uri().unwrap_or("-"));

    let policies = &vault.properties.access_policies;
    if policies.is_empty() {
        info("No access policies.");
        return;
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Object id", "Keys", "Secrets", "Certificates"]);
    for p in policies {
        table.add_row(vec![
            p.object_id.clone(),
            join_debug(&p.permissions.keys),
            join_debug(&p.permissions.secrets),
            join_debug(&p.permissions.certificates),
        ]);
    }
    println!("{table}");
}

/// Print a created key: id, type, operations and creation time.
pub fn print_key(key: &KeyBundle) {
    println!("{}  {}", style("Key id").bold(), key.kid());
    if let Some(kty) = &key.key.kty {
        println!("{}  {kty:?}", style("Type").bold());
    }
    println!("{}  {}", style("Ops").bold(), join_debug(&key.key.key_ops));
    if let Some(created) = key
        .attributes
        .created
        .and_then(|ts| DateTime::<Utc>::from_timestamp(ts, 0))
    {
        println!(
            "{}  {}",
            style("Created").bold(),
            created.format("%Y-%m-%d %H:%M:%S")
        );
    }
}

fn join_debug<T: std::fmt::Debug>(items: &[T]) -> String {
    if items.is_empty() {
        return "-".to_string();
    }
    items
        .iter()
        .map(|i| format!("{i:?}"))
        .collect::<Vec<_>>()
        .join(", ")
}

//! Integration tests for the kvprov CLI.
//!
//! These tests exercise the binary end-to-end using `assert_cmd`.
//! Anything that would reach Azure is out of reach here, so we focus on
//! help output and on configuration errors caught before any request.

use assert_cmd::Command;
use assert_fs::prelude::*;
use assert_fs::TempDir;
use predicates::prelude::*;

const AZURE_VARS: &[&str] = &[
    "AZURE_SUBSCRIPTION_ID",
    "AZURE_TENANT_ID",
    "AZURE_CLIENT_ID",
    "AZURE_CLIENT_SECRET",
    "AZURE_BASE_GROUP_NAME",
    "AZURE_LOCATION_DEFAULT",
    "AZURE_KEEP_SAMPLE_RESOURCES",
    "AZURE_OBJECT_ID",
    "KVPROV_CONFIG",
];

/// Helper: a kvprov command in an empty temp dir with no Azure env.
fn kvprov(dir: &TempDir) -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("kvprov").expect("binary should exist");
    cmd.current_dir(dir.path());
    for var in AZURE_VARS {
        cmd.env_remove(var);
    }
    cmd
}

#[test]
fn help_flag_shows_usage() {
    let tmp = TempDir::new().unwrap();
    kvprov(&tmp)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Azure Key Vault"))
        .stdout(predicate::str::contains("vault"))
        .stdout(predicate::str::contains("key"))
        .stdout(predicate::str::contains("group"))
        .stdout(predicate::str::contains("cleanup"))
        .stdout(predicate::str::contains("sample"));
}

#[test]
fn version_flag_shows_version() {
    let tmp = TempDir::new().unwrap();
    kvprov(&tmp)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("kvprov"));
}

#[test]
fn no_args_shows_help() {
    let tmp = TempDir::new().unwrap();
    kvprov(&tmp)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn vault_help_lists_lifecycle_commands() {
    let tmp = TempDir::new().unwrap();
    kvprov(&tmp)
        .args(["vault", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("create-with-policies"))
        .stdout(predicate::str::contains("set-permissions"))
        .stdout(predicate::str::contains("set-permissions-deployment"))
        .stdout(predicate::str::contains("list"))
        .stdout(predicate::str::contains("delete"));
}

#[test]
fn missing_subscription_is_reported() {
    let tmp = TempDir::new().unwrap();
    kvprov(&tmp)
        .args(["vault", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("subscription id is required"));
}

#[test]
fn invalid_tenant_from_env_is_rejected() {
    let tmp = TempDir::new().unwrap();
    kvprov(&tmp)
        .env("AZURE_SUBSCRIPTION_ID", "sub-1")
        .env("AZURE_TENANT_ID", "not-a-uuid")
        .args(["vault", "get", "some-vault"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a valid UUID"));
}

#[test]
fn invalid_tenant_from_config_file_is_rejected() {
    let tmp = TempDir::new().unwrap();
    tmp.child(".kvprov.toml")
        .write_str("subscription_id = \"sub-1\"\ntenant_id = \"bogus\"\n")
        .unwrap();

    kvprov(&tmp)
        .args(["key", "create", "some-vault", "some-key"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a valid UUID"));
}

#[test]
fn flag_overrides_config_file() {
    let tmp = TempDir::new().unwrap();
    tmp.child(".kvprov.toml")
        .write_str("subscription_id = \"sub-1\"\ntenant_id = \"72f988bf-86f1-41af-91ab-2d7cd011db47\"\n")
        .unwrap();

    kvprov(&tmp)
        .args(["--tenant-id", "nope", "vault", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("'nope' is not a valid UUID"));
}

#[test]
fn malformed_config_file_is_reported() {
    let tmp = TempDir::new().unwrap();
    tmp.child(".kvprov.toml").write_str("subscription_id = [").unwrap();

    kvprov(&tmp)
        .args(["vault", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse"));
}

#[test]
fn bad_keep_flag_in_env_is_reported() {
    let tmp = TempDir::new().unwrap();
    kvprov(&tmp)
        .env("AZURE_KEEP_SAMPLE_RESOURCES", "maybe")
        .arg("cleanup")
        .assert()
        .failure()
        .stderr(predicate::str::contains("AZURE_KEEP_SAMPLE_RESOURCES"));
}

#[test]
fn completions_generate_script() {
    let tmp = TempDir::new().unwrap();
    kvprov(&tmp)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("kvprov"));
}

#[test]
fn completions_reject_unknown_shell() {
    let tmp = TempDir::new().unwrap();
    kvprov(&tmp)
        .args(["completions", "csh"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown shell"));
}

#[cfg(not(feature = "keyring-store"))]
#[test]
fn keyring_without_feature_fails() {
    let tmp = TempDir::new().unwrap();
    kvprov(&tmp)
        .args(["auth", "keyring"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("keyring support not compiled"));
}

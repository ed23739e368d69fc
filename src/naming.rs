//! Resource names: random sample names and Key Vault naming rules.

use std::sync::LazyLock;

use rand::Rng;
use regex::Regex;

use crate::errors::{KvError, Result};

/// Characters used for random suffixes.
const SUFFIX_CHARS: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Length of the random part of generated names.
pub const SUFFIX_LEN: usize = 5;

/// `prefix` followed by `len` random lowercase alphanumerics.
pub fn generate_with_prefix(prefix: &str, len: usize) -> String {
    let mut rng = rand::rng();
    let suffix: String = (0..len)
        .map(|_| SUFFIX_CHARS[rng.random_range(0..SUFFIX_CHARS.len())] as char)
        .collect();
    format!("{prefix}{suffix}")
}

/// `{base}-{affix}-{random}`, e.g. `kvprov-samples-KeyVault-x1y2z`.
pub fn generate_group_name(base: &str, affix: &str) -> String {
    generate_with_prefix(&format!("{base}-{affix}-"), SUFFIX_LEN)
}

static VAULT_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z][A-Za-z0-9-]{1,22}[A-Za-z0-9]$").expect("vault name pattern is valid")
});

static KEY_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9-]{1,127}$").expect("key name pattern is valid"));

/// Vault names: 3–24 characters, letters, digits and hyphens, starting
/// with a letter, ending with a letter or digit, no `--`.
pub fn validate_vault_name(name: &str) -> Result<()> {
    if !VAULT_NAME.is_match(name) || name.contains("--") {
        return Err(KvError::InvalidArgument(format!(
            "vault name '{name}' is invalid: use 3-24 letters, digits and hyphens, \
             starting with a letter and ending with a letter or digit"
        )));
    }
    Ok(())
}

/// Key names: 1–127 letters, digits and hyphens.
pub fn validate_key_name(name: &str) -> Result<()> {
    if !KEY_NAME.is_match(name) {
        return Err(KvError::InvalidArgument(format!(
            "key name '{name}' is invalid: only letters, digits and hyphens are allowed"
        )));
    }
    Ok(())
}

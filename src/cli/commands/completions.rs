//! `kvprov completions <SHELL>` prints a completion script to stdout.
//!
//!   kvprov completions bash > ~/.bash_completion.d/kvprov

use std::io::{self, Write};

use clap::CommandFactory;
use clap_complete::{generate, Shell};

use crate::cli::Cli;
use crate::errors::{KvError, Result};

pub fn execute(shell: &str) -> Result<()> {
    write_script(parse_shell(shell)?, &mut io::stdout().lock())
}

/// Render the script for `shell` into `out`.
fn write_script(shell: Shell, out: &mut dyn Write) -> Result<()> {
    let mut cmd = Cli::command();
    let bin = cmd.get_name().to_string();
    generate(shell, &mut cmd, bin, out);
    out.flush()?;
    Ok(())
}

fn parse_shell(name: &str) -> Result<Shell> {
    let shell = match name.trim().to_ascii_lowercase().as_str() {
        "bash" => Shell::Bash,
        "zsh" => Shell::Zsh,
        "fish" => Shell::Fish,
        "powershell" | "pwsh" | "ps" => Shell::PowerShell,
        "elvish" => Shell::Elvish,
        other => {
            return Err(KvError::InvalidArgument(format!(
                "unknown shell '{other}'; expected bash, zsh, fish, powershell or elvish"
            )))
        }
    };
    Ok(shell)
}

//! Shell completion generation.

use clap::CommandFactory;
use clap_complete::{generate, shells};

use crate::cli::{Cli, Shell};

pub fn execute(shell: Shell) -> crate::error::CliResult<()> {
    let mut cmd = Cli::command();
    let out = &mut std::io::stdout();

    match shell {
        Shell::Bash => generate(shells::Bash, &mut cmd, "dirforge", out),
        Shell::Zsh => generate(shells::Zsh, &mut cmd, "dirforge", out),
        Shell::Fish => generate(shells::Fish, &mut cmd, "dirforge", out),
        Shell::PowerShell => generate(shells::PowerShell, &mut cmd, "dirforge", out),
        Shell::Elvish => generate(shells::Elvish, &mut cmd, "dirforge", out),
    };

    Ok(())
}

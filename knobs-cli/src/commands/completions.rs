//! Shell completion generation command.

use crate::cli::Cli;
use crate::error::CliError;
use crate::utils::GlobalOptions;
use clap::{Args, CommandFactory};
use clap_complete::{generate, Shell};
use std::io;

/// Name of the installed binary
const BIN_NAME: &str = "knobs";

/// Generate shell completion scripts
#[derive(Args, Debug)]
pub struct CompletionsCommand {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

impl CompletionsCommand {
    /// Execute the completions command.
    pub fn execute(&self, global: &GlobalOptions) -> Result<(), CliError> {
        if !global.quiet {
            if let Some(hint) = install_hint(self.shell) {
                eprintln!("# Enable {} completions with:", self.shell);
                eprintln!("#   {hint}");
                eprintln!();
            }
        }

        generate(self.shell, &mut Cli::command(), BIN_NAME, &mut io::stdout());
        Ok(())
    }
}

/// How to install the generated script, for shells with a usual location.
fn install_hint(shell: Shell) -> Option<&'static str> {
    match shell {
        Shell::Bash => {
            Some("knobs completions bash > ~/.local/share/bash-completion/completions/knobs")
        }
        Shell::Zsh => Some("knobs completions zsh > ~/.zsh/completions/_knobs"),
        Shell::Fish => Some("knobs completions fish > ~/.config/fish/completions/knobs.fish"),
        Shell::PowerShell => Some("knobs completions powershell | Out-String | Invoke-Expression"),
        _ => None,
    }
}

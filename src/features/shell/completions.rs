//! Shell completions generation.
//!
//! Generates shell completion scripts for bash, zsh, fish, PowerShell and elvish.

use clap::CommandFactory;
use clap_complete::Shell;

use crate::cli::args::Cli;
use crate::error::FocusError;

/// Binary name completions are generated for.
pub const BIN_NAME: &str = "focus-space";

/// Generate shell completions for the specified shell.
///
/// # Errors
///
/// Returns an error if the generated script is not valid UTF-8.
pub fn generate_completions(shell: Shell) -> Result<String, FocusError> {
    let mut cmd = Cli::command();
    let mut buf = Vec::new();
    clap_complete::generate(shell, &mut cmd, BIN_NAME, &mut buf);
    String::from_utf8(buf).map_err(|e| FocusError::InvalidInput(format!("UTF-8 error: {e}")))
}

/// Get shell from string name.
#[must_use]
pub fn shell_from_str(s: &str) -> Option<Shell> {
    match s.to_lowercase().as_str() {
        "bash" => Some(Shell::Bash),
        "zsh" => Some(Shell::Zsh),
        "fish" => Some(Shell::Fish),
        "powershell" | "ps" | "pwsh" => Some(Shell::PowerShell),
        "elvish" => Some(Shell::Elvish),
        _ => None,
    }
}

/// Get installation instructions for shell completions.
#[must_use]
pub fn completion_install_instructions(shell: Shell) -> String {
    match shell {
        Shell::Bash => format!(
            "# Add to ~/.bashrc:\nsource <({BIN_NAME} completions bash)\n\n\
             # Or save to a file:\n{BIN_NAME} completions bash > ~/.local/share/bash-completion/completions/{BIN_NAME}\n"
        ),
        Shell::Zsh => format!(
            "# Save to your fpath:\n{BIN_NAME} completions zsh > ~/.zsh/completions/_{BIN_NAME}\n\
             # Then add to ~/.zshrc (before compinit):\nfpath=(~/.zsh/completions $fpath)\n\
             autoload -Uz compinit && compinit\n"
        ),
        Shell::Fish => format!(
            "# Save to fish completions directory:\n\
             {BIN_NAME} completions fish > ~/.config/fish/completions/{BIN_NAME}.fish\n"
        ),
        Shell::PowerShell => format!(
            "# Add to your PowerShell profile ($PROFILE):\n\
             {BIN_NAME} completions powershell | Out-String | Invoke-Expression\n"
        ),
        Shell::Elvish => format!(
            "# Save to elvish completions directory:\n\
             {BIN_NAME} completions elvish > ~/.config/elvish/lib/{BIN_NAME}.elv\n\
             # Then add to rc.elv:\nuse {BIN_NAME}\n"
        ),
        _ => "Unknown shell".to_string(),
    }
}

//! Shell completions command

use clap::CommandFactory;
use hookchain::error::{ConfigurationError, Result};

use crate::cli::CompletionsArgs;

fn parse_shell(name: &str) -> Result<clap_complete::Shell> {
    match name.to_lowercase().as_str() {
        "bash" => Ok(clap_complete::Shell::Bash),
        "elvish" => Ok(clap_complete::Shell::Elvish),
        "fish" => Ok(clap_complete::Shell::Fish),
        "powershell" | "pwsh" => Ok(clap_complete::Shell::PowerShell),
        "zsh" => Ok(clap_complete::Shell::Zsh),
        _ => Err(ConfigurationError::ConfigInvalid {
            message: format!(
                "Unknown shell: {}. Supported shells: bash, elvish, fish, powershell, zsh",
                name
            ),
        }),
    }
}

/// Generate shell completions
pub fn run(args: CompletionsArgs) -> Result<()> {
    let shell = parse_shell(&args.shell)?;
    let mut cmd = <crate::cli::Cli as CommandFactory>::command();
    clap_complete::generate(shell, &mut cmd, "hookchain", &mut std::io::stdout().lock());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_shell() {
        assert_eq!(parse_shell("bash").ok(), Some(clap_complete::Shell::Bash));
        assert_eq!(parse_shell("PWSH").ok(), Some(clap_complete::Shell::PowerShell));
        assert_eq!(parse_shell("zsh").ok(), Some(clap_complete::Shell::Zsh));
    }

    #[test]
    fn test_unknown_shell() {
        let err = parse_shell("tcsh").expect_err("unsupported");
        assert!(err.to_string().contains("tcsh"));
    }

    #[test]
    fn test_completions_fish() {
        let args = CompletionsArgs {
            shell: "fish".to_string(),
        };
        assert!(run(args).is_ok());
    }
}

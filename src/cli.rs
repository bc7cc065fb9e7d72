//! CLI definitions using clap derive API

use clap::builder::{Styles, styling::AnsiColor};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Hookchain - bundle hook and setting resolution
///
/// Resolve hook chains and post-process settings of bundles configured in a
/// pipeline environment.
#[derive(Parser, Debug)]
#[command(
    name = "hookchain",
    author,
    version,
    color = clap::ColorChoice::Auto,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Resolve bundle hooks and settings",
    long_about = "Hookchain resolves the hook chains and settings of bundles configured in a \
                  pipeline environment, and runs hooks through an external interpreter.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n    \
                  hookchain -c ./pipeline -e ./pipeline/env/shot.yml -b tk-multi-publish setting thumbnails\n    \
                  hookchain -c ./pipeline -e ./pipeline/env/shot.yml -b tk-multi-publish chain hook_scan\n    \
                  hookchain -c ./pipeline -e ./pipeline/env/shot.yml -b tk-multi-publish run hook_scan --arg item=shot_010"
)]
pub struct Cli {
    #[command(flatten)]
    pub target: TargetArgs,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Which bundle of which pipeline configuration to work on
#[derive(Args, Debug, Clone, Default)]
pub struct TargetArgs {
    /// Pipeline configuration root
    #[arg(long, short = 'c', global = true, env = "HOOKCHAIN_CONFIG")]
    pub config: Option<PathBuf>,

    /// Environment file listing frameworks and bundles
    #[arg(long, short = 'e', global = true, env = "HOOKCHAIN_ENVIRONMENT")]
    pub environment: Option<PathBuf>,

    /// Bundle name as configured in the environment
    #[arg(long, short = 'b', global = true)]
    pub bundle: Option<String>,

    /// Folder with default core hook implementations
    #[arg(long, global = true, value_name = "DIR")]
    pub install_hooks: Option<PathBuf>,

    /// Program running hook chains
    #[arg(long, global = true, default_value = "python3")]
    pub interpreter: String,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print a post-processed setting value as JSON
    Setting(SettingArgs),

    /// Resolve a single hook reference expression to a path
    Resolve(ResolveArgs),

    /// Print the resolved hook chain of a hook setting
    Chain(ChainArgs),

    /// Execute the hook configured for a setting
    Run(RunArgs),

    /// Execute a hook from the configuration's hooks folder by name
    RunByName(RunByNameArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the setting command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Print a setting:\n    hookchain setting thumbnails\n\n\
                  Fall back to a default when unset:\n    hookchain setting label --default '\"untitled\"'")]
pub struct SettingArgs {
    /// Setting name
    pub name: String,

    /// JSON value used when the setting is not configured
    #[arg(long, value_name = "JSON")]
    pub default: Option<String>,
}

/// Arguments for the resolve command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Resolve a config hook:\n    hookchain resolve '{config}/scan.py'\n\n\
                  Resolve a manifest default:\n    hookchain resolve default --setting hook_scan")]
pub struct ResolveArgs {
    /// Hook reference expression
    pub expression: String,

    /// Setting the expression is resolved for (needed for `default`)
    #[arg(long, short = 's', default_value = "")]
    pub setting: String,
}

/// Arguments for the chain command
#[derive(Parser, Debug)]
pub struct ChainArgs {
    /// Hook setting name
    pub setting: String,
}

/// Arguments for the run command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Run a hook:\n    hookchain run hook_scan\n\n\
                  Run a hook method with arguments:\n    hookchain run hook_scan --method validate --arg item=shot_010")]
pub struct RunArgs {
    /// Hook setting name
    pub setting: String,

    /// Hook method to run
    #[arg(long, short = 'm')]
    pub method: Option<String>,

    /// Keyword argument passed to the hook, value parsed as JSON when possible
    #[arg(long = "arg", value_name = "KEY=VALUE")]
    pub args: Vec<String>,
}

/// Arguments for the run-by-name command
#[derive(Parser, Debug)]
pub struct RunByNameArgs {
    /// Hook file name without extension
    pub hook: String,

    /// Keyword argument passed to the hook, value parsed as JSON when possible
    #[arg(long = "arg", value_name = "KEY=VALUE")]
    pub args: Vec<String>,
}

/// Arguments for the completions command
#[derive(Parser, Debug)]
pub struct CompletionsArgs {
    /// Shell type (bash, elvish, fish, powershell, zsh)
    #[arg(long)]
    pub shell: String,
}

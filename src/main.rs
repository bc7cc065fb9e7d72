//! Hookchain - bundle hook and setting resolution
//!
//! Command line front end for resolving the hook chains and settings of
//! bundles configured in a pipeline environment.

use clap::Parser;
use miette::Diagnostic;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

mod cli;
mod commands;

use cli::{Cli, Commands};

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "hookchain=debug" } else { "hookchain=warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_writer(std::io::stderr),
        )
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let target = &cli.target;
    let result = match cli.command {
        Commands::Setting(args) => commands::setting::run(target, args),
        Commands::Resolve(args) => commands::resolve::run(target, args),
        Commands::Chain(args) => commands::chain::run(target, args),
        Commands::Run(args) => commands::run::run(target, args),
        Commands::RunByName(args) => commands::run::run_by_name(target, args),
        Commands::Completions(args) => commands::completions::run(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        if let Some(help) = e.help() {
            eprintln!("  help: {}", help);
        }
        std::process::exit(1);
    }
}

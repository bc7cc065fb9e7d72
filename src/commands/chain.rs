//! Chain command implementation

use console::Style;
use hookchain::error::Result;
use hookchain::{BaseLayer, HookChain, OmittedReason};

use super::helpers::open_bundle;
use crate::cli::{ChainArgs, TargetArgs};

pub fn run(target: &TargetArgs, args: ChainArgs) -> Result<()> {
    let bundle = open_bundle(target)?;
    let chain = bundle.hook_chain(&args.setting)?;

    // Paths go to stdout one per line so the output can be piped
    for path in &chain.paths {
        println!("{}", path.display());
    }

    eprintln!(
        "{} {}",
        Style::new().bold().apply_to(format!("{}:", args.setting)),
        describe_base(&chain)
    );
    Ok(())
}

fn describe_base(chain: &HookChain) -> String {
    match &chain.base {
        BaseLayer::NotApplicable => "no default inherited".to_string(),
        BaseLayer::Injected { expression } => format!(
            "inherits manifest default {}",
            Style::new().cyan().apply_to(expression)
        ),
        BaseLayer::Omitted(OmittedReason::NoDefault) => Style::new()
            .dim()
            .apply_to("manifest declares no default to inherit")
            .to_string(),
        BaseLayer::Omitted(OmittedReason::EngineHookMissing { engine, path }) => format!(
            "{} has no default hook at {}, not inherited",
            Style::new().yellow().apply_to(engine),
            path.display()
        ),
    }
}

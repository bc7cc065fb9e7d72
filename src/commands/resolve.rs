//! Resolve command implementation

use hookchain::error::Result;

use super::helpers::open_bundle;
use crate::cli::{ResolveArgs, TargetArgs};

pub fn run(target: &TargetArgs, args: ResolveArgs) -> Result<()> {
    let bundle = open_bundle(target)?;
    let path = bundle.resolve_hook_path(&args.setting, &args.expression)?;
    println!("{}", path.display());
    Ok(())
}

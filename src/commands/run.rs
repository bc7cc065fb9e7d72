//! Run and run-by-name command implementations

use hookchain::error::Result;
use serde_json::Value;

use super::helpers::{open_bundle, parse_hook_args};
use crate::cli::{RunArgs, RunByNameArgs, TargetArgs};

pub fn run(target: &TargetArgs, args: RunArgs) -> Result<()> {
    let hook_args = parse_hook_args(&args.args)?;
    let bundle = open_bundle(target)?;
    let result = match args.method.as_deref() {
        Some(method) => bundle.execute_hook_method(&args.setting, method, &hook_args)?,
        None => bundle.execute_hook(&args.setting, &hook_args)?,
    };
    print_result(&result)
}

pub fn run_by_name(target: &TargetArgs, args: RunByNameArgs) -> Result<()> {
    let hook_args = parse_hook_args(&args.args)?;
    let bundle = open_bundle(target)?;
    let result = bundle.execute_hook_by_name(&args.hook, &hook_args)?;
    print_result(&result)
}

fn print_result(result: &Value) -> Result<()> {
    if !result.is_null() {
        println!("{}", serde_json::to_string_pretty(result)?);
    }
    Ok(())
}

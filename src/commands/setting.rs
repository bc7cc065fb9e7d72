//! Setting command implementation

use hookchain::error::{ConfigurationError, Result};

use super::helpers::open_bundle;
use crate::cli::{SettingArgs, TargetArgs};

pub fn run(target: &TargetArgs, args: SettingArgs) -> Result<()> {
    let default = args
        .default
        .as_deref()
        .map(serde_json::from_str)
        .transpose()
        .map_err(|e| ConfigurationError::ConfigInvalid {
            message: format!("--default is not valid JSON: {}", e),
        })?;

    let bundle = open_bundle(target)?;
    let value = bundle.get_setting(&args.name, default)?;
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}

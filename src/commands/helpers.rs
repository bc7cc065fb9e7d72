//! Command helper utilities

use std::path::PathBuf;
use std::rc::Rc;

use hookchain::config::{EnvironmentConfig, LocalBundleDescriptor, PipelineConfiguration};
use hookchain::error::{ConfigurationError, Result};
use hookchain::hook::{HookArgs, ScriptHookInvoker};
use hookchain::{Bundle, Toolkit};
use serde_json::Value;

use crate::cli::TargetArgs;

fn required<'a, T: ?Sized>(value: Option<&'a T>, flag: &str) -> Result<&'a T> {
    value.ok_or_else(|| ConfigurationError::ConfigInvalid {
        message: format!("{flag} is required for this command"),
    })
}

/// Load the bundle selected by the global options
pub fn open_bundle(target: &TargetArgs) -> Result<Bundle> {
    let root = required(target.config.as_deref(), "--config")?;
    let environment_file = required(target.environment.as_deref(), "--environment")?;
    let name = required(target.bundle.as_deref(), "--bundle")?;

    let pipeline = PipelineConfiguration::open(root)?;
    let environment = EnvironmentConfig::load(environment_file)?;

    let entry = environment
        .bundle(name)
        .ok_or_else(|| ConfigurationError::ConfigInvalid {
            message: format!(
                "Bundle '{}' is not configured in {}. Configured bundles: {}",
                name,
                environment_file.display(),
                environment.bundle_names().collect::<Vec<_>>().join(", ")
            ),
        })?;
    let descriptor = LocalBundleDescriptor::load(name, &entry.location)?;
    let settings = entry.settings.clone();
    let engine = environment.engine_for(name).map(String::from);

    let mut toolkit = Toolkit::new(pipeline, ScriptHookInvoker::new(&target.interpreter));
    if let Some(folder) = &target.install_hooks {
        toolkit = toolkit.with_install_hooks(PathBuf::from(folder));
    }

    Bundle::builder(Rc::new(toolkit), descriptor, Rc::new(environment))
        .settings(settings)
        .engine(engine)
        .build()
}

/// Parse `key=value` hook arguments, reading values as JSON when they parse
pub fn parse_hook_args(pairs: &[String]) -> Result<HookArgs> {
    let mut args = HookArgs::new();
    for pair in pairs {
        let (key, value) = pair
            .split_once('=')
            .ok_or_else(|| ConfigurationError::ConfigInvalid {
                message: format!("Hook argument '{}' is not on the form key=value", pair),
            })?;
        if key.is_empty() {
            return Err(ConfigurationError::ConfigInvalid {
                message: format!("Hook argument '{}' has an empty key", pair),
            });
        }
        let value =
            serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));
        args.insert(key.to_string(), value);
    }
    Ok(args)
}

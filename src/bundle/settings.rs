//! Schema driven post-processing of raw setting values
//!
//! Values are rewritten according to their schema entry:
//!
//! - `list` values are processed element by element with the `values` schema
//! - `dict` values have every key declared in `items` processed recursively
//! - `config_path` values become absolute paths under the config folder
//! - any other string starting with `hook:` is computed by a core hook,
//!   `hook:<name>[:<param>...]`
//!
//! The raw value is never modified; a new value is returned.

use serde_json::{Value, json};
use tracing::debug;

use crate::config::{ConfigurationSchema, SchemaEntry, SettingType};
use crate::error::{ConfigurationError, Result};
use crate::hook::{HookArgs, HookParent};
use crate::path_utils::to_native_separators;
use crate::toolkit::Toolkit;

/// Prefix marking a setting value computed by a core hook
pub const HOOK_VALUE_PREFIX: &str = "hook:";

/// Post-processes the settings of one bundle
pub struct SettingsResolver<'a> {
    /// Display identity used in error messages
    pub bundle: &'a str,
    pub parent: HookParent<'a>,
    pub schema: &'a ConfigurationSchema,
    pub toolkit: &'a Toolkit,
}

impl SettingsResolver<'_> {
    /// Post-process `raw`, the configured value of `setting`
    ///
    /// Settings without a schema entry are returned as they are.
    pub fn resolve_value(&self, setting: &str, raw: &Value) -> Result<Value> {
        match self.schema.get(setting) {
            Some(entry) => self.process(setting, entry, raw),
            None => Ok(raw.clone()),
        }
    }

    fn process(&self, setting: &str, entry: &SchemaEntry, raw: &Value) -> Result<Value> {
        match (&entry.setting_type, raw) {
            (SettingType::List | SettingType::Dict | SettingType::ConfigPath, Value::Null) => {
                Ok(Value::Null)
            }
            (SettingType::List, Value::Array(items)) => self.process_list(setting, entry, items),
            (SettingType::Dict, Value::Object(map)) => {
                let mut processed = map.clone();
                if let Some(items) = &entry.items {
                    for (key, child) in items {
                        // Declared keys missing at runtime are left out
                        if let Some(value) = map.get(key) {
                            processed.insert(key.clone(), self.process(key, child, value)?);
                        }
                    }
                }
                Ok(Value::Object(processed))
            }
            (SettingType::ConfigPath, Value::String(fragment)) => {
                let path = self
                    .toolkit
                    .pipeline_configuration()
                    .config_location()
                    .join(to_native_separators(fragment));
                match path.to_str() {
                    Some(path) => Ok(Value::String(path.to_string())),
                    None => Err(ConfigurationError::NonUnicodePath {
                        bundle: self.bundle.to_string(),
                        setting: setting.to_string(),
                        path: path.display().to_string(),
                    }),
                }
            }
            (_, Value::String(value)) if value.starts_with(HOOK_VALUE_PREFIX) => {
                self.compute(setting, value)
            }
            (SettingType::List, other) => Err(self.mismatch(setting, "list", other)),
            (SettingType::Dict, other) => Err(self.mismatch(setting, "dict", other)),
            (SettingType::ConfigPath, other) => Err(self.mismatch(setting, "config_path", other)),
            (_, other) => Ok(other.clone()),
        }
    }

    fn process_list(&self, setting: &str, entry: &SchemaEntry, items: &[Value]) -> Result<Value> {
        if items.is_empty() {
            return Ok(Value::Array(Vec::new()));
        }
        let child = entry
            .values
            .as_deref()
            .ok_or_else(|| ConfigurationError::IncompleteSchema {
                bundle: self.bundle.to_string(),
                setting: setting.to_string(),
            })?;

        items
            .iter()
            .map(|item| self.process(setting, child, item))
            .collect::<Result<Vec<_>>>()
            .map(Value::Array)
    }

    /// Run the core hook named by a `hook:` value
    fn compute(&self, setting: &str, value: &str) -> Result<Value> {
        let directive = &value[HOOK_VALUE_PREFIX.len()..];
        let mut parts = directive.split(':');
        let name = parts.next().unwrap_or_default();
        if name.is_empty() {
            return Err(ConfigurationError::MalformedReference {
                bundle: self.bundle.to_string(),
                setting: setting.to_string(),
                value: value.to_string(),
                reason: "'hook:' must be followed by a hook name".to_string(),
            });
        }
        let params: Vec<&str> = parts.collect();

        debug!(
            "{} setting {}: computing value with core hook {} {:?}",
            self.bundle, setting, name, params
        );

        let mut args = HookArgs::new();
        args.insert("setting".to_string(), json!(setting));
        args.insert("bundle".to_string(), self.parent.to_json());
        args.insert("extra_params".to_string(), json!(params));
        self.toolkit
            .execute_core_hook(name, self.parent, &args)
            .map_err(|e| match e {
                ConfigurationError::CoreHookNotFound { .. }
                | ConfigurationError::HookExecution { .. } => ConfigurationError::ComputedSetting {
                    bundle: self.bundle.to_string(),
                    setting: setting.to_string(),
                    value: value.to_string(),
                    reason: e.to_string(),
                },
                other => other,
            })
    }

    fn mismatch(&self, setting: &str, expected: &str, found: &Value) -> ConfigurationError {
        ConfigurationError::TypeMismatch {
            bundle: self.bundle.to_string(),
            setting: setting.to_string(),
            expected: expected.to_string(),
            found: json_kind(found).to_string(),
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "dict",
    }
}

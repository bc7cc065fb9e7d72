//! Hook path resolution
//!
//! Turns a single hook reference expression into an absolute file path. See
//! [`super::reference`] for the grammar.

use std::path::{Path, PathBuf};

use tracing::trace;

use super::descriptor::{Environment, VariableSource};
use super::reference::{HookReference, ReferenceParseError, SELF_TOKEN};
use crate::config::{ConfigurationSchema, ENGINE_NAME_TOKEN};
use crate::error::{self, ConfigurationError, Result};
use crate::hook::hook_file_name;
use crate::path_utils::{substitute_folder, to_native_separators};

/// Folder inside a bundle or framework holding its hooks
pub const HOOKS_FOLDER: &str = "hooks";

/// Everything needed to resolve hook references for one bundle
pub struct HookResolver<'a> {
    /// Display identity used in error messages
    pub bundle: &'a str,
    pub disk_location: &'a Path,
    pub schema: &'a ConfigurationSchema,
    pub engine: Option<&'a str>,
    /// The pipeline configuration's hooks folder
    pub config_hooks: PathBuf,
    pub environment: &'a dyn Environment,
    pub variables: &'a dyn VariableSource,
}

impl HookResolver<'_> {
    /// Resolve `expression`, configured for `setting`, into an absolute path
    pub fn resolve(&self, setting: &str, expression: &str) -> Result<PathBuf> {
        let reference = self.parse(setting, expression)?;
        trace!(
            "{} setting {}: '{}' is a {} reference",
            self.bundle,
            setting,
            expression,
            reference.kind()
        );

        match reference {
            HookReference::Default => self.resolve_default(setting, expression),
            HookReference::BundleLocal { rest } => Ok(substitute_folder(&self.bundle_hooks(), rest)),
            HookReference::ConfigLocal { rest } => Ok(substitute_folder(&self.config_hooks, rest)),
            HookReference::EnvVar { name, rest } => {
                let value = self.variables.var(name).ok_or_else(|| {
                    error::missing_env_var(self.bundle, setting, expression, name)
                })?;
                Ok(substitute_folder(Path::new(&value), rest))
            }
            HookReference::Instance { instance, rest } => {
                self.resolve_instance(setting, expression, instance, rest)
            }
            HookReference::Legacy { name } => Ok(self
                .config_hooks
                .join(to_native_separators(&hook_file_name(name)))),
        }
    }

    pub(crate) fn parse<'e>(&self, setting: &str, expression: &'e str) -> Result<HookReference<'e>> {
        HookReference::parse(expression).map_err(|e| match e {
            ReferenceParseError::Empty => error::missing_value(self.bundle, setting),
            other => ConfigurationError::MalformedReference {
                bundle: self.bundle.to_string(),
                setting: setting.to_string(),
                value: expression.to_string(),
                reason: other.reason().to_string(),
            },
        })
    }

    pub(crate) fn bundle_hooks(&self) -> PathBuf {
        self.disk_location.join(HOOKS_FOLDER)
    }

    /// Manifest default for `setting` with `{engine_name}` substituted.
    ///
    /// Returns the raw default, the substituted value and the engine used,
    /// or `None` when the manifest declares no default.
    pub(crate) fn default_for(
        &self,
        setting: &str,
        expression: &str,
    ) -> Result<Option<(String, String, Option<&str>)>> {
        let Some(entry) = self.schema.get(setting) else {
            return Ok(None);
        };
        let Some(default_value) = entry.default_value.as_deref() else {
            return Ok(None);
        };

        if !entry.default_uses_engine() {
            return Ok(Some((default_value.to_string(), default_value.to_string(), None)));
        }

        let engine = self
            .engine
            .ok_or_else(|| error::no_engine(self.bundle, setting, expression))?;
        let resolved = default_value.replace(ENGINE_NAME_TOKEN, engine);
        Ok(Some((default_value.to_string(), resolved, Some(engine))))
    }

    fn resolve_default(&self, setting: &str, expression: &str) -> Result<PathBuf> {
        let (default_value, resolved, engine) = self
            .default_for(setting, expression)?
            .ok_or_else(|| ConfigurationError::NoDefaultHook {
                bundle: self.bundle.to_string(),
                setting: setting.to_string(),
            })?;

        let path = match resolved.strip_prefix(SELF_TOKEN) {
            // new style: '{self}/my_hook.py'
            Some(rest) => substitute_folder(&self.bundle_hooks(), rest),
            // old style: 'my_hook'
            None => self
                .bundle_hooks()
                .join(to_native_separators(&hook_file_name(&resolved))),
        };

        if let Some(engine) = engine {
            if !path.exists() {
                return Err(error::engine_hook_missing(
                    self.bundle,
                    setting,
                    default_value,
                    path.display().to_string(),
                    engine,
                ));
            }
        }

        Ok(path)
    }

    fn resolve_instance(
        &self,
        setting: &str,
        expression: &str,
        instance: &str,
        rest: &str,
    ) -> Result<PathBuf> {
        let loaded = self.environment.frameworks();
        let descriptor = loaded
            .iter()
            .any(|name| name == instance)
            .then(|| self.environment.framework_descriptor(instance))
            .flatten()
            .ok_or_else(|| {
                error::unknown_framework(self.bundle, setting, expression, instance, &loaded)
            })?;

        if !descriptor.exists_local() {
            return Err(error::framework_not_local(
                self.bundle,
                setting,
                expression,
                instance,
            ));
        }

        Ok(substitute_folder(&descriptor.path().join(HOOKS_FOLDER), rest))
    }
}

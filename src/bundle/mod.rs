//! Bundles and their hook and setting resolution
//!
//! A [`Bundle`] is an engine, app or framework configured in an environment.
//! Reading a setting passes the raw value through the schema driven
//! post-processor; executing a hook builds the setting's inheritance chain,
//! resolves every layer to an absolute path and hands the chain to the
//! toolkit's [`HookInvoker`](crate::hook::HookInvoker).

pub mod chain;
pub mod descriptor;
pub mod reference;
pub mod resolver;
pub mod settings;

pub use chain::{BaseLayer, HookChain, OmittedReason};
pub use descriptor::{BundleDescriptor, Environment, FrameworkDescriptor, ProcessEnv, VariableSource};
pub use reference::{HookReference, ReferenceParseError};
pub use resolver::HookResolver;
pub use settings::{HOOK_VALUE_PREFIX, SettingsResolver};

use std::fmt;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use serde_json::{Value, json};
use tracing::debug;

use crate::config::Settings;
use crate::error::{self, ConfigurationError, Result};
use crate::hook::{HookArgs, HookCall, HookParent, hook_file_name};
use crate::path_utils::to_native_separators;
use crate::toolkit::{BUNDLE_INIT_HOOK, ENSURE_FOLDER_EXISTS_HOOK, Toolkit};

/// Builder for [`Bundle`]
pub struct BundleBuilder {
    toolkit: Rc<Toolkit>,
    descriptor: Box<dyn BundleDescriptor>,
    environment: Rc<dyn Environment>,
    settings: Settings,
    context: Value,
    engine: Option<String>,
    variables: Box<dyn VariableSource>,
}

impl BundleBuilder {
    pub fn new(
        toolkit: Rc<Toolkit>,
        descriptor: impl BundleDescriptor + 'static,
        environment: Rc<dyn Environment>,
    ) -> Self {
        Self {
            toolkit,
            descriptor: Box::new(descriptor),
            environment,
            settings: Settings::new(),
            context: Value::Null,
            engine: None,
            variables: Box::new(ProcessEnv),
        }
    }

    pub fn settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    pub fn context(mut self, context: Value) -> Self {
        self.context = context;
        self
    }

    /// Engine hosting the bundle, substituted for `{engine_name}` in defaults
    pub fn engine(mut self, engine: Option<impl Into<String>>) -> Self {
        self.engine = engine.map(Into::into);
        self
    }

    /// Source for `{$VAR}` references, the process environment by default
    pub fn variables(mut self, variables: impl VariableSource + 'static) -> Self {
        self.variables = Box::new(variables);
        self
    }

    /// Create the bundle and fire the `bundle_init` core hook
    pub fn build(self) -> Result<Bundle> {
        let identity = {
            let name = self.descriptor.system_name();
            let display_name = self.descriptor.display_name();
            if name == display_name {
                name.to_string()
            } else {
                format!("{display_name} ({name})")
            }
        };

        let bundle = Bundle {
            toolkit: self.toolkit,
            descriptor: self.descriptor,
            environment: self.environment,
            settings: self.settings,
            context: self.context,
            engine: self.engine,
            variables: self.variables,
            identity,
        };

        let mut args = HookArgs::new();
        args.insert("bundle".to_string(), bundle.hook_parent().to_json());
        bundle
            .toolkit
            .execute_core_hook_if_present(BUNDLE_INIT_HOOK, bundle.hook_parent(), &args)?;

        debug!("Initialized bundle {}", bundle);
        Ok(bundle)
    }
}

/// An engine, app or framework configured in an environment
pub struct Bundle {
    toolkit: Rc<Toolkit>,
    descriptor: Box<dyn BundleDescriptor>,
    environment: Rc<dyn Environment>,
    settings: Settings,
    context: Value,
    engine: Option<String>,
    variables: Box<dyn VariableSource>,
    identity: String,
}

impl fmt::Debug for Bundle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bundle")
            .field("name", &self.name())
            .field("disk_location", &self.disk_location())
            .field("engine", &self.engine)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for Bundle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.identity)
    }
}

impl Bundle {
    pub fn builder(
        toolkit: Rc<Toolkit>,
        descriptor: impl BundleDescriptor + 'static,
        environment: Rc<dyn Environment>,
    ) -> BundleBuilder {
        BundleBuilder::new(toolkit, descriptor, environment)
    }

    // Identity

    pub fn name(&self) -> &str {
        self.descriptor.system_name()
    }

    pub fn display_name(&self) -> &str {
        self.descriptor.display_name()
    }

    pub fn description(&self) -> Option<&str> {
        self.descriptor.description()
    }

    pub fn version(&self) -> Option<&str> {
        self.descriptor.version()
    }

    pub fn disk_location(&self) -> &Path {
        self.descriptor.disk_location()
    }

    pub fn context(&self) -> &Value {
        &self.context
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Short name of the hosting engine, `None` for bundles without one
    pub fn engine_name(&self) -> Option<&str> {
        self.engine.as_deref()
    }

    /// Framework instances available to `{instance}` hook references
    pub fn frameworks(&self) -> Vec<String> {
        self.environment.frameworks()
    }

    pub fn toolkit(&self) -> &Toolkit {
        &self.toolkit
    }

    /// This bundle as seen by the hooks it runs
    pub fn hook_parent(&self) -> HookParent<'_> {
        HookParent {
            name: self.name(),
            display_name: self.display_name(),
            disk_location: Some(self.disk_location()),
        }
    }

    // Settings

    /// Post-processed value of setting `key`, or of `default` when unset
    pub fn get_setting(&self, key: &str, default: Option<Value>) -> Result<Value> {
        self.get_setting_from(&self.settings, key, default)
    }

    /// Post-process `key` from a settings map other than this bundle's own
    ///
    /// The bundle's schema still drives the post-processing.
    pub fn get_setting_from(
        &self,
        settings: &Settings,
        key: &str,
        default: Option<Value>,
    ) -> Result<Value> {
        let raw = match settings.get(key) {
            Some(value) => value.clone(),
            None => default.unwrap_or(Value::Null),
        };
        self.settings_resolver().resolve_value(key, &raw)
    }

    // Hooks

    /// Resolved inheritance chain for hook setting `key`
    pub fn hook_chain(&self, key: &str) -> Result<HookChain> {
        let value = self.get_setting(key, None)?;
        let expression = match &value {
            Value::String(s) => s.as_str(),
            Value::Null => return Err(error::missing_value(&self.identity, key)),
            other => {
                return Err(ConfigurationError::TypeMismatch {
                    bundle: self.identity.clone(),
                    setting: key.to_string(),
                    expected: "hook reference".to_string(),
                    found: other.to_string(),
                });
            }
        };
        self.resolver().build_chain(key, expression)
    }

    /// Resolve a single hook reference expression as if configured for `setting`
    pub fn resolve_hook_path(&self, setting: &str, expression: &str) -> Result<PathBuf> {
        self.resolver().resolve(setting, expression)
    }

    /// Execute the hook configured for setting `key`
    pub fn execute_hook(&self, key: &str, args: &HookArgs) -> Result<Value> {
        self.run_hook(key, None, args)
    }

    /// Execute `method` of the hook configured for setting `key`
    pub fn execute_hook_method(&self, key: &str, method: &str, args: &HookArgs) -> Result<Value> {
        self.run_hook(key, Some(method), args)
    }

    /// Execute `<config>/hooks/<name>.py` directly, bypassing settings
    pub fn execute_hook_by_name(&self, name: &str, args: &HookArgs) -> Result<Value> {
        let path = self
            .toolkit
            .pipeline_configuration()
            .hooks_location()
            .join(to_native_separators(&hook_file_name(name)));
        debug!("{}: executing hook {} by name", self, path.display());
        let chain = [path];
        self.toolkit.invoker().execute(&HookCall {
            chain: &chain,
            method: None,
            parent: self.hook_parent(),
            args,
        })
    }

    fn run_hook(&self, key: &str, method: Option<&str>, args: &HookArgs) -> Result<Value> {
        let chain = self.hook_chain(key)?;
        debug!(
            "{}: executing hook setting {} with {} layer(s)",
            self,
            key,
            chain.paths.len()
        );
        self.toolkit.invoker().execute(&HookCall {
            chain: &chain.paths,
            method,
            parent: self.hook_parent(),
            args,
        })
    }

    // Folders

    /// Create `path` through the `ensure_folder_exists` core hook
    pub fn ensure_folder_exists(&self, path: &Path) -> Result<()> {
        let mut args = HookArgs::new();
        args.insert("path".to_string(), json!(path.display().to_string()));
        args.insert("bundle_obj".to_string(), self.hook_parent().to_json());

        self.toolkit
            .execute_core_hook(ENSURE_FOLDER_EXISTS_HOOK, self.hook_parent(), &args)
            .map(|_| ())
            .map_err(|e| ConfigurationError::FolderCreation {
                path: path.display().to_string(),
                reason: e.to_string(),
            })
    }

    /// Per-bundle cache folder, created when missing
    pub fn cache_location(&self) -> Result<PathBuf> {
        let path = self
            .toolkit
            .pipeline_configuration()
            .cache_location()
            .join(self.name());
        if !path.is_dir() {
            debug!("{}: creating cache folder {}", self, path.display());
            std::fs::create_dir_all(&path)?;
        }
        Ok(path)
    }

    fn resolver(&self) -> HookResolver<'_> {
        HookResolver {
            bundle: &self.identity,
            disk_location: self.disk_location(),
            schema: self.descriptor.configuration_schema(),
            engine: self.engine_name(),
            config_hooks: self.toolkit.pipeline_configuration().hooks_location(),
            environment: self.environment.as_ref(),
            variables: self.variables.as_ref(),
        }
    }

    fn settings_resolver(&self) -> SettingsResolver<'_> {
        SettingsResolver {
            bundle: &self.identity,
            parent: self.hook_parent(),
            schema: self.descriptor.configuration_schema(),
            toolkit: &self.toolkit,
        }
    }
}

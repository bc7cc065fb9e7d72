//! Error types and handling for hookchain
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.
//!
//! Every failure surfaces as a [`ConfigurationError`]. Resolution is pure and
//! deterministic, so an error always points at a configuration defect an
//! operator can fix: each bundle-scoped variant carries the bundle's display
//! identity, the setting name and the offending expression.

pub mod bundle;

pub use bundle::{
    engine_hook_missing, framework_not_local, missing_env_var, missing_value, no_engine,
    unknown_framework,
};

use miette::Diagnostic;
use thiserror::Error;

/// The single error kind raised while resolving bundle settings and hooks
#[derive(Error, Diagnostic, Debug)]
pub enum ConfigurationError {
    // Reference expression errors
    #[error("{bundle} config setting {setting}: Configuration value cannot be empty!")]
    #[diagnostic(
        code(hookchain::reference::missing_value),
        help("Set the hook setting to 'default' or to a hook reference such as '{{config}}/my_hook.py'")
    )]
    MissingValue { bundle: String, setting: String },

    #[error("{bundle} config setting {setting}: Malformed hook reference '{value}': {reason}")]
    #[diagnostic(code(hookchain::reference::malformed))]
    MalformedReference {
        bundle: String,
        setting: String,
        value: String,
        reason: String,
    },

    #[error(
        "{bundle} config setting {setting}: This hook is referring to the configuration value '{value}', \
         but no environment variable named '{variable}' can be found!"
    )]
    #[diagnostic(
        code(hookchain::reference::missing_env_var),
        help("Export {variable} before starting the application")
    )]
    MissingEnvVar {
        bundle: String,
        setting: String,
        value: String,
        variable: String,
    },

    #[error(
        "{bundle} config setting {setting}: This hook is referring to the configuration value '{value}', \
         but no framework with instance name '{instance}' can be found in the currently running \
         environment. The currently loaded frameworks are {available}."
    )]
    #[diagnostic(code(hookchain::reference::unknown_framework))]
    UnknownFramework {
        bundle: String,
        setting: String,
        value: String,
        instance: String,
        available: String,
    },

    #[error(
        "{bundle} config setting {setting}: This hook is referring to the configuration value '{value}', \
         but the framework with instance name '{instance}' does not exist on disk. \
         Please run the cache_apps command."
    )]
    #[diagnostic(
        code(hookchain::reference::framework_not_local),
        help("Run the cache_apps command to download missing frameworks")
    )]
    FrameworkNotLocal {
        bundle: String,
        setting: String,
        value: String,
        instance: String,
    },

    // Default hook errors
    #[error(
        "{bundle} config setting {setting}: Failed to be able to find the associated engine \
         when trying to access hook {value}"
    )]
    #[diagnostic(
        code(hookchain::default::no_engine),
        help("Only bundles running inside an engine can use '{{engine_name}}' in a default hook")
    )]
    NoEngine {
        bundle: String,
        setting: String,
        value: String,
    },

    #[error(
        "{bundle} config setting {setting}: This hook is using an engine specific hook setup \
         (e.g '{default_value}') but no hook '{path}' has been provided with the app. In order for \
         this app to work with engine {engine}, you need to provide a custom hook implementation."
    )]
    #[diagnostic(code(hookchain::default::engine_hook_missing))]
    EngineHookMissing {
        bundle: String,
        setting: String,
        default_value: String,
        path: String,
        engine: String,
    },

    #[error("{bundle} config setting {setting}: No default hook is declared in the bundle manifest")]
    #[diagnostic(
        code(hookchain::default::undeclared),
        help("Add a default_value for {setting} to the bundle's info.yml or configure an explicit hook")
    )]
    NoDefaultHook { bundle: String, setting: String },

    // Settings errors
    #[error("{bundle} config setting {setting}: Expected a {expected} value, found {found}")]
    #[diagnostic(code(hookchain::settings::type_mismatch))]
    TypeMismatch {
        bundle: String,
        setting: String,
        expected: String,
        found: String,
    },

    #[error("{bundle} config setting {setting}: List schema does not declare its values")]
    #[diagnostic(
        code(hookchain::settings::incomplete_schema),
        help("Add a 'values' entry describing the list elements to the bundle manifest")
    )]
    IncompleteSchema { bundle: String, setting: String },

    #[error("{bundle} config setting {setting}: Could not compute the value '{value}': {reason}")]
    #[diagnostic(
        code(hookchain::settings::computed),
        help("Check that the core hook named after 'hook:' exists and runs")
    )]
    ComputedSetting {
        bundle: String,
        setting: String,
        value: String,
        reason: String,
    },

    #[error("{bundle} config setting {setting}: Resolved path {path} is not valid unicode")]
    #[diagnostic(code(hookchain::settings::non_unicode_path))]
    NonUnicodePath {
        bundle: String,
        setting: String,
        path: String,
    },

    // Hook execution errors
    #[error("Core hook '{name}' could not be found in {searched}")]
    #[diagnostic(code(hookchain::hook::core_not_found))]
    CoreHookNotFound { name: String, searched: String },

    #[error("Failed to execute hook {path}: {reason}")]
    #[diagnostic(code(hookchain::hook::execution_failed))]
    HookExecution { path: String, reason: String },

    #[error("Error creating folder {path}: {reason}")]
    #[diagnostic(code(hookchain::hook::folder_creation))]
    FolderCreation { path: String, reason: String },

    // Configuration file errors
    #[error("Configuration file not found: {path}")]
    #[diagnostic(code(hookchain::config::not_found))]
    ConfigNotFound { path: String },

    #[error("Failed to parse configuration file: {path}: {reason}")]
    #[diagnostic(code(hookchain::config::parse_failed))]
    ConfigParseFailed { path: String, reason: String },

    #[error("Invalid configuration: {message}")]
    #[diagnostic(code(hookchain::config::invalid))]
    ConfigInvalid { message: String },

    #[error("IO error: {message}")]
    #[diagnostic(code(hookchain::fs::io_error))]
    IoError { message: String },
}

impl From<std::io::Error> for ConfigurationError {
    fn from(err: std::io::Error) -> Self {
        ConfigurationError::IoError {
            message: err.to_string(),
        }
    }
}

impl From<serde_yaml::Error> for ConfigurationError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigurationError::ConfigParseFailed {
            path: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for ConfigurationError {
    fn from(err: serde_json::Error) -> Self {
        ConfigurationError::ConfigParseFailed {
            path: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

/// Result type alias for hookchain operations
pub type Result<T> = miette::Result<T, ConfigurationError>;

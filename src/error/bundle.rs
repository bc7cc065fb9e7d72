//! Bundle-scoped resolution errors

use super::ConfigurationError;

/// Creates an empty or unset hook value error
pub fn missing_value(bundle: impl Into<String>, setting: impl Into<String>) -> ConfigurationError {
    ConfigurationError::MissingValue {
        bundle: bundle.into(),
        setting: setting.into(),
    }
}

/// Creates a missing environment variable error
pub fn missing_env_var(
    bundle: impl Into<String>,
    setting: impl Into<String>,
    value: impl Into<String>,
    variable: impl Into<String>,
) -> ConfigurationError {
    ConfigurationError::MissingEnvVar {
        bundle: bundle.into(),
        setting: setting.into(),
        value: value.into(),
        variable: variable.into(),
    }
}

/// Creates an unknown framework instance error listing what is loaded
pub fn unknown_framework(
    bundle: impl Into<String>,
    setting: impl Into<String>,
    value: impl Into<String>,
    instance: impl Into<String>,
    available: &[String],
) -> ConfigurationError {
    ConfigurationError::UnknownFramework {
        bundle: bundle.into(),
        setting: setting.into(),
        value: value.into(),
        instance: instance.into(),
        available: available.join(", "),
    }
}

/// Creates a framework-not-on-disk error
pub fn framework_not_local(
    bundle: impl Into<String>,
    setting: impl Into<String>,
    value: impl Into<String>,
    instance: impl Into<String>,
) -> ConfigurationError {
    ConfigurationError::FrameworkNotLocal {
        bundle: bundle.into(),
        setting: setting.into(),
        value: value.into(),
        instance: instance.into(),
    }
}

/// Creates a missing engine association error
pub fn no_engine(
    bundle: impl Into<String>,
    setting: impl Into<String>,
    value: impl Into<String>,
) -> ConfigurationError {
    ConfigurationError::NoEngine {
        bundle: bundle.into(),
        setting: setting.into(),
        value: value.into(),
    }
}

/// Creates an engine-specific default hook missing error
pub fn engine_hook_missing(
    bundle: impl Into<String>,
    setting: impl Into<String>,
    default_value: impl Into<String>,
    path: impl Into<String>,
    engine: impl Into<String>,
) -> ConfigurationError {
    ConfigurationError::EngineHookMissing {
        bundle: bundle.into(),
        setting: setting.into(),
        default_value: default_value.into(),
        path: path.into(),
        engine: engine.into(),
    }
}

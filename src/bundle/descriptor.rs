//! Collaborators a bundle consults while resolving hooks and settings
//!
//! These are the seams between the resolver and whatever loads bundles and
//! environments. The YAML-backed implementations live in [`crate::config`];
//! tests and embedding applications can provide their own.

use std::collections::HashMap;
use std::ffi::OsString;
use std::path::Path;

use crate::config::ConfigurationSchema;

/// Identity and manifest of an installed bundle
pub trait BundleDescriptor {
    /// Short system name, e.g. `tk-multi-publish`
    fn system_name(&self) -> &str;

    fn display_name(&self) -> &str {
        self.system_name()
    }

    fn description(&self) -> Option<&str> {
        None
    }

    fn version(&self) -> Option<&str> {
        None
    }

    /// Absolute folder the bundle is installed in
    fn disk_location(&self) -> &Path;

    fn configuration_schema(&self) -> &ConfigurationSchema;
}

/// A framework instance registered in an environment
pub trait FrameworkDescriptor {
    /// Whether the framework has been materialized on local disk
    fn exists_local(&self) -> bool;

    fn path(&self) -> &Path;
}

/// The environment a bundle runs in
pub trait Environment {
    /// Instance names of the frameworks loaded in this environment
    fn frameworks(&self) -> Vec<String>;

    fn framework_descriptor(&self, instance: &str) -> Option<&dyn FrameworkDescriptor>;
}

/// Source of `{$NAME}` substitutions
///
/// Values are kept as OS strings so that folders which are not valid unicode
/// resolve exactly as configured.
pub trait VariableSource {
    fn var(&self, name: &str) -> Option<OsString>;
}

/// Reads variables from the process environment
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl VariableSource for ProcessEnv {
    fn var(&self, name: &str) -> Option<OsString> {
        std::env::var_os(name)
    }
}

impl VariableSource for HashMap<String, String> {
    fn var(&self, name: &str) -> Option<OsString> {
        self.get(name).map(OsString::from)
    }
}

impl VariableSource for HashMap<String, OsString> {
    fn var(&self, name: &str) -> Option<OsString> {
        self.get(name).cloned()
    }
}

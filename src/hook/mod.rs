//! Hook invocation
//!
//! Resolution ends with an ordered list of absolute hook paths, base layer
//! first. Running them is delegated to a [`HookInvoker`], which receives the
//! whole chain so later layers can extend what earlier layers define.

pub mod script;

pub use script::ScriptHookInvoker;

use std::path::{Path, PathBuf};

use serde_json::{Map, Value, json};

use crate::error::Result;

/// Keyword arguments passed to a hook
pub type HookArgs = Map<String, Value>;

/// Method run when the caller does not name one
pub const DEFAULT_HOOK_METHOD: &str = "execute";

/// Script extension appended to bare hook names
pub const HOOK_EXTENSION: &str = "py";

/// The object a hook runs on behalf of
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HookParent<'a> {
    pub name: &'a str,
    pub display_name: &'a str,
    pub disk_location: Option<&'a Path>,
}

impl<'a> HookParent<'a> {
    pub fn new(name: &'a str) -> Self {
        Self {
            name,
            display_name: name,
            disk_location: None,
        }
    }

    pub fn to_json(&self) -> Value {
        json!({
            "name": self.name,
            "display_name": self.display_name,
            "disk_location": self.disk_location.map(|p| p.display().to_string()),
        })
    }
}

/// A fully resolved hook invocation
#[derive(Debug, Clone)]
pub struct HookCall<'a> {
    /// Hook files, base layer first and most specific override last
    pub chain: &'a [PathBuf],
    pub method: Option<&'a str>,
    pub parent: HookParent<'a>,
    pub args: &'a HookArgs,
}

impl HookCall<'_> {
    pub fn method_name(&self) -> &str {
        self.method.unwrap_or(DEFAULT_HOOK_METHOD)
    }

    /// The layer whose method is invoked
    pub fn most_specific(&self) -> Option<&Path> {
        self.chain.last().map(PathBuf::as_path)
    }
}

/// Executes a resolved hook chain
pub trait HookInvoker {
    fn execute(&self, call: &HookCall<'_>) -> Result<Value>;
}

/// File name for a hook called `name`
pub fn hook_file_name(name: &str) -> String {
    format!("{name}.{HOOK_EXTENSION}")
}

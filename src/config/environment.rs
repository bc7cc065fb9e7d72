//! Environment file data structures
//!
//! An environment lists the framework instances available to hooks and the
//! bundles configured in it:
//!
//! ```yaml
//! engine: tk-maya
//! frameworks:
//!   tk-framework-widget_v1.x.x:
//!     location: ../frameworks/widget
//! bundles:
//!   tk-multi-publish:
//!     location: ../apps/publish
//!     settings:
//!       hook_publish: "{config}/publish.py"
//! ```
//!
//! Relative locations are resolved against the folder holding the file.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::bundle::{Environment, FrameworkDescriptor};
use crate::error::{ConfigurationError, Result};
use crate::path_utils::absolutize;

/// Raw settings of a bundle, keyed by setting name
pub type Settings = Map<String, Value>;

#[derive(Debug, Clone, Deserialize)]
struct RawEnvironment {
    #[serde(default)]
    engine: Option<String>,

    #[serde(default)]
    frameworks: BTreeMap<String, RawLocation>,

    #[serde(default)]
    bundles: BTreeMap<String, RawBundle>,
}

#[derive(Debug, Clone, Deserialize)]
struct RawLocation {
    location: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
struct RawBundle {
    location: PathBuf,

    #[serde(default)]
    engine: Option<String>,

    #[serde(default)]
    settings: Settings,
}

/// A framework instance installed in a local folder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalFramework {
    path: PathBuf,
}

impl LocalFramework {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl FrameworkDescriptor for LocalFramework {
    fn exists_local(&self) -> bool {
        self.path.is_dir()
    }

    fn path(&self) -> &Path {
        &self.path
    }
}

/// A bundle entry in an environment
#[derive(Debug, Clone)]
pub struct BundleEntry {
    pub location: PathBuf,

    /// Engine hosting this bundle, falls back to the environment's engine
    pub engine: Option<String>,

    pub settings: Settings,
}

/// Environment loaded from YAML
#[derive(Debug, Clone, Default)]
pub struct EnvironmentConfig {
    engine: Option<String>,
    frameworks: BTreeMap<String, LocalFramework>,
    bundles: BTreeMap<String, BundleEntry>,
}

impl EnvironmentConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_engine(mut self, engine: impl Into<String>) -> Self {
        self.engine = Some(engine.into());
        self
    }

    pub fn with_framework(mut self, instance: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        self.frameworks
            .insert(instance.into(), LocalFramework::new(path));
        self
    }

    /// Parse an environment from YAML, resolving locations against `base_dir`
    pub fn from_yaml(yaml: &str, base_dir: &Path) -> Result<Self> {
        let raw: RawEnvironment = serde_yaml::from_str(yaml)?;

        let frameworks = raw
            .frameworks
            .into_iter()
            .map(|(name, entry)| Ok((name, LocalFramework::new(resolve(base_dir, &entry.location)?))))
            .collect::<Result<BTreeMap<_, _>>>()?;

        let bundles = raw
            .bundles
            .into_iter()
            .map(|(name, entry)| {
                let location = resolve(base_dir, &entry.location)?;
                Ok((
                    name,
                    BundleEntry {
                        location,
                        engine: entry.engine,
                        settings: entry.settings,
                    },
                ))
            })
            .collect::<Result<BTreeMap<_, _>>>()?;

        Ok(Self {
            engine: raw.engine,
            frameworks,
            bundles,
        })
    }

    /// Load an environment file from disk
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(ConfigurationError::ConfigNotFound {
                path: path.display().to_string(),
            });
        }

        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigurationError::ConfigParseFailed {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;

        let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
        Self::from_yaml(&content, base_dir).map_err(|e| ConfigurationError::ConfigParseFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
    }

    pub fn engine(&self) -> Option<&str> {
        self.engine.as_deref()
    }

    pub fn bundle(&self, name: &str) -> Option<&BundleEntry> {
        self.bundles.get(name)
    }

    pub fn bundle_names(&self) -> impl Iterator<Item = &str> {
        self.bundles.keys().map(String::as_str)
    }

    /// Engine hosting `bundle`: its own entry first, then the environment's
    pub fn engine_for(&self, bundle: &str) -> Option<&str> {
        self.bundles
            .get(bundle)
            .and_then(|b| b.engine.as_deref())
            .or(self.engine.as_deref())
    }
}

impl Environment for EnvironmentConfig {
    fn frameworks(&self) -> Vec<String> {
        self.frameworks.keys().cloned().collect()
    }

    fn framework_descriptor(&self, instance: &str) -> Option<&dyn FrameworkDescriptor> {
        self.frameworks
            .get(instance)
            .map(|f| f as &dyn FrameworkDescriptor)
    }
}

fn resolve(base_dir: &Path, location: &Path) -> Result<PathBuf> {
    Ok(absolutize(&base_dir.join(location))?)
}

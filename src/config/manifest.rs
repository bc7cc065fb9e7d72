//! Bundle manifest (info.yml) data structures

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::bundle::BundleDescriptor;
use crate::config::ConfigurationSchema;
use crate::error::{ConfigurationError, Result};
use crate::path_utils::absolutize;

/// File name of the manifest inside a bundle folder
pub const MANIFEST_FILE: &str = "info.yml";

/// Bundle manifest from info.yml
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BundleManifest {
    #[serde(default)]
    pub display_name: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub version: Option<String>,

    /// Setting schemas keyed by setting name
    #[serde(default)]
    pub configuration: ConfigurationSchema,
}

impl BundleManifest {
    /// Parse a manifest from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        // An empty info.yml is a valid manifest without settings
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(yaml)?)
    }
}

/// A bundle installed in a local folder, described by its info.yml
#[derive(Debug, Clone)]
pub struct LocalBundleDescriptor {
    name: String,
    location: PathBuf,
    manifest: BundleManifest,
}

impl LocalBundleDescriptor {
    pub fn new(name: impl Into<String>, location: impl Into<PathBuf>, manifest: BundleManifest) -> Self {
        Self {
            name: name.into(),
            location: location.into(),
            manifest,
        }
    }

    /// Load `<location>/info.yml` for the bundle called `name`
    pub fn load(name: impl Into<String>, location: &Path) -> Result<Self> {
        let location = absolutize(location)?;
        let manifest_path = location.join(MANIFEST_FILE);
        if !manifest_path.is_file() {
            return Err(ConfigurationError::ConfigNotFound {
                path: manifest_path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(&manifest_path).map_err(|e| {
            ConfigurationError::ConfigParseFailed {
                path: manifest_path.display().to_string(),
                reason: e.to_string(),
            }
        })?;
        let manifest =
            BundleManifest::from_yaml(&content).map_err(|e| ConfigurationError::ConfigParseFailed {
                path: manifest_path.display().to_string(),
                reason: e.to_string(),
            })?;

        Ok(Self::new(name, location, manifest))
    }

    pub fn manifest(&self) -> &BundleManifest {
        &self.manifest
    }
}

impl BundleDescriptor for LocalBundleDescriptor {
    fn system_name(&self) -> &str {
        &self.name
    }

    fn display_name(&self) -> &str {
        self.manifest.display_name.as_deref().unwrap_or(&self.name)
    }

    fn description(&self) -> Option<&str> {
        self.manifest.description.as_deref()
    }

    fn version(&self) -> Option<&str> {
        self.manifest.version.as_deref()
    }

    fn disk_location(&self) -> &Path {
        &self.location
    }

    fn configuration_schema(&self) -> &ConfigurationSchema {
        &self.manifest.configuration
    }
}

//! Pipeline configuration layout
//!
//! A pipeline configuration is a directory on disk with a fixed layout:
//!
//! ```text
//! <root>/
//!   cache/                 per-bundle cache folders
//!   config/                config_path settings resolve here
//!     hooks/               {config} and legacy hook references
//!     core/hooks/          core hook overrides
//! ```

use std::path::{Path, PathBuf};

use crate::error::{ConfigurationError, Result};
use crate::path_utils::absolutize;

/// Pipeline configuration rooted at an absolute directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfiguration {
    root: PathBuf,
}

impl PipelineConfiguration {
    /// Create a pipeline configuration, making `root` absolute.
    pub fn new(root: impl AsRef<Path>) -> Result<Self> {
        let root = absolutize(root.as_ref()).map_err(|e| ConfigurationError::ConfigInvalid {
            message: format!(
                "Cannot use '{}' as pipeline configuration root: {}",
                root.as_ref().display(),
                e
            ),
        })?;
        Ok(Self { root })
    }

    /// Open an existing pipeline configuration, requiring its `config` folder.
    pub fn open(root: impl AsRef<Path>) -> Result<Self> {
        let pipeline = Self::new(root)?;
        let config = pipeline.config_location();
        if !config.is_dir() {
            return Err(ConfigurationError::ConfigNotFound {
                path: config.display().to_string(),
            });
        }
        Ok(pipeline)
    }

    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Root for `config_path` settings
    pub fn config_location(&self) -> PathBuf {
        self.root.join("config")
    }

    /// Folder for `{config}` and legacy hook references
    pub fn hooks_location(&self) -> PathBuf {
        self.config_location().join("hooks")
    }

    /// Folder for project level core hook overrides
    pub fn core_hooks_location(&self) -> PathBuf {
        self.config_location().join("core").join("hooks")
    }

    pub fn cache_location(&self) -> PathBuf {
        self.root.join("cache")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_layout() {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let pipeline = PipelineConfiguration::new(temp.path()).expect("pipeline");

        assert_eq!(pipeline.config_location(), temp.path().join("config"));
        assert_eq!(
            pipeline.hooks_location(),
            temp.path().join("config").join("hooks")
        );
        assert_eq!(
            pipeline.core_hooks_location(),
            temp.path().join("config").join("core").join("hooks")
        );
        assert_eq!(pipeline.cache_location(), temp.path().join("cache"));
    }

    #[test]
    fn test_relative_root_becomes_absolute() {
        let pipeline = PipelineConfiguration::new("some/project").expect("pipeline");
        assert!(pipeline.path().is_absolute());
        assert!(pipeline.config_location().is_absolute());
    }

    #[test]
    fn test_open_requires_config_folder() {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let result = PipelineConfiguration::open(temp.path());
        assert!(matches!(
            result,
            Err(ConfigurationError::ConfigNotFound { .. })
        ));

        std::fs::create_dir_all(temp.path().join("config")).expect("create config");
        assert!(PipelineConfiguration::open(temp.path()).is_ok());
    }
}

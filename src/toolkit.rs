//! Core services shared by every bundle in a pipeline configuration
//!
//! Core hooks are looked up in the pipeline configuration first
//! (`config/core/hooks/<name>.py`) and then in the install-level hooks folder,
//! which ships the default implementations.

use std::fmt;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::debug;

use crate::config::PipelineConfiguration;
use crate::error::{ConfigurationError, Result};
use crate::hook::{HookArgs, HookCall, HookInvoker, HookParent, hook_file_name};

/// Core hook fired whenever a bundle is constructed
pub const BUNDLE_INIT_HOOK: &str = "bundle_init";

/// Core hook creating folders on behalf of bundles
pub const ENSURE_FOLDER_EXISTS_HOOK: &str = "ensure_folder_exists";

/// Core services handle: pipeline configuration plus hook execution
pub struct Toolkit {
    pipeline: PipelineConfiguration,
    invoker: Box<dyn HookInvoker>,
    install_hooks: Option<PathBuf>,
}

impl fmt::Debug for Toolkit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Toolkit")
            .field("pipeline", &self.pipeline)
            .field("install_hooks", &self.install_hooks)
            .finish_non_exhaustive()
    }
}

impl Toolkit {
    pub fn new(pipeline: PipelineConfiguration, invoker: impl HookInvoker + 'static) -> Self {
        Self {
            pipeline,
            invoker: Box::new(invoker),
            install_hooks: None,
        }
    }

    /// Folder with the default core hook implementations
    pub fn with_install_hooks(mut self, folder: impl Into<PathBuf>) -> Self {
        self.install_hooks = Some(folder.into());
        self
    }

    pub fn pipeline_configuration(&self) -> &PipelineConfiguration {
        &self.pipeline
    }

    pub fn invoker(&self) -> &dyn HookInvoker {
        self.invoker.as_ref()
    }

    /// Locate core hook `name`, project override first
    pub fn core_hook_path(&self, name: &str) -> Option<PathBuf> {
        let file_name = hook_file_name(name);
        let project = self.pipeline.core_hooks_location().join(&file_name);
        if project.is_file() {
            return Some(project);
        }

        self.install_hooks
            .as_deref()
            .map(|folder| folder.join(&file_name))
            .filter(|path| path.is_file())
    }

    /// Execute core hook `name`, failing when no implementation exists
    pub fn execute_core_hook(
        &self,
        name: &str,
        parent: HookParent<'_>,
        args: &HookArgs,
    ) -> Result<Value> {
        let path = self
            .core_hook_path(name)
            .ok_or_else(|| ConfigurationError::CoreHookNotFound {
                name: name.to_string(),
                searched: self.searched_locations(),
            })?;
        self.run_single(&path, parent, args)
    }

    /// Execute core hook `name` when an implementation exists
    pub fn execute_core_hook_if_present(
        &self,
        name: &str,
        parent: HookParent<'_>,
        args: &HookArgs,
    ) -> Result<Option<Value>> {
        match self.core_hook_path(name) {
            Some(path) => self.run_single(&path, parent, args).map(Some),
            None => {
                debug!("No core hook '{}' found, skipping", name);
                Ok(None)
            }
        }
    }

    fn run_single(&self, path: &Path, parent: HookParent<'_>, args: &HookArgs) -> Result<Value> {
        debug!("Executing core hook {} for {}", path.display(), parent.name);
        let chain = [path.to_path_buf()];
        self.invoker.execute(&HookCall {
            chain: &chain,
            method: None,
            parent,
            args,
        })
    }

    fn searched_locations(&self) -> String {
        let mut searched = vec![self.pipeline.core_hooks_location().display().to_string()];
        if let Some(folder) = &self.install_hooks {
            searched.push(folder.display().to_string());
        }
        searched.join(", ")
    }
}

//! Test fixtures shared by the unit tests.
//!
//! `RecordingInvoker` stands in for a real interpreter: it records every hook
//! call and answers with a canned value. `BundleTree` lays out a pipeline
//! configuration and a bundle on disk.
//!
//! ```ignore
//! let tree = BundleTree::new();
//! tree.write_manifest(MANIFEST);
//! let invoker = RecordingInvoker::returning(json!("done"));
//! let bundle = tree.builder(invoker.clone()).build()?;
//! ```

use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use serde_json::Value;
use tempfile::TempDir;

use crate::config::{EnvironmentConfig, LocalBundleDescriptor, PipelineConfiguration};
use crate::error::{ConfigurationError, Result};
use crate::hook::{HookArgs, HookCall, HookInvoker};
use crate::toolkit::Toolkit;

/// An owned copy of a [`HookCall`]
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub chain: Vec<PathBuf>,
    pub method: String,
    pub parent: String,
    pub args: HookArgs,
}

enum Response {
    Value(Value),
    Fail(String),
}

/// Hook invoker recording its calls instead of running anything
#[derive(Clone)]
pub struct RecordingInvoker {
    calls: Rc<RefCell<Vec<RecordedCall>>>,
    response: Rc<Response>,
}

impl RecordingInvoker {
    pub fn returning(value: Value) -> Self {
        Self {
            calls: Rc::default(),
            response: Rc::new(Response::Value(value)),
        }
    }

    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            calls: Rc::default(),
            response: Rc::new(Response::Fail(reason.into())),
        }
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.borrow().clone()
    }
}

impl HookInvoker for RecordingInvoker {
    fn execute(&self, call: &HookCall<'_>) -> Result<Value> {
        self.calls.borrow_mut().push(RecordedCall {
            chain: call.chain.to_vec(),
            method: call.method_name().to_string(),
            parent: call.parent.name.to_string(),
            args: call.args.clone(),
        });

        match self.response.as_ref() {
            Response::Value(value) => Ok(value.clone()),
            Response::Fail(reason) => Err(ConfigurationError::HookExecution {
                path: call
                    .most_specific()
                    .map(|p| p.display().to_string())
                    .unwrap_or_default(),
                reason: reason.clone(),
            }),
        }
    }
}

/// Write `content` to `path`, creating parent folders
pub fn write_file(path: &Path, content: &str) {
    std::fs::create_dir_all(path.parent().expect("path has a parent"))
        .expect("Failed to create parent directory");
    std::fs::write(path, content).expect("Failed to write file");
}

/// A pipeline configuration root with one bundle called `tk-multi-demo`
pub struct BundleTree {
    pub temp: TempDir,
}

impl BundleTree {
    pub const BUNDLE_NAME: &'static str = "tk-multi-demo";

    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        std::fs::create_dir_all(temp.path().join("config/hooks"))
            .expect("Failed to create config hooks");
        std::fs::create_dir_all(temp.path().join("bundles/demo/hooks"))
            .expect("Failed to create bundle hooks");
        Self { temp }
    }

    pub fn root(&self) -> &Path {
        self.temp.path()
    }

    pub fn bundle_dir(&self) -> PathBuf {
        self.root().join("bundles/demo")
    }

    pub fn bundle_hook(&self, rel: &str) -> PathBuf {
        self.bundle_dir().join("hooks").join(rel)
    }

    pub fn config_hook(&self, rel: &str) -> PathBuf {
        self.root().join("config/hooks").join(rel)
    }

    pub fn core_hook(&self, name: &str) -> PathBuf {
        self.root().join("config/core/hooks").join(format!("{name}.py"))
    }

    pub fn write_manifest(&self, yaml: &str) {
        write_file(&self.bundle_dir().join("info.yml"), yaml);
    }

    pub fn toolkit(&self, invoker: RecordingInvoker) -> Toolkit {
        let pipeline = PipelineConfiguration::open(self.root()).expect("pipeline configuration");
        Toolkit::new(pipeline, invoker)
    }

    pub fn descriptor(&self) -> LocalBundleDescriptor {
        LocalBundleDescriptor::load(Self::BUNDLE_NAME, &self.bundle_dir()).expect("bundle manifest")
    }

    pub fn environment(&self) -> EnvironmentConfig {
        EnvironmentConfig::new()
    }
}

//! Common test utilities for hookchain integration tests

use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use assert_cmd::Command;
use hookchain::config::{EnvironmentConfig, LocalBundleDescriptor, PipelineConfiguration};
use hookchain::hook::{HookArgs, HookCall, HookInvoker};
use hookchain::{Bundle, Result, Toolkit};
use serde_json::Value;
use tempfile::TempDir;

/// Manifest of the `tk-multi-demo` bundle used throughout the tests
pub const DEMO_MANIFEST: &str = r#"
display_name: Demo App
description: Exercises hook and setting resolution
version: v0.3.1
configuration:
  hook_scan:
    type: hook
    description: Scans the scene for publishable items.
    default_value: scan
  hook_open:
    type: hook
    default_value: "{self}/open_{engine_name}.py"
  hook_thumbnail:
    type: hook
  icon:
    type: config_path
  frame_range:
    type: str
  thumbnails:
    type: list
    values:
      type: config_path
  publish:
    type: dict
    items:
      template:
        type: config_path
"#;

/// Environment with the demo bundle hosted by `tk-maya`
pub const SHOT_ENVIRONMENT: &str = r#"
engine: tk-maya
frameworks:
  tk-framework-widget_v1.x.x:
    location: ../frameworks/widget
  tk-framework-remote_v2.x.x:
    location: ../frameworks/not_downloaded
bundles:
  tk-multi-demo:
    location: ../bundles/demo
    settings:
      hook_scan: "{config}/studio_scan.py"
      hook_open: "{config}/open.py"
      hook_thumbnail: "{tk-framework-widget_v1.x.x}/thumb.py"
      icon: icons/demo.png
      thumbnails:
        - thumbs/a.png
        - thumbs/b.png
      publish:
        template: templates/publish.yml
        label: Publish
"#;

/// A pipeline configuration on disk for integration tests
#[allow(dead_code)]
pub struct TestPipeline {
    /// Temporary directory
    #[allow(dead_code)]
    pub temp: TempDir,
    /// Pipeline configuration root
    pub path: PathBuf,
}

#[allow(dead_code)]
impl TestPipeline {
    /// Create an empty pipeline configuration
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let path = temp.path().to_path_buf();
        std::fs::create_dir_all(path.join("config/hooks")).expect("Failed to create hooks folder");
        Self { temp, path }
    }

    /// Pipeline with the demo bundle, a local framework and the shot environment
    pub fn with_demo_bundle() -> Self {
        let pipeline = Self::new();
        pipeline.write_file("bundles/demo/info.yml", DEMO_MANIFEST);
        pipeline.write_file("frameworks/widget/hooks/thumb.py", "");
        pipeline.write_file("env/shot.yml", SHOT_ENVIRONMENT);
        pipeline
    }

    /// Write a file in the pipeline
    pub fn write_file(&self, path: &str, content: &str) {
        let file_path = self.path.join(path);
        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&file_path, content).expect("Failed to write file");
    }

    pub fn file(&self, path: &str) -> PathBuf {
        self.path.join(path)
    }

    pub fn environment_file(&self) -> PathBuf {
        self.file("env/shot.yml")
    }

    /// Load the demo bundle through the library with `invoker`
    pub fn load_bundle(&self, invoker: RecordingInvoker) -> Result<Bundle> {
        let environment = EnvironmentConfig::load(&self.environment_file())?;
        let entry = environment
            .bundle("tk-multi-demo")
            .expect("demo bundle is configured");
        let descriptor = LocalBundleDescriptor::load("tk-multi-demo", &entry.location)?;
        let settings = entry.settings.clone();
        let engine = environment.engine_for("tk-multi-demo").map(String::from);

        let toolkit = Toolkit::new(PipelineConfiguration::open(&self.path)?, invoker);
        Bundle::builder(Rc::new(toolkit), descriptor, Rc::new(environment))
            .settings(settings)
            .engine(engine)
            .build()
    }

    /// hookchain command targeting the demo bundle
    pub fn cmd(&self) -> Command {
        let mut cmd = hookchain_cmd();
        cmd.arg("--config")
            .arg(&self.path)
            .arg("--environment")
            .arg(self.environment_file())
            .arg("--bundle")
            .arg("tk-multi-demo")
            .env_remove("RUST_LOG");
        cmd
    }
}

// Temporary fix for deprecated cargo_bin - will be updated when build-dir issues are resolved
#[allow(deprecated)]
pub fn hookchain_cmd() -> Command {
    Command::cargo_bin("hookchain").expect("hookchain binary is built")
}

/// A hook call as seen by [`RecordingInvoker`]
#[allow(dead_code)]
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub chain: Vec<PathBuf>,
    pub method: String,
    pub args: HookArgs,
}

/// Hook invoker recording calls and answering with a fixed value
#[derive(Clone)]
pub struct RecordingInvoker {
    calls: Rc<RefCell<Vec<RecordedCall>>>,
    response: Value,
}

#[allow(dead_code)]
impl RecordingInvoker {
    pub fn returning(response: Value) -> Self {
        Self {
            calls: Rc::default(),
            response,
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
            args: call.args.clone(),
        });
        Ok(self.response.clone())
    }
}

/// Path string the way the binary prints it
#[allow(dead_code)]
pub fn display(path: &Path) -> String {
    path.display().to_string()
}

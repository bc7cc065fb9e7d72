//! Configuration file handling for hookchain
//!
//! This module handles:
//! - info.yml: bundle manifest and its settings schema
//! - environment YAML: framework instances and configured bundles
//! - the pipeline configuration folder layout

pub mod environment;
pub mod manifest;
pub mod pipeline;
pub mod schema;

pub use environment::{BundleEntry, EnvironmentConfig, LocalFramework, Settings};
pub use manifest::{BundleManifest, LocalBundleDescriptor, MANIFEST_FILE};
pub use pipeline::PipelineConfiguration;
pub use schema::{ConfigurationSchema, ENGINE_NAME_TOKEN, SchemaEntry, SettingType};

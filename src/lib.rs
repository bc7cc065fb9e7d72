//! Hookchain - bundle hook and setting resolution
//!
//! Bundles configured in a pipeline environment declare their settings in an
//! `info.yml` manifest. This crate turns configured setting values into what
//! the bundle actually uses:
//!
//! - hook settings become ordered chains of absolute hook file paths, with the
//!   bundle's own default implicitly inherited by studio overrides
//! - `list`, `dict` and `config_path` settings are post-processed according to
//!   the manifest schema, and `hook:` values are computed by core hooks
//!
//! Hooks themselves run through a [`hook::HookInvoker`].

pub mod bundle;
pub mod config;
pub mod error;
pub mod hook;
pub mod path_utils;
pub mod toolkit;

#[cfg(test)]
mod test_fixtures;

pub use bundle::{BaseLayer, Bundle, BundleBuilder, HookChain, OmittedReason};
pub use error::{ConfigurationError, Result};
pub use toolkit::Toolkit;

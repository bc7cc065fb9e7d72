//! Hook inheritance chains
//!
//! A hook setting that overrides the manifest default implicitly derives from
//! it. With a manifest default of `{self}/foo_{engine_name}.py` and a
//! configured value of `{config}/my_custom_hook.py`, the chain becomes:
//!
//! ```text
//! ["{self}/foo_tk-maya.py", "{config}/my_custom_hook.py"]
//! ```
//!
//! Only brace-delimited overrides other than `{self}` get the default
//! prepended; `default`, `{self}/...` and legacy names stand alone.

use std::path::PathBuf;

use tracing::debug;

use super::reference::{SELF_TOKEN, split_chain};
use super::resolver::HookResolver;
use crate::error::{self, Result};

/// What happened to the manifest default when building a chain
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BaseLayer {
    /// The first expression does not override the default
    NotApplicable,
    /// The default was prepended as this expression
    Injected { expression: String },
    /// The default could not be prepended
    Omitted(OmittedReason),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OmittedReason {
    /// The manifest declares no default for the setting
    NoDefault,
    /// The default is engine specific and the running engine has no hook
    EngineHookMissing { engine: String, path: PathBuf },
}

/// An ordered hook chain, base layer first
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HookChain {
    pub expressions: Vec<String>,
    pub paths: Vec<PathBuf>,
    pub base: BaseLayer,
}

impl HookResolver<'_> {
    /// Build the resolved chain for a hook setting value
    pub fn build_chain(&self, setting: &str, value: &str) -> Result<HookChain> {
        if value.is_empty() {
            return Err(error::missing_value(self.bundle, setting));
        }

        let mut expressions: Vec<String> =
            split_chain(value).into_iter().map(String::from).collect();

        let first = self.parse(setting, &expressions[0])?;
        let base = if first.is_override() {
            self.base_layer(setting, value)?
        } else {
            BaseLayer::NotApplicable
        };

        if let BaseLayer::Injected { expression } = &base {
            expressions.insert(0, expression.clone());
        }

        let paths = expressions
            .iter()
            .map(|expression| self.resolve(setting, expression))
            .collect::<Result<Vec<_>>>()?;

        debug!(
            "{} setting {}: hook chain {:?} (base layer {:?})",
            self.bundle, setting, expressions, base
        );

        Ok(HookChain {
            expressions,
            paths,
            base,
        })
    }

    fn base_layer(&self, setting: &str, value: &str) -> Result<BaseLayer> {
        let Some((_, resolved, engine)) = self.default_for(setting, value)? else {
            debug!(
                "{} setting {}: no manifest default to derive '{}' from",
                self.bundle, setting, value
            );
            return Ok(BaseLayer::Omitted(OmittedReason::NoDefault));
        };

        // Old style defaults are bare names with an implicit {self} and no suffix
        let expression = if resolved.starts_with(SELF_TOKEN) {
            resolved
        } else {
            format!("{SELF_TOKEN}/{resolved}.py")
        };

        if let Some(engine) = engine {
            let path = self.resolve(setting, &expression)?;
            if !path.exists() {
                debug!(
                    "{} setting {}: engine {} has no default hook at {}, not inheriting from it",
                    self.bundle,
                    setting,
                    engine,
                    path.display()
                );
                return Ok(BaseLayer::Omitted(OmittedReason::EngineHookMissing {
                    engine: engine.to_string(),
                    path,
                }));
            }
        }

        Ok(BaseLayer::Injected { expression })
    }
}

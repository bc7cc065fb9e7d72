//! Configuration schema declared in a bundle manifest
//!
//! Entries are on the following form:
//!
//! ```yaml
//! hook_publish_file:
//!   type: hook
//!   description: Called when a file is published.
//!   default_value: "{self}/publish_file.py"
//! thumbnails:
//!   type: list
//!   values:
//!     type: config_path
//! ```

use std::collections::BTreeMap;

use serde::Deserialize;

/// Token inside a default hook value replaced by the hosting engine's name
pub const ENGINE_NAME_TOKEN: &str = "{engine_name}";

/// Declared type of a setting
///
/// Only `list`, `dict` and `config_path` change how a value is post-processed;
/// every other declared type (`hook`, `str`, `template`, ...) is kept by name
/// and treated as a scalar.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(from = "String")]
pub enum SettingType {
    List,
    Dict,
    ConfigPath,
    Scalar(Option<String>),
    #[default]
    Untyped,
}

impl From<String> for SettingType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "list" => SettingType::List,
            "dict" => SettingType::Dict,
            "config_path" => SettingType::ConfigPath,
            "" => SettingType::Untyped,
            _ => SettingType::Scalar(Some(value)),
        }
    }
}

/// Schema entry for a single setting
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SchemaEntry {
    #[serde(rename = "type", default)]
    pub setting_type: SettingType,

    #[serde(default)]
    pub description: Option<String>,

    /// Default value expression. Only strings are meaningful for hook
    /// resolution; other YAML scalars are kept as their string form.
    #[serde(default, deserialize_with = "deserialize_default_value")]
    pub default_value: Option<String>,

    /// Element schema for `list` settings
    #[serde(default)]
    pub values: Option<Box<SchemaEntry>>,

    /// Per-key schemas for `dict` settings
    #[serde(default)]
    pub items: Option<BTreeMap<String, SchemaEntry>>,
}

impl SchemaEntry {
    pub fn new(setting_type: SettingType) -> Self {
        Self {
            setting_type,
            ..Self::default()
        }
    }

    pub fn with_default(mut self, default_value: impl Into<String>) -> Self {
        self.default_value = Some(default_value.into());
        self
    }

    pub fn with_values(mut self, values: SchemaEntry) -> Self {
        self.values = Some(Box::new(values));
        self
    }

    pub fn with_item(mut self, key: impl Into<String>, entry: SchemaEntry) -> Self {
        self.items
            .get_or_insert_with(BTreeMap::new)
            .insert(key.into(), entry);
        self
    }

    /// Whether the default value needs the engine name substituted
    pub fn default_uses_engine(&self) -> bool {
        self.default_value
            .as_deref()
            .is_some_and(|v| v.contains(ENGINE_NAME_TOKEN))
    }
}

fn deserialize_default_value<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<serde_yaml::Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(serde_yaml::Value::Null) => None,
        Some(serde_yaml::Value::String(s)) => Some(s),
        Some(serde_yaml::Value::Bool(b)) => Some(b.to_string()),
        Some(serde_yaml::Value::Number(n)) => Some(n.to_string()),
        // Structured defaults (lists, dicts) never name a hook
        Some(_) => None,
    })
}

/// Mapping from setting name to its schema entry
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct ConfigurationSchema {
    entries: BTreeMap<String, SchemaEntry>,
}

impl ConfigurationSchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(mut self, name: impl Into<String>, entry: SchemaEntry) -> Self {
        self.entries.insert(name.into(), entry);
        self
    }

    /// Schema for `setting`, or `None` for legacy settings without one
    pub fn get(&self, setting: &str) -> Option<&SchemaEntry> {
        self.entries.get(setting)
    }

    pub fn setting_names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

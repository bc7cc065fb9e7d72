//! Hook reference expressions
//!
//! A hook setting holds one or more reference expressions separated by `:`,
//! earliest layer first. Each expression takes one of these forms:
//!
//! | Expression                          | Hook file                                   |
//! |-------------------------------------|---------------------------------------------|
//! | `default`                           | the default declared in the bundle manifest |
//! | `{self}/path/to/foo.py`             | `<bundle>/hooks/path/to/foo.py`             |
//! | `{config}/path/to/foo.py`           | `<config>/hooks/path/to/foo.py`             |
//! | `{$HOOK_PATH}/path/to/foo.py`       | `$HOOK_PATH/path/to/foo.py`                 |
//! | `{tk-framework-foo_v1.x.x}/bar.py`  | `<framework>/hooks/bar.py`                  |
//! | `foo`                               | `<config>/hooks/foo.py`                     |

/// Expression selecting the manifest default
pub const DEFAULT_MARKER: &str = "default";

/// Token for the bundle's own hooks folder
pub const SELF_TOKEN: &str = "{self}";

/// Token for the pipeline configuration's hooks folder
pub const CONFIG_TOKEN: &str = "{config}";

/// Separator between the layers of a hook chain
pub const CHAIN_SEPARATOR: char = ':';

/// A parsed hook reference expression
///
/// `rest` fields hold everything after the token, usually starting with `/`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookReference<'a> {
    Default,
    BundleLocal { rest: &'a str },
    ConfigLocal { rest: &'a str },
    EnvVar { name: &'a str, rest: &'a str },
    Instance { instance: &'a str, rest: &'a str },
    Legacy { name: &'a str },
}

/// Why an expression could not be parsed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceParseError {
    Empty,
    EmptyVariableName,
    EmptyInstanceName,
}

impl ReferenceParseError {
    pub fn reason(&self) -> &'static str {
        match self {
            ReferenceParseError::Empty => "the expression is empty",
            ReferenceParseError::EmptyVariableName => "'{$}' does not name an environment variable",
            ReferenceParseError::EmptyInstanceName => "'{}' does not name a framework instance",
        }
    }
}

impl<'a> HookReference<'a> {
    /// Parse a single expression, checking prefixes in priority order
    pub fn parse(expression: &'a str) -> Result<Self, ReferenceParseError> {
        if expression.is_empty() {
            return Err(ReferenceParseError::Empty);
        }

        if expression == DEFAULT_MARKER {
            return Ok(HookReference::Default);
        }

        if let Some(rest) = expression.strip_prefix(SELF_TOKEN) {
            return Ok(HookReference::BundleLocal { rest });
        }

        if let Some(rest) = expression.strip_prefix(CONFIG_TOKEN) {
            return Ok(HookReference::ConfigLocal { rest });
        }

        if let Some((token, rest)) = split_braced(expression) {
            return match token.strip_prefix('$') {
                Some("") => Err(ReferenceParseError::EmptyVariableName),
                Some(name) => Ok(HookReference::EnvVar { name, rest }),
                None if token.is_empty() => Err(ReferenceParseError::EmptyInstanceName),
                None => Ok(HookReference::Instance {
                    instance: token,
                    rest,
                }),
            };
        }

        Ok(HookReference::Legacy { name: expression })
    }

    /// Whether this expression explicitly overrides the manifest default
    ///
    /// Only brace-delimited references other than `{self}` do; bundle-local
    /// references, `default` and legacy names replace the chain outright.
    pub fn is_override(&self) -> bool {
        matches!(
            self,
            HookReference::ConfigLocal { .. }
                | HookReference::EnvVar { .. }
                | HookReference::Instance { .. }
        )
    }

    pub fn kind(&self) -> &'static str {
        match self {
            HookReference::Default => "default",
            HookReference::BundleLocal { .. } => "bundle",
            HookReference::ConfigLocal { .. } => "config",
            HookReference::EnvVar { .. } => "environment variable",
            HookReference::Instance { .. } => "framework instance",
            HookReference::Legacy { .. } => "legacy",
        }
    }
}

/// Split `{token}rest` into its parts
fn split_braced(expression: &str) -> Option<(&str, &str)> {
    let inner = expression.strip_prefix('{')?;
    let end = inner.find('}')?;
    Some((&inner[..end], &inner[end + 1..]))
}

/// Split a hook setting value into its chain of expressions
pub fn split_chain(value: &str) -> Vec<&str> {
    value.split(CHAIN_SEPARATOR).collect()
}

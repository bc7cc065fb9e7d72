//! Cross-platform path utilities for hookchain
//!
//! Hook references and `config_path` settings are authored with forward
//! slashes in YAML. These helpers translate them to the host separator once
//! all tokens have been substituted.

use std::path::{Component, MAIN_SEPARATOR, Path, PathBuf};

/// Replace every `/` with the host's native separator.
///
/// # Examples
///
/// ```
/// use hookchain::path_utils::to_native_separators;
///
/// let native = to_native_separators("hooks/publish/pre.py");
/// assert_eq!(native, format!("hooks{0}publish{0}pre.py", std::path::MAIN_SEPARATOR));
/// ```
pub fn to_native_separators(value: &str) -> String {
    if MAIN_SEPARATOR == '/' {
        value.to_string()
    } else {
        value.replace('/', &MAIN_SEPARATOR.to_string())
    }
}

/// Convert a path to a forward-slash string representation
pub fn to_forward_slashes(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Substitute a folder for a leading token and normalize separators.
///
/// `rest` is whatever followed the token in the expression, usually starting
/// with `/`. The folder and the remainder are concatenated rather than joined
/// so that they combine exactly as authored. The folder's bytes are kept as is.
pub fn substitute_folder(folder: &Path, rest: &str) -> PathBuf {
    let mut joined = folder.as_os_str().to_owned();
    joined.push(to_native_separators(rest));
    PathBuf::from(joined)
}

/// Make `path` absolute against the current directory without touching the
/// filesystem, stripping Windows verbatim prefixes when present.
///
/// `..` components are folded lexically, symlinks are left alone.
pub fn absolutize(path: &Path) -> std::io::Result<PathBuf> {
    let absolute = std::path::absolute(path)?;
    let mut normalized = PathBuf::new();
    for component in dunce::simplified(&absolute).components() {
        match component {
            Component::ParentDir => {
                normalized.pop();
            }
            Component::CurDir => {}
            other => normalized.push(other),
        }
    }
    Ok(normalized)
}

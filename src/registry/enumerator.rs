//! Uninstall subtree enumeration
//!
//! Expands each configured (hive, path) root into one value set per immediate
//! child key. One child key corresponds to one installed product. Ordering is
//! whatever the accessor yields; consumers must not depend on it.

use crate::registry::accessor::{Hive, RegistryAccessor, RegistryData, RegistryValue};
use tracing::{debug, warn};

/// One (hive, subtree path) scan root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UninstallRoot {
    /// Registry hive
    pub hive: Hive,
    /// Subtree path below the hive, backslash separated
    pub path: String,
}

impl UninstallRoot {
    /// Create a root from a hive and a subtree path
    pub fn new(hive: Hive, path: impl Into<String>) -> Self {
        Self {
            hive,
            path: path.into(),
        }
    }
}

/// The three well-known uninstall roots scanned by default
///
/// Returned as an owned list so callers and tests can substitute their own
/// roots instead of relying on process-wide constants.
pub fn default_uninstall_roots() -> Vec<UninstallRoot> {
    vec![
        UninstallRoot::new(
            Hive::LocalMachine,
            r"Software\Microsoft\Windows\CurrentVersion\Uninstall",
        ),
        UninstallRoot::new(
            Hive::LocalMachine,
            r"Software\Wow6432Node\Microsoft\Windows\CurrentVersion\Uninstall",
        ),
        UninstallRoot::new(
            Hive::CurrentUser,
            r"Software\Microsoft\Windows\CurrentVersion\Uninstall",
        ),
    ]
}

/// Value set of one uninstall entry (one child key of a scanned root)
///
/// Ephemeral: exists only for the duration of one resolution attempt.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UninstallEntry {
    /// Values in accessor order
    pub values: Vec<RegistryValue>,
}

impl UninstallEntry {
    /// Create an entry from a value list
    pub fn new(values: Vec<RegistryValue>) -> Self {
        Self { values }
    }

    /// True when the entry holds no values at all
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// First string-typed value with the given name
    ///
    /// Values of the same name but a non-string type do not match.
    pub fn string_value(&self, name: &str) -> Option<&str> {
        self.values.iter().find_map(|value| match &value.data {
            RegistryData::Str(s) if value.name == name => Some(s.as_str()),
            _ => None,
        })
    }
}

/// Expand one root into one entry per immediate child key
///
/// A child key whose values cannot be read degrades to an entry with zero
/// values (the classifier short-circuits on those). A root whose child keys
/// cannot be listed contributes nothing; other roots are unaffected.
pub fn enumerate_entries<R: RegistryAccessor>(
    registry: &R,
    root: &UninstallRoot,
) -> Vec<UninstallEntry> {
    let keys = match registry.list_child_keys(root.hive, &root.path) {
        Ok(keys) => keys,
        Err(e) => {
            warn!("Failed to enumerate {:?}\\{}: {}", root.hive, root.path, e);
            return Vec::new();
        }
    };

    keys.into_iter()
        .map(|key| {
            let path = format!("{}\\{}", root.path, key);
            let values = registry.read_values(root.hive, &path).unwrap_or_else(|e| {
                debug!("Failed to read values under {path}: {e}");
                Vec::new()
            });
            UninstallEntry::new(values)
        })
        .collect()
}

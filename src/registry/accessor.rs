//! Registry read primitives
//!
//! Defines the capability trait the scanner consumes, plus the `winreg`-backed
//! implementation used on Windows. The trait seam keeps the detection
//! pipeline runnable against fake registries in tests on any platform.

use crate::error::Result;

/// Registry hive a scan root lives under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Hive {
    /// `HKEY_LOCAL_MACHINE`
    LocalMachine,
    /// `HKEY_CURRENT_USER`
    CurrentUser,
}

/// Typed payload of a registry value
///
/// Only string payloads are semantically meaningful to the scanner; every
/// other value type is carried through as [`RegistryData::Other`] context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryData {
    /// `REG_SZ` / `REG_EXPAND_SZ` payload
    Str(String),
    /// Any non-string value type
    Other,
}

/// A single (name, typed data) pair read from one uninstall entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryValue {
    /// Value name, e.g. `DisplayName`
    pub name: String,
    /// Typed payload
    pub data: RegistryData,
}

impl RegistryValue {
    /// Convenience constructor for string-typed values
    pub fn string(name: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data: RegistryData::Str(data.into()),
        }
    }
}

/// Capability trait for reading the installed-software registry
///
/// Implementations must be shareable across the scanner's parallel
/// resolution tasks.
pub trait RegistryAccessor: Send + Sync {
    /// Enumerate the names of the immediate child keys under `path`
    fn list_child_keys(&self, hive: Hive, path: &str) -> Result<Vec<String>>;

    /// Enumerate the typed values stored directly under `path`
    fn read_values(&self, hive: Hive, path: &str) -> Result<Vec<RegistryValue>>;
}

/// Live accessor backed by the Windows registry
#[cfg(windows)]
#[derive(Debug, Clone, Copy, Default)]
pub struct WindowsRegistry;

#[cfg(windows)]
impl Hive {
    fn open_root(self) -> winreg::RegKey {
        use winreg::RegKey;
        use winreg::enums::{HKEY_CURRENT_USER, HKEY_LOCAL_MACHINE};

        match self {
            Hive::LocalMachine => RegKey::predef(HKEY_LOCAL_MACHINE),
            Hive::CurrentUser => RegKey::predef(HKEY_CURRENT_USER),
        }
    }
}

#[cfg(windows)]
impl RegistryAccessor for WindowsRegistry {
    fn list_child_keys(&self, hive: Hive, path: &str) -> Result<Vec<String>> {
        use crate::error::ScanError;

        let key = hive
            .open_root()
            .open_subkey(path)
            .map_err(|e| ScanError::Registry(Box::new(e)))?;

        let mut names = Vec::new();
        for name in key.enum_keys() {
            match name {
                Ok(name) => names.push(name),
                Err(e) => {
                    // A single unreadable child must not abort the listing
                    tracing::debug!("Skipping unreadable child key under {path}: {e}");
                }
            }
        }
        Ok(names)
    }

    fn read_values(&self, hive: Hive, path: &str) -> Result<Vec<RegistryValue>> {
        use crate::error::ScanError;
        use winreg::enums::{REG_EXPAND_SZ, REG_SZ};
        use winreg::types::FromRegValue;

        let key = hive
            .open_root()
            .open_subkey(path)
            .map_err(|e| ScanError::Registry(Box::new(e)))?;

        let mut values = Vec::new();
        for value in key.enum_values() {
            let (name, raw) = match value {
                Ok(pair) => pair,
                Err(e) => {
                    tracing::debug!("Skipping unreadable value under {path}: {e}");
                    continue;
                }
            };
            let data = if matches!(raw.vtype, REG_SZ | REG_EXPAND_SZ) {
                match String::from_reg_value(&raw) {
                    Ok(s) => RegistryData::Str(s),
                    Err(_) => RegistryData::Other,
                }
            } else {
                RegistryData::Other
            };
            values.push(RegistryValue { name, data });
        }
        Ok(values)
    }
}

//! Windows uninstall-registry access
//!
//! The registry is consumed as a capability rather than implemented here:
//! [`RegistryAccessor`] exposes child-key listing and typed value reads,
//! `WindowsRegistry` backs it with the live Windows registry, and
//! [`enumerate_entries`] expands a configured root into one value set per
//! installed product.

pub mod accessor;
pub mod enumerator;

// Public API re-exports
pub use accessor::{Hive, RegistryAccessor, RegistryData, RegistryValue};

#[cfg(windows)]
pub use accessor::WindowsRegistry;

pub use enumerator::{UninstallEntry, UninstallRoot, default_uninstall_roots, enumerate_entries};

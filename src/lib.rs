//! `electroscan` - Electron application discovery for Windows
//!
//! Scans the Windows uninstall registry and correlates entry metadata with
//! filesystem evidence (the `resources/electron.asar` packaging marker) to
//! find installed Electron applications. Each match is normalized into an
//! [`AppRecord`] (identifier, display name, embedded icon, executable path)
//! for a host launcher or app-picker UI.
//!
//! The scan is a pure, stateless function from a registry snapshot to a
//! collection of records: entries that are not Electron apps, or that cannot
//! be resolved, simply contribute nothing. The heuristic pipeline itself is
//! cross-platform and runs against any [`registry::RegistryAccessor`]; only
//! the live `WindowsRegistry` accessor and the `scan()` convenience function
//! require Windows.

// Module declarations
pub mod detect;
pub mod error;
pub mod record;
pub mod registry;
pub mod scanner;

// Re-export commonly used types
pub use error::{Result, ScanError};
pub use record::AppRecord;
pub use scanner::Scanner;

#[cfg(windows)]
pub use scanner::scan;

//! Scan orchestration
//!
//! Fans the configured uninstall roots out into independent per-entry
//! resolution tasks and gathers the records that survive classification.
//! Entries are processed in parallel; no entry's failure affects another's
//! outcome, and the aggregate result is an unordered collection.

use crate::detect::{ResolveOptions, classify_entry};
use crate::record::{AppRecord, build_record};
use crate::registry::{
    RegistryAccessor, UninstallEntry, UninstallRoot, default_uninstall_roots, enumerate_entries,
};
use rayon::prelude::*;
use tracing::warn;

/// Orchestrates a full scan across a set of uninstall roots
///
/// Generic over the registry capability so tests can substitute fakes for
/// the live registry.
pub struct Scanner<R: RegistryAccessor> {
    registry: R,
    roots: Vec<UninstallRoot>,
    options: ResolveOptions,
}

impl<R: RegistryAccessor> Scanner<R> {
    /// Create a scanner over the three default uninstall roots
    pub fn new(registry: R) -> Self {
        Self {
            registry,
            roots: default_uninstall_roots(),
            options: ResolveOptions::default(),
        }
    }

    /// Replace the scanned roots
    #[must_use]
    pub fn with_roots(mut self, roots: Vec<UninstallRoot>) -> Self {
        self.roots = roots;
        self
    }

    /// Override resolution behavior
    #[must_use]
    pub fn with_options(mut self, options: ResolveOptions) -> Self {
        self.options = options;
        self
    }

    /// Run one full scan
    ///
    /// Returns every successfully resolved record, in no particular order.
    /// Zero matches yields an empty vector, never an error.
    pub fn scan(&self) -> Vec<AppRecord> {
        let entries: Vec<UninstallEntry> = self
            .roots
            .iter()
            .flat_map(|root| enumerate_entries(&self.registry, root))
            .collect();

        entries
            .par_iter()
            .filter_map(|entry| self.resolve_entry(entry))
            .collect()
    }

    fn resolve_entry(&self, entry: &UninstallEntry) -> Option<AppRecord> {
        let candidate = classify_entry(entry, self.options)?;
        match build_record(&candidate, entry) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!(
                    "Dropping resolved entry {}: {}",
                    candidate.exe_path.display(),
                    e
                );
                None
            }
        }
    }
}

/// Scan the live Windows registry with the default roots and options
#[cfg(windows)]
pub fn scan() -> Vec<AppRecord> {
    use crate::registry::WindowsRegistry;

    Scanner::new(WindowsRegistry).scan()
}

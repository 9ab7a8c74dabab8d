//! Electron application detection
//!
//! Decides whether an uninstall entry describes an installed Electron
//! application and, if so, resolves its primary executable and optional icon
//! through a layered set of heuristics with graceful degradation.

pub mod marker;
pub mod resolver;

// Public API re-exports
pub use marker::{has_packaging_marker, packaging_marker};
pub use resolver::{ResolutionCandidate, ResolveOptions, classify_entry};

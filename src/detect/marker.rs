//! Packaging marker probe
//!
//! An application packaged with Electron's default layout ships a
//! `resources/electron.asar` archive next to its executable. The relative
//! location is a compatibility contract: classification succeeds only when
//! the marker sits exactly there.

use std::path::{Path, PathBuf};

/// Marker path relative to an application directory
pub fn packaging_marker(dir: &Path) -> PathBuf {
    dir.join("resources").join("electron.asar")
}

/// Check synchronously whether the packaging marker exists under `dir`
pub fn has_packaging_marker(dir: &Path) -> bool {
    packaging_marker(dir).exists()
}

//! Record construction from a resolved candidate
//!
//! Reads and embeds the icon file when one was resolved. Unlike the
//! filesystem probes during classification, an icon read failure here is a
//! hard failure for the entry: reaching this point implies the entry should
//! have succeeded, so the error is surfaced instead of swallowed.

use crate::detect::ResolutionCandidate;
use crate::error::{Result, ScanError};
use crate::record::models::AppRecord;
use crate::registry::UninstallEntry;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use std::fs;
use std::path::Path;

/// Media type prefix for embedded icons
const ICON_DATA_URI_PREFIX: &str = "data:image/x-icon;base64,";

/// Build the final record for a resolved candidate
///
/// `name` prefers the entry's `DisplayName` value and falls back to the
/// executable's file stem. `id` and `exe_path` always carry the same value.
pub fn build_record(candidate: &ResolutionCandidate, entry: &UninstallEntry) -> Result<AppRecord> {
    let exe_path = candidate.exe_path.to_string_lossy().into_owned();

    let name = entry
        .string_value("DisplayName")
        .map_or_else(|| exe_file_stem(&candidate.exe_path), str::to_owned);

    let icon = match &candidate.icon_path {
        Some(path) => {
            let bytes = fs::read(path).map_err(|source| ScanError::IconRead {
                path: path.clone(),
                source,
            })?;
            format!("{ICON_DATA_URI_PREFIX}{}", STANDARD.encode(bytes))
        }
        None => String::new(),
    };

    Ok(AppRecord {
        id: exe_path.clone(),
        name,
        icon,
        exe_path,
    })
}

/// Executable base filename with its extension stripped
fn exe_file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

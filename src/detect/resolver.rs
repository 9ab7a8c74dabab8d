//! Uninstall-entry classification and executable resolution
//!
//! Implements the detection policy as an explicit ordered decision procedure
//! so the branch priority stays auditable:
//!
//! 1. Empty entries fail immediately.
//! 2. A `DisplayIcon` value pointing at an `.exe` commits the entry to that
//!    executable; the packaging-marker check on its parent directory is then
//!    final, with no fallback. A `DisplayIcon` pointing at an `.ico` only
//!    remembers the icon and continues.
//! 3. An `InstallLocation` value is probed for the flat layout (marker
//!    directly under the install directory) and then for the versioned
//!    layout (marker under a `\d+.\d+.\d+`-named subdirectory).
//!
//! At most one candidate is produced per entry.

use crate::detect::marker::has_packaging_marker;
use crate::registry::UninstallEntry;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tracing::warn;

/// Substrings flagging helper/updater binaries excluded from candidacy
const HELPER_KEYWORDS: [&str; 2] = ["uninstall", "update"];

/// Resolution behavior switches
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolveOptions {
    /// Select the executable from the versioned subdirectory itself instead
    /// of the parent install directory.
    ///
    /// The original detection filters the parent directory's entries even
    /// though the packaging marker was found inside the versioned
    /// subdirectory, which looks like an upstream bug. `false` keeps that
    /// behavior for compatibility; `true` enables the corrected variant.
    pub exe_from_versioned_dir: bool,
}

/// Transient (executable path, icon path) pair produced by classification
///
/// Intermediate state only; the record builder turns it into the final
/// [`crate::AppRecord`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionCandidate {
    /// Resolved primary executable
    pub exe_path: PathBuf,
    /// Icon file the registry pointed at; `None` means no icon
    pub icon_path: Option<PathBuf>,
}

/// Three-component numeric version pattern, matched anywhere in a name
fn version_pattern() -> &'static Regex {
    static VERSION_PATTERN: OnceLock<Regex> = OnceLock::new();
    VERSION_PATTERN.get_or_init(|| Regex::new(r"\d+\.\d+\.\d+").expect("version pattern regex"))
}

/// True for names that qualify as the primary executable: an `.exe` that is
/// not a helper/updater binary
fn is_primary_executable(file_name: &str) -> bool {
    let lc = file_name.to_lowercase();
    lc.ends_with(".exe") && !HELPER_KEYWORDS.iter().any(|keyword| lc.contains(keyword))
}

/// List the immediate entry names of an install directory
///
/// A directory that is missing or unreadable degrades to an empty listing.
/// Order is whatever the filesystem enumeration yields.
fn list_dir_names(dir: &Path) -> Vec<String> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            warn!("Failed to list install directory {}: {}", dir.display(), e);
            return Vec::new();
        }
    };

    entries
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry.file_name().to_string_lossy().into_owned()),
            Err(e) => {
                warn!("Failed to read entry under {}: {}", dir.display(), e);
                None
            }
        })
        .collect()
}

/// Classify one uninstall entry
///
/// Returns `None` when the entry does not describe an Electron application,
/// otherwise the resolved executable and optional icon. Branch priority is
/// strict: a `DisplayIcon` executable whose marker check fails disqualifies
/// the entry even when an `InstallLocation` value is also present.
pub fn classify_entry(
    entry: &UninstallEntry,
    options: ResolveOptions,
) -> Option<ResolutionCandidate> {
    if entry.is_empty() {
        return None;
    }

    let mut icon_path = None;

    if let Some(display_icon) = entry.string_value("DisplayIcon") {
        // Registry convention is "path,iconIndex"; the index is discarded
        let candidate = display_icon.split(',').next().unwrap_or(display_icon);
        let lc = candidate.to_lowercase();
        if lc.ends_with(".exe") {
            let exe = Path::new(candidate);
            if !exe.parent().is_some_and(has_packaging_marker) {
                return None;
            }
            return Some(ResolutionCandidate {
                exe_path: exe.to_path_buf(),
                icon_path: None,
            });
        } else if lc.ends_with(".ico") {
            icon_path = Some(PathBuf::from(candidate));
        }
    }

    let install_location = entry.string_value("InstallLocation")?;
    let dir = Path::new(install_location);
    let names = list_dir_names(dir);

    if has_packaging_marker(dir) {
        // Flat layout: the executable sits next to the marker
        let exe_name = names.iter().find(|name| is_primary_executable(name))?;
        return Some(ResolutionCandidate {
            exe_path: dir.join(exe_name),
            icon_path,
        });
    }

    // Versioned layout used by auto-updating installers
    let versioned = names.iter().find(|name| version_pattern().is_match(name))?;
    let versioned_dir = dir.join(versioned);
    if !has_packaging_marker(&versioned_dir) {
        return None;
    }

    if options.exe_from_versioned_dir {
        let sub_names = list_dir_names(&versioned_dir);
        let exe_name = sub_names.iter().find(|name| is_primary_executable(name))?;
        Some(ResolutionCandidate {
            exe_path: versioned_dir.join(exe_name),
            icon_path,
        })
    } else {
        // Compatibility behavior: the filter runs against the parent install
        // directory's entries, not the versioned subdirectory's
        let exe_name = names.iter().find(|name| is_primary_executable(name))?;
        Some(ResolutionCandidate {
            exe_path: dir.join(exe_name),
            icon_path,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::RegistryValue;
    use std::fs;
    use tempfile::TempDir;

    fn entry(values: Vec<RegistryValue>) -> UninstallEntry {
        UninstallEntry::new(values)
    }

    /// Lay out an app directory with a packaging marker and the given files
    fn electron_app_dir(files: &[&str]) -> TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("resources")).unwrap();
        fs::write(dir.path().join("resources").join("electron.asar"), b"asar").unwrap();
        for file in files {
            fs::write(dir.path().join(file), b"bin").unwrap();
        }
        dir
    }

    #[test]
    fn test_empty_entry_never_classifies() {
        assert_eq!(
            classify_entry(&entry(Vec::new()), ResolveOptions::default()),
            None
        );
    }

    #[test]
    fn test_display_icon_exe_with_marker_resolves() {
        let dir = electron_app_dir(&["Foo.exe"]);
        let exe = dir.path().join("Foo.exe");
        let values = entry(vec![RegistryValue::string(
            "DisplayIcon",
            format!("{},0", exe.display()),
        )]);

        let candidate = classify_entry(&values, ResolveOptions::default()).unwrap();
        assert_eq!(candidate.exe_path, exe);
        assert_eq!(candidate.icon_path, None);
    }

    #[test]
    fn test_display_icon_exe_without_marker_short_circuits() {
        // No marker next to the DisplayIcon executable, but a perfectly
        // resolvable InstallLocation: the entry must still fail
        let bare = tempfile::tempdir().unwrap();
        let exe = bare.path().join("Foo.exe");
        fs::write(&exe, b"bin").unwrap();

        let installed = electron_app_dir(&["Foo.exe"]);
        let values = entry(vec![
            RegistryValue::string("DisplayIcon", exe.display().to_string()),
            RegistryValue::string("InstallLocation", installed.path().display().to_string()),
        ]);

        assert_eq!(classify_entry(&values, ResolveOptions::default()), None);
    }

    #[test]
    fn test_display_icon_ico_carries_icon_into_install_location() {
        let dir = electron_app_dir(&["Bar.exe"]);
        let ico = dir.path().join("bar.ico");
        fs::write(&ico, b"icon").unwrap();

        let values = entry(vec![
            RegistryValue::string("DisplayIcon", ico.display().to_string()),
            RegistryValue::string("InstallLocation", dir.path().display().to_string()),
        ]);

        let candidate = classify_entry(&values, ResolveOptions::default()).unwrap();
        assert_eq!(candidate.exe_path, dir.path().join("Bar.exe"));
        assert_eq!(candidate.icon_path, Some(ico));
    }

    #[test]
    fn test_flat_layout_excludes_helper_binaries() {
        let dir = electron_app_dir(&["Uninstall.exe", "Updater.exe", "Bar.exe"]);
        let values = entry(vec![RegistryValue::string(
            "InstallLocation",
            dir.path().display().to_string(),
        )]);

        let candidate = classify_entry(&values, ResolveOptions::default()).unwrap();
        assert_eq!(candidate.exe_path, dir.path().join("Bar.exe"));
    }

    #[test]
    fn test_flat_layout_with_only_helpers_fails() {
        let dir = electron_app_dir(&["Uninstall.exe", "AppUpdate.exe"]);
        let values = entry(vec![RegistryValue::string(
            "InstallLocation",
            dir.path().display().to_string(),
        )]);

        assert_eq!(classify_entry(&values, ResolveOptions::default()), None);
    }

    #[test]
    fn test_versioned_layout_filters_parent_entries() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("Baz.exe"), b"bin").unwrap();
        let versioned = dir.path().join("app-1.2.3");
        fs::create_dir_all(versioned.join("resources")).unwrap();
        fs::write(versioned.join("resources").join("electron.asar"), b"asar").unwrap();

        let values = entry(vec![RegistryValue::string(
            "InstallLocation",
            dir.path().display().to_string(),
        )]);

        let candidate = classify_entry(&values, ResolveOptions::default()).unwrap();
        assert_eq!(candidate.exe_path, dir.path().join("Baz.exe"));
    }

    #[test]
    fn test_versioned_layout_corrected_variant_selects_inside_subdir() {
        let dir = tempfile::tempdir().unwrap();
        let versioned = dir.path().join("1.2.3");
        fs::create_dir_all(versioned.join("resources")).unwrap();
        fs::write(versioned.join("resources").join("electron.asar"), b"asar").unwrap();
        fs::write(versioned.join("Baz.exe"), b"bin").unwrap();

        let values = entry(vec![RegistryValue::string(
            "InstallLocation",
            dir.path().display().to_string(),
        )]);

        // Literal behavior finds nothing in the parent directory
        assert_eq!(classify_entry(&values, ResolveOptions::default()), None);

        let options = ResolveOptions {
            exe_from_versioned_dir: true,
        };
        let candidate = classify_entry(&values, options).unwrap();
        assert_eq!(candidate.exe_path, versioned.join("Baz.exe"));
    }

    #[test]
    fn test_versioned_subdir_without_marker_fails() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("2.0.1")).unwrap();
        fs::write(dir.path().join("Baz.exe"), b"bin").unwrap();

        let values = entry(vec![RegistryValue::string(
            "InstallLocation",
            dir.path().display().to_string(),
        )]);

        assert_eq!(classify_entry(&values, ResolveOptions::default()), None);
    }

    #[test]
    fn test_missing_install_directory_degrades_to_failure() {
        let dir = tempfile::tempdir().unwrap();
        let gone = dir.path().join("removed");
        let values = entry(vec![RegistryValue::string(
            "InstallLocation",
            gone.display().to_string(),
        )]);

        assert_eq!(classify_entry(&values, ResolveOptions::default()), None);
    }

    #[test]
    fn test_entry_without_relevant_values_fails() {
        let values = entry(vec![RegistryValue::string("DisplayName", "Some App")]);
        assert_eq!(classify_entry(&values, ResolveOptions::default()), None);
    }

    #[test]
    fn test_helper_filter() {
        assert!(is_primary_executable("Bar.exe"));
        assert!(is_primary_executable("BAR.EXE"));
        assert!(!is_primary_executable("Uninstall.exe"));
        assert!(!is_primary_executable("squirrel-UPDATE.exe"));
        assert!(!is_primary_executable("readme.txt"));
        assert!(!is_primary_executable("bar.exe.bak"));
    }

    #[test]
    fn test_version_pattern_is_substring_match() {
        let re = version_pattern();
        assert!(re.is_match("1.2.3"));
        assert!(re.is_match("app-10.20.30-x64"));
        assert!(!re.is_match("1.2"));
        assert!(!re.is_match("v1_2_3"));
    }

    // Property-based tests over the pure name helpers
    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: names containing a helper keyword never qualify,
            /// whatever the casing
            #[test]
            fn helper_keyword_always_disqualifies(
                prefix in "[a-zA-Z0-9_-]{0,8}",
                keyword in prop::sample::select(vec!["uninstall", "Uninstall", "UPDATE", "update"]),
            ) {
                let name = format!("{prefix}{keyword}.exe");
                prop_assert!(!is_primary_executable(&name));
            }

            /// Property: plain .exe names free of helper keywords qualify
            #[test]
            fn clean_exe_names_qualify(name in "[a-zA-Z0-9_-]{1,12}") {
                prop_assume!(!name.to_lowercase().contains("uninstall"));
                prop_assume!(!name.to_lowercase().contains("update"));
                let file = format!("{name}.exe");
                prop_assert!(is_primary_executable(&file));
            }

            /// Property: a three-component version is found anywhere in a name
            #[test]
            fn version_components_match_anywhere(
                a in 0u32..1000, b in 0u32..1000, c in 0u32..1000,
                prefix in "[a-zA-Z-]{0,6}",
                suffix in "[a-zA-Z-]{0,6}",
            ) {
                let name = format!("{prefix}{a}.{b}.{c}{suffix}");
                prop_assert!(version_pattern().is_match(&name));
            }
        }
    }
}

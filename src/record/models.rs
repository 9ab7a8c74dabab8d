//! Application record model

use serde::{Deserialize, Serialize};

/// One discovered Electron application
///
/// Immutable value type: a fresh scan produces a fresh collection, records
/// are never updated in place. The executable path doubles as the identity
/// key, so the same application installed twice at different paths yields
/// two records.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AppRecord {
    /// Stable identity key: the resolved executable's filesystem path
    pub id: String,
    /// `DisplayName` registry value when present, else the executable's
    /// filename with its extension stripped
    pub name: String,
    /// Empty, or a self-contained `data:image/x-icon;base64,` URI embedding
    /// the icon file bytes
    pub icon: String,
    /// Same value as `id`, kept as a separate field for the consumer
    #[serde(rename = "exePath")]
    pub exe_path: String,
}

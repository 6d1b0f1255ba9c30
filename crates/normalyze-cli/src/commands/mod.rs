//! Command implementations.

pub mod analyze;
pub mod normalize;

use std::path::Path;

/// Relation name fallback: the file stem, or "relation" when unavailable.
pub fn relation_name(explicit: Option<String>, file: &Path) -> String {
    explicit.unwrap_or_else(|| {
        file.file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "relation".to_string())
    })
}

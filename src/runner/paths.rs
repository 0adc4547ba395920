//! Glob resolution against the filesystem
//!
//! Expands a pattern (with `**` for any directory depth) into the set of
//! entries that exist on disk right now.

use crate::error::{FreshnessError, FreshnessResult};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf, MAIN_SEPARATOR};

/// Resolve a glob pattern to the paths currently matching it.
///
/// Relative patterns are anchored at `base_dir`; absolute patterns are used as-is.
/// A pattern that matches nothing yields an empty set.
pub fn resolve_glob(pattern: &str, base_dir: &Path) -> FreshnessResult<BTreeSet<PathBuf>> {
    let anchored = anchor_pattern(pattern, base_dir);

    let entries = glob::glob(&anchored).map_err(|source| FreshnessError::MalformedPattern {
        pattern: pattern.to_string(),
        source,
    })?;

    let mut matches = BTreeSet::new();
    for entry in entries {
        let path = entry.map_err(|e| FreshnessError::FileAccess {
            path: e.path().to_path_buf(),
            source: e.into_error(),
        })?;
        matches.insert(path);
    }

    Ok(matches)
}

/// Prefix a relative pattern with the escaped base directory
fn anchor_pattern(pattern: &str, base_dir: &Path) -> String {
    if Path::new(pattern).is_absolute() || base_dir.as_os_str().is_empty() {
        return pattern.to_string();
    }

    let base = glob::Pattern::escape(&base_dir.to_string_lossy());
    let base = base.trim_end_matches(MAIN_SEPARATOR);
    format!("{}{}{}", base, MAIN_SEPARATOR, pattern)
}

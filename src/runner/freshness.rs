//! Timestamp freshness checks
//!
//! A command is up to date when the newest file it creates is strictly newer
//! than the newest file it depends on.

use crate::error::{FreshnessError, FreshnessResult};
use crate::runner::resolve_glob;
use std::fs;
use std::path::Path;
use std::time::SystemTime;
use tracing::{debug, trace};

/// Newest modification times of a command's inputs and outputs.
///
/// `None` stands for "no file matched" and orders before every real timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Freshness {
    pub newest_dependency: Option<SystemTime>,
    pub newest_create: Option<SystemTime>,
}

impl Freshness {
    /// Resolve both pattern lists and record the newest timestamp of each
    pub fn evaluate(
        dependencies: &[String],
        creates: &[String],
        base_dir: &Path,
    ) -> FreshnessResult<Self> {
        let newest_dependency = newest_mtime(dependencies, base_dir)?;
        let newest_create = newest_mtime(creates, base_dir)?;

        debug!(?newest_dependency, ?newest_create, "evaluated freshness");

        Ok(Freshness {
            newest_dependency,
            newest_create,
        })
    }

    /// Outputs are strictly newer than inputs. Equal timestamps count as stale.
    pub fn is_up_to_date(&self) -> bool {
        self.newest_create > self.newest_dependency
    }
}

/// Check whether the files matched by `creates` are newer than those matched by `dependencies`
pub fn is_up_to_date(
    dependencies: &[String],
    creates: &[String],
    base_dir: &Path,
) -> FreshnessResult<bool> {
    Ok(Freshness::evaluate(dependencies, creates, base_dir)?.is_up_to_date())
}

/// Newest modification time across every file matched by any of `patterns`
pub fn newest_mtime(patterns: &[String], base_dir: &Path) -> FreshnessResult<Option<SystemTime>> {
    let mut newest = None;

    for pattern in patterns {
        trace!(pattern = %pattern, "resolving glob");
        for path in resolve_glob(pattern, base_dir)? {
            let modified = modified_time(&path)?;
            if Some(modified) > newest {
                newest = Some(modified);
            }
        }
    }

    Ok(newest)
}

fn modified_time(path: &Path) -> FreshnessResult<SystemTime> {
    fs::metadata(path)
        .and_then(|meta| meta.modified())
        .map_err(|source| FreshnessError::FileAccess {
            path: path.to_path_buf(),
            source,
        })
}

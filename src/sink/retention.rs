//! Age-based deletion under a retention root.
//!
//! Walks the root recursively and removes every file whose modification time is strictly
//! older than `now - retention`. A file exactly at the boundary is kept. Directories left
//! empty by the pass are pruned; the root itself never is.

use crate::error::Error;
use crate::internal;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

/// Outcome of one retention pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeleteReport {
    pub deleted: Vec<PathBuf>,
    pub failed: Vec<(PathBuf, String)>,
    pub pruned_dirs: Vec<PathBuf>,
    pub freed: u64,
}

impl DeleteReport {
    #[must_use]
    pub fn count(&self) -> usize {
        self.deleted.len()
    }
}

/// Deletes expired files under `root`, never touching anything listed in `keep`.
///
/// A missing root is not an error; there is simply nothing to delete yet.
///
/// # Errors
/// Failure to list a directory. Individual removal failures are collected in
/// [`DeleteReport::failed`] instead so one locked file doesn't stop the pass.
pub fn delete_expired(
    root: &Path,
    retention: Duration,
    now: SystemTime,
    keep: &[&Path],
) -> Result<DeleteReport, Error> {
    let mut report = DeleteReport::default();
    if !root.is_dir() {
        internal::debug(
            "RETENTION",
            &format!("Root {} does not exist, nothing to delete", root.display()),
        );
        return Ok(report);
    }

    let keep: Vec<PathBuf> = keep.iter().map(|p| canonical(p)).collect();
    walk(root, retention, now, &keep, &mut report)?;

    if report.count() > 0 {
        internal::info(
            "RETENTION",
            &format!(
                "Deleted {} expired files under {} ({} bytes)",
                report.count(),
                root.display(),
                report.freed
            ),
        );
    }
    Ok(report)
}

fn canonical(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| path.to_path_buf())
}

fn is_expired(modified: SystemTime, retention: Duration, now: SystemTime) -> bool {
    // A modification time in the future reads as age zero.
    now.duration_since(modified)
        .is_ok_and(|age| age > retention)
}

/// Returns whether anything was deleted inside `dir`.
fn walk(
    dir: &Path,
    retention: Duration,
    now: SystemTime,
    keep: &[PathBuf],
    report: &mut DeleteReport,
) -> Result<bool, Error> {
    let mut deleted_here = false;

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        let Ok(meta) = fs::symlink_metadata(&path) else {
            continue;
        };

        if meta.is_dir() {
            let deleted_below = walk(&path, retention, now, keep, report)?;
            let dir_expired = meta
                .modified()
                .is_ok_and(|m| is_expired(m, retention, now));
            if (deleted_below || dir_expired) && is_empty_dir(&path) && fs::remove_dir(&path).is_ok()
            {
                internal::debug("RETENTION", &format!("Pruned {}", path.display()));
                report.pruned_dirs.push(path);
                deleted_here = true;
            }
            continue;
        }

        let Ok(modified) = meta.modified() else {
            continue;
        };
        if !is_expired(modified, retention, now) {
            continue;
        }
        if keep.contains(&canonical(&path)) {
            internal::trace(
                "RETENTION",
                &format!("Skipping active file {}", path.display()),
            );
            continue;
        }

        match fs::remove_file(&path) {
            Ok(()) => {
                internal::debug("RETENTION", &format!("Deleted {}", path.display()));
                report.freed += meta.len();
                report.deleted.push(path);
                deleted_here = true;
            }
            Err(e) => {
                internal::warn(
                    "RETENTION",
                    &format!("Failed to delete {}: {e}", path.display()),
                );
                report.failed.push((path, e.to_string()));
            }
        }
    }

    Ok(deleted_here)
}

fn is_empty_dir(path: &Path) -> bool {
    fs::read_dir(path).is_ok_and(|mut entries| entries.next().is_none())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundary_is_retained() {
        let now = SystemTime::UNIX_EPOCH + Duration::from_secs(1_000);
        let retention = Duration::from_secs(100);
        let at_boundary = now - retention;
        assert!(!is_expired(at_boundary, retention, now));
        assert!(is_expired(at_boundary - Duration::from_secs(1), retention, now));
        assert!(!is_expired(now + Duration::from_secs(5), retention, now));
    }
}

// File: src/walk.rs
// Purpose: Directory walking rules shared by the route collector and the source scanner

use std::fs;
use std::io;
use std::path::Path;

use walkdir::{DirEntry, WalkDir};

use crate::error::{AnalyzeError, Issue, Result, RootRole};

/// Deny-list rule: dot-directories and configured names are never descended into
pub(crate) fn is_skipped_dir(name: &str, skip_dirs: &[String]) -> bool {
    (name.starts_with('.') && name.len() > 1) || skip_dirs.iter().any(|d| d == name)
}

/// Extension allow-list check, case-insensitive
pub(crate) fn has_allowed_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|ext| extensions.iter().any(|allowed| allowed.eq_ignore_ascii_case(ext)))
        .unwrap_or(false)
}

/// Checks a configured root before walking it
///
/// - Directory present: `Ok(None)`
/// - Does not exist: `Ok(Some(issue))` so the caller yields an empty set, or
///   `Err(MissingRoot)` in strict mode
/// - Exists but unreadable or not a directory: `Err(RootUnreachable)`
pub(crate) fn probe_root(role: RootRole, path: &Path, strict: bool) -> Result<Option<Issue>> {
    match fs::metadata(path) {
        Ok(meta) if meta.is_dir() => Ok(None),
        Ok(_) => Err(AnalyzeError::RootUnreachable {
            role,
            path: path.to_path_buf(),
            source: io::Error::new(io::ErrorKind::Other, "not a directory"),
        }),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            let err = AnalyzeError::MissingRoot {
                role,
                path: path.to_path_buf(),
            };
            if strict {
                return Err(err);
            }
            tracing::warn!("{}, continuing with an empty set", err);
            Ok(Issue::from_error(&err))
        }
        Err(source) => Err(AnalyzeError::RootUnreachable {
            role,
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Sorted walk of `root` that prunes deny-listed directories and any directory
/// for which `descend` returns false
pub(crate) fn walk<'a, F>(
    root: &Path,
    skip_dirs: &'a [String],
    descend: F,
) -> impl Iterator<Item = walkdir::Result<DirEntry>> + 'a
where
    F: Fn(&str) -> bool + 'a,
{
    WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(move |entry| {
            if entry.depth() == 0 || !entry.file_type().is_dir() {
                return true;
            }
            let name = entry.file_name().to_string_lossy();
            !is_skipped_dir(&name, skip_dirs) && descend(&name)
        })
}

// File: src/collector.rs
// Purpose: Builds the route inventory from a directory-based routing root

use std::path::Path;

use routegraph_router::{classify_directory, RouteEntry, RouteKind, RouteTable};

use crate::config::CollectorConfig;
use crate::error::{AnalyzeError, Issue, IssueKind, Result, RootRole};
use crate::walk::{has_allowed_extension, probe_root, walk};

/// Collected routes plus the non-fatal issues met along the way
#[derive(Debug, Default)]
pub struct Collection {
    pub table: RouteTable,
    pub issues: Vec<Issue>,
}

impl Collection {
    pub fn page_count(&self) -> usize {
        self.table.entries().filter(|e| e.is_page()).count()
    }
}

/// Walks a routing root applying the per-directory naming rules
///
/// - `(name)` is transparent
/// - `_name` is pruned, except `_not-found` which is transparent
/// - `[name]` and plain names compose the path
/// - `page.*` / `layout.*` leaves emit one entry at the accumulated path
pub struct RouteCollector<'a> {
    config: &'a CollectorConfig,
    strict: bool,
}

impl<'a> RouteCollector<'a> {
    pub fn new(config: &'a CollectorConfig) -> Self {
        Self {
            config,
            strict: false,
        }
    }

    /// Fail on a missing root instead of returning an empty collection
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Collects every page and layout below `root`, in sorted walk order
    pub fn collect(&self, root: &Path) -> Result<Collection> {
        let mut collection = Collection::default();

        if let Some(issue) = probe_root(RootRole::App, root, self.strict)? {
            collection.issues.push(issue);
            return Ok(collection);
        }

        let traversed = |name: &str| classify_directory(name).is_traversed();

        for entry in walk(root, &self.config.skip_dirs, traversed) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    let path = e.path().unwrap_or(root).to_path_buf();
                    tracing::warn!("Skipping unreadable entry {:?}: {}", path, e);
                    collection
                        .issues
                        .push(Issue::new(IssueKind::WalkError, path, e.to_string()));
                    continue;
                }
            };

            if !entry.file_type().is_file() {
                continue;
            }

            let Some(kind) = self.leaf_kind(entry.path()) else {
                continue;
            };

            let relative_dir = entry
                .path()
                .parent()
                .and_then(|dir| dir.strip_prefix(root).ok())
                .unwrap_or_else(|| Path::new(""));

            let declared = declared_path(relative_dir);
            tracing::debug!("Route {} <- {:?}", declared, entry.path());
            collection
                .table
                .push(RouteEntry::new(declared, entry.path(), kind));
        }

        let malformed: Vec<AnalyzeError> = collection
            .table
            .malformed()
            .map(|(entry, err)| AnalyzeError::MalformedPattern {
                path: entry.source_location.clone(),
                reason: err.to_string(),
            })
            .collect();
        for err in &malformed {
            tracing::warn!("{}", err);
            collection.issues.extend(Issue::from_error(err));
        }

        tracing::info!(
            "Collected {} routes ({} pages) from {:?}",
            collection.table.len(),
            collection.page_count(),
            root
        );

        Ok(collection)
    }

    /// `page.<ext>` or `layout.<ext>` with an accepted extension
    fn leaf_kind(&self, file: &Path) -> Option<RouteKind> {
        if !has_allowed_extension(file, &self.config.route_extensions) {
            return None;
        }

        match file.file_stem()?.to_str()? {
            "page" => Some(RouteKind::Page),
            "layout" => Some(RouteKind::Layout),
            _ => None,
        }
    }
}

/// Folds directory components into a declared path
///
/// Pruned directories never reach this point, so only transparent and
/// segment-contributing kinds remain. Empty accumulation is the root `/`.
fn declared_path(relative_dir: &Path) -> String {
    let path = relative_dir
        .components()
        .map(|c| classify_directory(&c.as_os_str().to_string_lossy()))
        .fold(String::new(), |mut acc, kind| {
            if let Some(segment) = kind.segment() {
                acc.push('/');
                acc.push_str(segment);
            }
            acc
        });

    if path.is_empty() {
        "/".to_string()
    } else {
        path
    }
}

// File: src/classify.rs
// Purpose: Assigns one verdict per usage group and finds pages nothing links to

use std::path::Path;

use routegraph_router::path::interpolation_prefix;
use routegraph_router::{RouteEntry, RouteTable};
use serde::{Deserialize, Serialize};

use crate::reference::UsageGroup;

/// Schemes and prefixes that leave the application
pub const EXTERNAL_PREFIXES: [&str; 5] = ["http://", "https://", "//", "mailto:", "tel:"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Verdict {
    Valid,
    Broken,
    External,
    Special,
    /// Interpolated reference whose literal base route exists
    DynamicValid,
}

impl Verdict {
    /// Counts toward `validRoutes` in the summary
    pub fn is_valid(self) -> bool {
        matches!(self, Verdict::Valid | Verdict::DynamicValid)
    }

    /// Points into the application, so it can reach a page
    pub fn is_internal(self) -> bool {
        !matches!(self, Verdict::External | Verdict::Special)
    }
}

/// A usage group with its verdict
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedGroup {
    pub group: UsageGroup,
    pub verdict: Verdict,
}

pub fn is_external(path: &str) -> bool {
    EXTERNAL_PREFIXES.iter().any(|p| path.starts_with(p))
}

pub fn is_special(path: &str) -> bool {
    path.is_empty() || path.starts_with('#')
}

/// Computes the verdict of one group against the page-route subset
///
/// Evaluated in priority order: External, Special, root, matcher hit,
/// dynamic base route, otherwise Broken.
pub fn classify(group: &UsageGroup, pages: &RouteTable) -> Verdict {
    let path = group.path.as_str();

    if is_external(path) {
        return Verdict::External;
    }

    if is_special(path) {
        return Verdict::Special;
    }

    if path == "/" {
        return if pages.has_root_page() {
            Verdict::Valid
        } else {
            Verdict::Broken
        };
    }

    if pages.matches(path) {
        return Verdict::Valid;
    }

    if group.is_dynamic && has_base_route(path, pages) {
        return Verdict::DynamicValid;
    }

    Verdict::Broken
}

/// The literal part before the first interpolation is itself a declared page
fn has_base_route(path: &str, pages: &RouteTable) -> bool {
    match interpolation_prefix(path) {
        Some("") => pages.has_root_page(),
        Some(base) => pages.contains_path(base),
        None => false,
    }
}

/// Classifies every group, keeping group order
pub fn classify_all(groups: Vec<UsageGroup>, pages: &RouteTable) -> Vec<ClassifiedGroup> {
    groups
        .into_iter()
        .map(|group| {
            let verdict = classify(&group, pages);
            tracing::debug!("{:?} {}", verdict, group.path);
            ClassifiedGroup { group, verdict }
        })
        .collect()
}

/// All classified groups of one run, with per-verdict tallies
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classification {
    pub groups: Vec<ClassifiedGroup>,
}

impl Classification {
    pub fn new(groups: Vec<UsageGroup>, pages: &RouteTable) -> Self {
        Self {
            groups: classify_all(groups, pages),
        }
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn count(&self, verdict: Verdict) -> usize {
        self.with_verdict(verdict).count()
    }

    /// Valid plus DynamicValid
    pub fn valid_count(&self) -> usize {
        self.groups.iter().filter(|c| c.verdict.is_valid()).count()
    }

    /// Groups carrying an interpolation, whatever their verdict
    pub fn dynamic_count(&self) -> usize {
        self.dynamic().count()
    }

    pub fn with_verdict(&self, verdict: Verdict) -> impl Iterator<Item = &ClassifiedGroup> + '_ {
        self.groups.iter().filter(move |c| c.verdict == verdict)
    }

    pub fn dynamic(&self) -> impl Iterator<Item = &ClassifiedGroup> + '_ {
        self.groups.iter().filter(|c| c.group.is_dynamic)
    }
}

/// Pages no internal usage group reaches
///
/// Uses the reverse direction of the shared matcher. Entries whose declared
/// path has an excluded segment, or whose file sits below an excluded
/// directory inside `app_root`, are never reported.
pub fn unused_routes<'t>(
    pages: &'t RouteTable,
    classified: &[ClassifiedGroup],
    exclusions: &[String],
    app_root: &Path,
) -> Vec<&'t RouteEntry> {
    let internal: Vec<&str> = classified
        .iter()
        .filter(|c| c.verdict.is_internal())
        .map(|c| c.group.path.as_str())
        .collect();

    pages
        .entries()
        .enumerate()
        .filter(|(_, entry)| entry.is_page() && !is_excluded(entry, exclusions, app_root))
        .filter(|(index, _)| {
            !internal
                .iter()
                .any(|path| pages.entry_accepts(*index, path).is_some())
        })
        .map(|(_, entry)| entry)
        .collect()
}

fn is_excluded(entry: &RouteEntry, exclusions: &[String], app_root: &Path) -> bool {
    exclusions.iter().any(|excluded| {
        entry
            .declared_path
            .split('/')
            .any(|segment| segment == excluded)
            || entry.is_under(app_root, excluded)
    })
}

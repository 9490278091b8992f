//! # routegraph router
//!
//! Route inventory and path matching for directory-based page routing:
//! - Static routes (`/about`)
//! - Dynamic segments (`/course/[id]`)
//! - Route groups (`(marketing)`), private directories (`_drafts`)
//! - The `_not-found` sentinel
//!
//! ## Matching
//!
//! One predicate serves two call-sites. Forward: does a reference found in source
//! code resolve to a declared route? Reverse: is a declared route reached by any
//! reference? Both go through the same per-step functions in [`route::matcher`]:
//!
//! 1. **Direct**: exact equality with a declared path
//! 2. **Dynamic**: anchored single-segment wildcard match (first in table order wins)
//! 3. **Structural prefix**: a reference with an unresolved `${...}` whose literal
//!    prefix equals a dynamic route's prefix
//!
//! ## Example
//!
//! ```
//! use routegraph_router::{RouteEntry, RouteKind, RouteTable};
//!
//! let table: RouteTable = vec![
//!     RouteEntry::new("/course/[id]/lesson/[lessonId]", "app/course/[id]/lesson/[lessonId]/page.tsx", RouteKind::Page),
//! ]
//! .into_iter()
//! .collect();
//!
//! assert!(table.matches("/course/abc123/lesson/xyz"));
//! assert!(!table.matches("/course/abc123/lessons"));
//! ```

use std::path::{Path, PathBuf};

use regex::Regex;
use serde::{Deserialize, Serialize};

// ============================================================================
// Module Declarations
// ============================================================================

pub mod path;
pub mod route;

pub use path::{clean_path, strip_query_and_fragment, wildcard_form};
pub use route::matcher::{compile_pattern, PatternError};
pub use route::pattern::{
    classify_directory, classify_segment, DirectoryKind, SegmentKind, NOT_FOUND_SENTINEL,
};

use route::matcher::{direct_hit, dynamic_hit, structural_hit};

// ============================================================================
// Core Types
// ============================================================================

/// Kind of leaf file that produced a route
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RouteKind {
    Page,
    Layout,
}

/// A declared route, built once by the collector and never mutated
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteEntry {
    /// Normalized path: leading slash, no trailing slash except root
    pub declared_path: String,
    /// Leaf file that declared the route
    pub source_location: PathBuf,
    pub kind: RouteKind,
    /// Whether the path has at least one `[placeholder]`
    pub has_parameters: bool,
}

impl RouteEntry {
    /// Creates an entry, deriving `has_parameters` from the declared path
    pub fn new(
        declared_path: impl Into<String>,
        source_location: impl Into<PathBuf>,
        kind: RouteKind,
    ) -> Self {
        let declared_path = declared_path.into();

        Self {
            has_parameters: declared_path.contains('['),
            declared_path,
            source_location: source_location.into(),
            kind,
        }
    }

    pub fn is_page(&self) -> bool {
        self.kind == RouteKind::Page
    }

    pub fn is_root(&self) -> bool {
        self.declared_path == "/"
    }

    /// Declared path up to its first placeholder, `None` for static routes
    ///
    /// # Examples
    ///
    /// ```
    /// use routegraph_router::{RouteEntry, RouteKind};
    ///
    /// let entry = RouteEntry::new("/course/[id]/lesson/[lessonId]", "page.tsx", RouteKind::Page);
    /// assert_eq!(entry.literal_prefix(), Some("/course"));
    /// ```
    pub fn literal_prefix(&self) -> Option<&str> {
        path::placeholder_prefix(&self.declared_path)
    }

    /// Number of `[placeholder]` segments
    pub fn placeholder_count(&self) -> usize {
        self.declared_path
            .split('/')
            .filter(|s| matches!(classify_segment(s), SegmentKind::Placeholder(_)))
            .count()
    }

    /// Whether the source file sits below a directory with the given name
    ///
    /// Only components below `root` are considered, so the directories a
    /// project happens to be checked out under never count.
    pub fn is_under(&self, root: &Path, dir_name: &str) -> bool {
        self.source_location
            .strip_prefix(root)
            .unwrap_or(&self.source_location)
            .parent()
            .map(|p| p.components().any(|c| c.as_os_str() == dir_name))
            .unwrap_or(false)
    }

    pub fn source_location(&self) -> &Path {
        &self.source_location
    }
}

/// How a candidate path reached a route
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    Direct,
    Dynamic,
    StructuralPrefix,
}

impl MatchKind {
    /// Steps in the order they are tried
    pub const PRECEDENCE: [MatchKind; 3] =
        [MatchKind::Direct, MatchKind::Dynamic, MatchKind::StructuralPrefix];
}

/// Result of matching a candidate path against a table
#[derive(Debug, Clone, Copy)]
pub struct RouteMatch<'a> {
    pub entry: &'a RouteEntry,
    pub kind: MatchKind,
}

/// Compiled matcher state of one entry
#[derive(Debug, Clone)]
enum Pattern {
    Static,
    Dynamic(Regex),
    Malformed(PatternError),
}

#[derive(Debug, Clone)]
struct CompiledRoute {
    entry: RouteEntry,
    pattern: Pattern,
}

impl CompiledRoute {
    fn compile(entry: RouteEntry) -> Self {
        let pattern = if !entry.has_parameters {
            Pattern::Static
        } else {
            match compile_pattern(&entry.declared_path) {
                Ok(re) => Pattern::Dynamic(re),
                Err(e) => {
                    tracing::debug!("Skipping route in dynamic matching: {}", e);
                    Pattern::Malformed(e)
                }
            }
        };

        Self { entry, pattern }
    }

    fn direct(&self, cleaned: &str) -> bool {
        direct_hit(cleaned, &self.entry.declared_path)
    }

    fn dynamic(&self, cleaned: &str) -> bool {
        match &self.pattern {
            Pattern::Dynamic(re) => dynamic_hit(cleaned, re),
            _ => false,
        }
    }

    fn structural(&self, raw: &str) -> bool {
        matches!(self.pattern, Pattern::Dynamic(_))
            && structural_hit(raw, &self.entry.declared_path)
    }

    fn hits(&self, kind: MatchKind, raw: &str, cleaned: &str) -> bool {
        match kind {
            MatchKind::Direct => self.direct(cleaned),
            MatchKind::Dynamic => self.dynamic(cleaned),
            MatchKind::StructuralPrefix => self.structural(raw),
        }
    }

    /// All three steps for this single route, in precedence order
    fn accept(&self, raw: &str, cleaned: &str) -> Option<MatchKind> {
        MatchKind::PRECEDENCE
            .into_iter()
            .find(|kind| self.hits(*kind, raw, cleaned))
    }
}

// ============================================================================
// Route Table
// ============================================================================

/// Ordered route inventory with precompiled dynamic matchers
///
/// Order is significant: among several dynamic routes that accept the same
/// concrete path (`/items/[id]` vs `/items/[slug]`), the first one wins.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    routes: Vec<CompiledRoute>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an entry, compiling its matcher
    pub fn push(&mut self, entry: RouteEntry) {
        self.routes.push(CompiledRoute::compile(entry));
    }

    /// Builder-style variant of [`RouteTable::push`]
    pub fn with_entry(mut self, entry: RouteEntry) -> Self {
        self.push(entry);
        self
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Entries in table order
    pub fn entries(&self) -> impl Iterator<Item = &RouteEntry> + '_ {
        self.routes.iter().map(|r| &r.entry)
    }

    pub fn get(&self, index: usize) -> Option<&RouteEntry> {
        self.routes.get(index).map(|r| &r.entry)
    }

    /// Page-only subset, order preserved
    pub fn pages(&self) -> RouteTable {
        RouteTable {
            routes: self
                .routes
                .iter()
                .filter(|r| r.entry.is_page())
                .cloned()
                .collect(),
        }
    }

    /// Whether some entry declares exactly this path
    pub fn contains_path(&self, declared: &str) -> bool {
        self.routes.iter().any(|r| r.entry.declared_path == declared)
    }

    /// Whether a page is declared at `/`
    pub fn has_root_page(&self) -> bool {
        self.routes
            .iter()
            .any(|r| r.entry.is_page() && r.entry.is_root())
    }

    /// Dynamic entries whose pattern failed to compile, with the reason
    pub fn malformed(&self) -> impl Iterator<Item = (&RouteEntry, &PatternError)> + '_ {
        self.routes.iter().filter_map(|r| match &r.pattern {
            Pattern::Malformed(e) => Some((&r.entry, e)),
            _ => None,
        })
    }

    /// Finds the route a candidate resolves to
    ///
    /// Direct hits take precedence over dynamic hits, which take precedence over
    /// structural-prefix hits. Within a step, table order decides.
    pub fn find_match(&self, candidate: &str) -> Option<RouteMatch<'_>> {
        let cleaned = clean_path(candidate);

        MatchKind::PRECEDENCE.into_iter().find_map(|kind| {
            self.routes
                .iter()
                .find(|r| r.hits(kind, candidate, &cleaned))
                .map(|r| RouteMatch {
                    entry: &r.entry,
                    kind,
                })
        })
    }

    /// Whether a candidate resolves to any route
    pub fn matches(&self, candidate: &str) -> bool {
        self.find_match(candidate).is_some()
    }

    /// Reverse direction: does the entry at `index` accept this candidate?
    pub fn entry_accepts(&self, index: usize, candidate: &str) -> Option<MatchKind> {
        let route = self.routes.get(index)?;
        route.accept(candidate, &clean_path(candidate))
    }
}

impl FromIterator<RouteEntry> for RouteTable {
    fn from_iter<I: IntoIterator<Item = RouteEntry>>(iter: I) -> Self {
        RouteTable {
            routes: iter.into_iter().map(CompiledRoute::compile).collect(),
        }
    }
}

impl Extend<RouteEntry> for RouteTable {
    fn extend<I: IntoIterator<Item = RouteEntry>>(&mut self, iter: I) {
        self.routes.extend(iter.into_iter().map(CompiledRoute::compile));
    }
}

//! Segment and directory-name classification
//!
//! Pure functional parsing of file-system routing conventions into typed values.
//! All functions are **pure**: same input → same output, no side effects.

/// Directory name of the not-found sentinel
///
/// Private by naming convention, but its children are still traversed under the
/// parent's accumulated path.
pub const NOT_FOUND_SENTINEL: &str = "_not-found";

/// What a directory contributes to the route path
///
/// # Examples
///
/// ```
/// use routegraph_router::route::pattern::{classify_directory, DirectoryKind};
///
/// assert_eq!(classify_directory("(marketing)"), DirectoryKind::Group);
/// assert_eq!(classify_directory("_drafts"), DirectoryKind::Private);
/// assert_eq!(classify_directory("_not-found"), DirectoryKind::NotFoundSentinel);
/// assert_eq!(classify_directory("[id]"), DirectoryKind::Dynamic("[id]".to_string()));
/// assert_eq!(classify_directory("about"), DirectoryKind::Static("about".to_string()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectoryKind {
    /// `(name)`: organizes files, transparent to the path
    Group,
    /// `_not-found`: transparent, children traversed under the parent path
    NotFoundSentinel,
    /// `_name`: excluded from the route surface, not traversed
    Private,
    /// `[name]`: placeholder carried verbatim into the declared path
    Dynamic(String),
    /// Any other name, composed literally
    Static(String),
}

impl DirectoryKind {
    /// Path segment this directory adds, if any
    pub fn segment(&self) -> Option<&str> {
        match self {
            DirectoryKind::Dynamic(s) | DirectoryKind::Static(s) => Some(s),
            _ => None,
        }
    }

    /// Whether the walker should descend into this directory
    pub fn is_traversed(&self) -> bool {
        !matches!(self, DirectoryKind::Private)
    }
}

/// Classifies a directory name (pure function)
///
/// # Rules (evaluated in order)
///
/// 1. **Group**: `(name)`
/// 2. **Not-found sentinel**: exactly `_not-found`
/// 3. **Private**: `_name`
/// 4. **Dynamic**: `[name]`
/// 5. **Static**: any other name
pub fn classify_directory(name: &str) -> DirectoryKind {
    if name.len() > 2 && name.starts_with('(') && name.ends_with(')') {
        return DirectoryKind::Group;
    }

    if name == NOT_FOUND_SENTINEL {
        return DirectoryKind::NotFoundSentinel;
    }

    if name.starts_with('_') {
        return DirectoryKind::Private;
    }

    match classify_segment(name) {
        SegmentKind::Placeholder(_) => DirectoryKind::Dynamic(name.to_string()),
        _ => DirectoryKind::Static(name.to_string()),
    }
}

/// Represents the kind of a single declared-path segment
///
/// # Examples
///
/// ```
/// use routegraph_router::route::pattern::{classify_segment, SegmentKind};
///
/// assert_eq!(classify_segment("lesson"), SegmentKind::Static("lesson"));
/// assert_eq!(classify_segment("[lessonId]"), SegmentKind::Placeholder("lessonId"));
/// assert_eq!(classify_segment("[...slug]"), SegmentKind::Placeholder("...slug"));
/// assert_eq!(classify_segment("[id"), SegmentKind::Malformed("[id"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind<'a> {
    /// Literal text
    Static(&'a str),
    /// `[token]`, carrying the token between the brackets
    Placeholder(&'a str),
    /// Stray or unbalanced brackets
    Malformed(&'a str),
}

/// Classifies a declared-path segment (pure function, zero-copy)
pub fn classify_segment(segment: &str) -> SegmentKind<'_> {
    match segment.strip_prefix('[').and_then(|s| s.strip_suffix(']')) {
        Some(inner) if is_placeholder_token(inner) => SegmentKind::Placeholder(inner),
        Some(_) => SegmentKind::Malformed(segment),
        None if segment.contains('[') || segment.contains(']') => SegmentKind::Malformed(segment),
        None => SegmentKind::Static(segment),
    }
}

/// A token is whatever sits between one pair of brackets: non-empty, no nested brackets.
/// `[[...slug]]` is therefore malformed here; optional catch-alls are not part of the convention.
fn is_placeholder_token(inner: &str) -> bool {
    !inner.is_empty() && !inner.contains('[') && !inner.contains(']') && !inner.contains('/')
}

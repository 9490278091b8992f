//! Compilation of declared dynamic routes into anchored matchers
//!
//! Each `[token]` becomes a single-segment wildcard; literal segments are escaped.
//! The per-step predicates at the bottom are shared by forward validation
//! (`RouteTable::find_match`) and reverse usage detection (`RouteTable::entry_accepts`).

use std::fmt;

use regex::Regex;

use super::pattern::{classify_segment, SegmentKind};
use crate::path::{has_interpolation, interpolation_prefix, placeholder_prefix};

/// Matches exactly one path segment
const SEGMENT_WILDCARD: &str = "[^/]+";

/// Error raised when a declared route cannot be compiled into a matcher
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternError {
    /// The declared path that failed
    pub pattern: String,
    /// Human-readable reason
    pub reason: String,
}

impl fmt::Display for PatternError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "malformed route pattern '{}': {}", self.pattern, self.reason)
    }
}

impl std::error::Error for PatternError {}

/// Compiles a declared route into an anchored regex
///
/// # Examples
///
/// ```
/// use routegraph_router::route::matcher::compile_pattern;
///
/// let re = compile_pattern("/course/[id]/lesson/[lessonId]").unwrap();
/// assert!(re.is_match("/course/abc123/lesson/xyz"));
/// assert!(!re.is_match("/course/abc123/lessons"));
///
/// assert!(compile_pattern("/docs/[[...slug]]").is_err());
/// ```
pub fn compile_pattern(declared: &str) -> Result<Regex, PatternError> {
    let mut source = String::from("^");

    for segment in declared.split('/').filter(|s| !s.is_empty()) {
        source.push('/');
        match classify_segment(segment) {
            SegmentKind::Static(literal) => source.push_str(&regex::escape(literal)),
            SegmentKind::Placeholder(_) => source.push_str(SEGMENT_WILDCARD),
            SegmentKind::Malformed(bad) => {
                return Err(PatternError {
                    pattern: declared.to_string(),
                    reason: format!("unbalanced placeholder segment '{}'", bad),
                })
            }
        }
    }

    if source.len() == 1 {
        source.push('/');
    }
    source.push('$');

    Regex::new(&source).map_err(|e| PatternError {
        pattern: declared.to_string(),
        reason: e.to_string(),
    })
}

/// Exact equality with the declared path
pub(crate) fn direct_hit(cleaned: &str, declared: &str) -> bool {
    cleaned == declared
}

/// Anchored wildcard match against a compiled dynamic route
pub(crate) fn dynamic_hit(cleaned: &str, matcher: &Regex) -> bool {
    matcher.is_match(cleaned)
}

/// Structural match for references that still carry an open interpolation
///
/// The reference's literal prefix must equal the declared route's prefix up to
/// its first placeholder. Static routes never match structurally.
pub(crate) fn structural_hit(raw: &str, declared: &str) -> bool {
    if !has_interpolation(raw) {
        return false;
    }

    match (interpolation_prefix(raw), placeholder_prefix(declared)) {
        (Some(reference), Some(route)) => reference == route,
        _ => false,
    }
}

//! Route module for file-system routing conventions
//!
//! Contains pure functional components for directory classification and matching:
//! - `pattern`: directory names and declared-path segments → typed kinds
//! - `matcher`: declared dynamic routes → anchored matchers

pub mod matcher;
pub mod pattern;

// Re-export commonly used types
pub use matcher::{compile_pattern, PatternError};
pub use pattern::{classify_directory, classify_segment, DirectoryKind, SegmentKind};

/// Integration tests for directory-name conventions
///
/// Each test documents the equivalent Next.js App Router layout for reference.

use routegraph_router::route::pattern::{classify_segment, SegmentKind};
use routegraph_router::{classify_directory, DirectoryKind};
use rstest::rstest;

// ============================================================================
// Directory-Name Conventions (Next.js App Router Parity)
// ============================================================================

#[rstest]
#[case("about", DirectoryKind::Static("about".to_string()))]
#[case("[slug]", DirectoryKind::Dynamic("[slug]".to_string()))]
#[case("(auth)", DirectoryKind::Group)]
#[case("_lib", DirectoryKind::Private)]
#[case("_not-found", DirectoryKind::NotFoundSentinel)]
fn test_directory_kinds(#[case] name: &str, #[case] expected: DirectoryKind) {
    assert_eq!(classify_directory(name), expected);
}

#[test]
fn test_catch_all_token_is_a_single_placeholder() {
    // Next.js: app/docs/[...slug] — carried verbatim, matched as one segment
    assert_eq!(classify_segment("[...slug]"), SegmentKind::Placeholder("...slug"));
}

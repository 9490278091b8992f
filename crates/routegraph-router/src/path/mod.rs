//! Path utilities for declared routes and extracted references
//!
//! All functions are **pure**: given same input, always produce same output with no side effects.
//!
//! References pulled out of source code are raw strings, often template literals such as
//! `` `/courses/${id}?tab=${tab}` ``. The helpers here are interpolation-aware: a `?`, `#`
//! or `/` inside `${...}` never counts as path syntax.

use std::borrow::Cow;

/// Opening marker of a template-string interpolation
pub const INTERPOLATION_OPEN: &str = "${";

/// Cuts a raw reference at the first query (`?`) or fragment (`#`) delimiter
///
/// Delimiters nested inside `${...}` are ignored, so
/// `` /search/${q ? q : 'all'} `` survives untouched. Zero-copy: returns a slice of the input.
///
/// # Examples
///
/// ```
/// use routegraph_router::path::strip_query_and_fragment;
///
/// assert_eq!(strip_query_and_fragment("/courses?page=2"), "/courses");
/// assert_eq!(strip_query_and_fragment("/docs#install"), "/docs");
/// assert_eq!(strip_query_and_fragment("#top"), "");
/// assert_eq!(strip_query_and_fragment("/u/${a ? b : c}"), "/u/${a ? b : c}");
/// ```
pub fn strip_query_and_fragment(raw: &str) -> &str {
    let bytes = raw.as_bytes();
    let mut depth = 0usize;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'$' if bytes.get(i + 1) == Some(&b'{') => {
                depth += 1;
                i += 2;
                continue;
            }
            b'{' if depth > 0 => depth += 1,
            b'}' if depth > 0 => depth -= 1,
            b'?' | b'#' if depth == 0 => return &raw[..i],
            _ => {}
        }
        i += 1;
    }

    raw
}

/// Normalizes a candidate path for matching
///
/// Returns `Cow::Borrowed` when nothing had to change.
///
/// 1. Strip query and fragment
/// 2. Collapse empty to root `/`
/// 3. Strip one trailing slash (root exempted)
///
/// # Examples
///
/// ```
/// use routegraph_router::path::clean_path;
///
/// assert_eq!(clean_path("/about/"), "/about");
/// assert_eq!(clean_path("/about?x=1"), "/about");
/// assert_eq!(clean_path("?x=1"), "/");
/// assert_eq!(clean_path("/"), "/");
/// ```
pub fn clean_path(raw: &str) -> Cow<'_, str> {
    let stripped = strip_query_and_fragment(raw);

    if stripped.is_empty() {
        return Cow::Owned("/".to_string());
    }

    match stripped.strip_suffix('/') {
        Some(rest) if !rest.is_empty() => Cow::Borrowed(rest),
        _ => Cow::Borrowed(stripped),
    }
}

/// Returns true when the raw reference still carries a `${` interpolation
pub fn has_interpolation(raw: &str) -> bool {
    raw.contains(INTERPOLATION_OPEN)
}

/// Literal prefix of a reference up to its first interpolation, trailing slash stripped
///
/// Returns `None` when the reference has no interpolation.
///
/// # Examples
///
/// ```
/// use routegraph_router::path::interpolation_prefix;
///
/// assert_eq!(interpolation_prefix("/courses/${id}"), Some("/courses"));
/// assert_eq!(interpolation_prefix("/user-${id}"), Some("/user-"));
/// assert_eq!(interpolation_prefix("/courses"), None);
/// ```
pub fn interpolation_prefix(raw: &str) -> Option<&str> {
    raw.find(INTERPOLATION_OPEN)
        .map(|idx| strip_one_trailing_slash(&raw[..idx]))
}

/// Literal prefix of a declared route up to its first `[placeholder]`, trailing slash stripped
///
/// Returns `None` for static routes.
///
/// # Examples
///
/// ```
/// use routegraph_router::path::placeholder_prefix;
///
/// assert_eq!(placeholder_prefix("/course/[id]/lesson/[lessonId]"), Some("/course"));
/// assert_eq!(placeholder_prefix("/[slug]"), Some(""));
/// assert_eq!(placeholder_prefix("/about"), None);
/// ```
pub fn placeholder_prefix(declared: &str) -> Option<&str> {
    declared
        .find('[')
        .map(|idx| strip_one_trailing_slash(&declared[..idx]))
}

/// Replaces every `${...}` interpolation with `*`
///
/// Braces are balanced, so object literals inside the interpolation do not end it early.
/// An unterminated interpolation swallows the rest of the string.
///
/// # Examples
///
/// ```
/// use routegraph_router::path::wildcard_form;
///
/// assert_eq!(wildcard_form("/courses/${id}"), "/courses/*");
/// assert_eq!(wildcard_form("/a/${x}/b/${fn({ y })}"), "/a/*/b/*");
/// assert_eq!(wildcard_form("/plain"), "/plain");
/// ```
pub fn wildcard_form(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;

    while let Some(start) = rest.find(INTERPOLATION_OPEN) {
        out.push_str(&rest[..start]);
        out.push('*');

        let body = &rest[start + INTERPOLATION_OPEN.len()..];
        let mut depth = 1usize;
        let close = body.char_indices().find_map(|(i, c)| {
            match c {
                '{' => depth += 1,
                '}' => {
                    depth -= 1;
                    if depth == 0 {
                        return Some(i);
                    }
                }
                _ => {}
            }
            None
        });

        match close {
            Some(i) => rest = &body[i + 1..],
            None => return out,
        }
    }

    out.push_str(rest);
    out
}

fn strip_one_trailing_slash(s: &str) -> &str {
    s.strip_suffix('/').unwrap_or(s)
}

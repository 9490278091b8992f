//! The four extraction grammars
//!
//! Regexes are compiled once per scanner from configuration. Matching allocates
//! a fresh iterator per file and grammar, so one `Grammars` value can be shared
//! across rayon workers.

use std::path::Path;

use regex::Regex;

use crate::config::ScannerConfig;
use crate::error::Result;
use crate::reference::{ExtractionKind, RouteReference};

// Quoted value alternatives. Exactly one group participates per match.
const DOUBLE_QUOTED: &str = r#""([^"]*)""#;
const SINGLE_QUOTED: &str = r"'([^']*)'";
const BACKTICK: &str = r"`([^`]*)`";

/// Compiled grammars, in extraction order
#[derive(Debug, Clone)]
pub struct Grammars {
    grammars: Vec<(ExtractionKind, Regex)>,
}

impl Grammars {
    /// Compiles the grammars a configuration enables
    ///
    /// An empty word list disables the grammar that depends on it rather than
    /// widening it to match any element, key or call.
    pub fn new(config: &ScannerConfig) -> Result<Self> {
        let candidates = [
            (ExtractionKind::Link, link_grammar(&config.link_elements)?),
            (
                ExtractionKind::Navigation,
                navigation_grammar(
                    &config.navigation_handle,
                    &config.navigation_verbs,
                    &config.navigation_functions,
                )?,
            ),
            (
                ExtractionKind::Template,
                template_grammar(&config.navigation_verbs, &config.navigation_functions)?,
            ),
            (ExtractionKind::Property, property_grammar(&config.link_keys)?),
        ];

        let grammars = candidates
            .into_iter()
            .filter_map(|(kind, regex)| regex.map(|r| (kind, r)))
            .collect();

        Ok(Self { grammars })
    }

    pub fn iter(&self) -> impl Iterator<Item = &(ExtractionKind, Regex)> + '_ {
        self.grammars.iter()
    }
}

/// Escaped `a|b|c`, `None` for an empty list
fn alternation(words: &[String]) -> Option<String> {
    if words.is_empty() {
        return None;
    }
    Some(
        words
            .iter()
            .map(|w| regex::escape(w))
            .collect::<Vec<_>>()
            .join("|"),
    )
}

fn quoted_argument() -> String {
    format!("(?:{}|{}|{})", DOUBLE_QUOTED, SINGLE_QUOTED, BACKTICK)
}

/// `<Link ... href="/x">`, `href='/x'`, `href={"/x"}`, `href={'/x'}`, `` href={`/x/${id}`} ``
fn link_grammar(elements: &[String]) -> Result<Option<Regex>> {
    let Some(elements) = alternation(elements) else {
        return Ok(None);
    };
    let source = format!(
        r#"<(?:{elements})\b[^>]*?\bhref\s*=\s*(?:{dq}|{sq}|\{{\s*{dq}\s*\}}|\{{\s*{sq}\s*\}}|\{{\s*{bt}\s*\}})"#,
        dq = DOUBLE_QUOTED,
        sq = SINGLE_QUOTED,
        bt = BACKTICK,
    );
    Ok(Some(Regex::new(&source)?))
}

/// `router.push("/x")`, `router.replace('/x')`, `` router.prefetch(`/x/${id}`) ``,
/// and free calls such as `redirect('/login')` or `navigate("/x")`
fn navigation_grammar(
    handle: &str,
    verbs: &[String],
    functions: &[String],
) -> Result<Option<Regex>> {
    let methods = alternation(verbs)
        .filter(|_| !handle.is_empty())
        .map(|verbs| format!(r"\b{}\s*\.\s*(?:{})", regex::escape(handle), verbs));
    let free = alternation(functions).map(|functions| format!(r"\b(?:{})", functions));

    let callee = match (methods, free) {
        (None, None) => return Ok(None),
        (Some(m), None) => m,
        (None, Some(f)) => f,
        (Some(m), Some(f)) => format!("(?:{}|{})", m, f),
    };
    let source = format!(r"{}\s*\(\s*{}", callee, quoted_argument());
    Ok(Some(Regex::new(&source)?))
}

/// Template strings starting with `/` that carry at least one interpolation,
/// after `=`, `:`, `={` or a navigation call's opening parenthesis
fn template_grammar(verbs: &[String], functions: &[String]) -> Result<Option<Regex>> {
    let calls: Vec<String> = verbs.iter().chain(functions).cloned().collect();
    let opener = match alternation(&calls) {
        Some(calls) => format!(r"(?:[=:]\s*\{{?\s*|\b(?:{calls})\s*\(\s*)"),
        None => r"[=:]\s*\{?\s*".to_string(),
    };
    let source = format!(r"{opener}`(/[^`]*\$\{{[^`]*)`");
    Ok(Some(Regex::new(&source)?))
}

/// `{ href: "/x" }`, `{ href: '/x' }`
fn property_grammar(keys: &[String]) -> Result<Option<Regex>> {
    let Some(keys) = alternation(keys) else {
        return Ok(None);
    };
    let source = format!(r#"\b(?:{keys})\s*:\s*(?:"(/[^"]*)"|'(/[^']*)')"#);
    Ok(Some(Regex::new(&source)?))
}

/// Byte offsets of every newline, for offset → line lookups
struct LineIndex<'a> {
    content: &'a str,
    newlines: Vec<usize>,
}

impl<'a> LineIndex<'a> {
    fn new(content: &'a str) -> Self {
        let newlines = content
            .bytes()
            .enumerate()
            .filter_map(|(i, b)| (b == b'\n').then_some(i))
            .collect();
        Self { content, newlines }
    }

    /// 1-based line number: newlines preceding the offset, plus one
    fn line_of(&self, offset: usize) -> usize {
        self.newlines.partition_point(|&nl| nl < offset) + 1
    }

    /// Trimmed text of a 1-based line
    fn text_of(&self, line: usize) -> &'a str {
        let start = match line {
            0 | 1 => 0,
            n => self.newlines[n - 2] + 1,
        };
        let end = self
            .newlines
            .get(line - 1)
            .copied()
            .unwrap_or(self.content.len());
        self.content[start..end].trim()
    }
}

/// Runs every grammar over one file's content
///
/// Pure function of its inputs. A file may yield several references for the
/// same text when more than one grammar matches it.
pub fn extract_references(content: &str, file: &Path, grammars: &Grammars) -> Vec<RouteReference> {
    let lines = LineIndex::new(content);
    let mut references = Vec::new();

    for (kind, regex) in grammars.iter() {
        for caps in regex.captures_iter(content) {
            let (Some(whole), Some(value)) = (caps.get(0), caps.iter().skip(1).flatten().next())
            else {
                continue;
            };

            let line = lines.line_of(whole.start());
            references.push(RouteReference::new(
                value.as_str(),
                *kind,
                file,
                line,
                lines.text_of(line),
            ));
        }
    }

    references
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn extract(content: &str) -> Vec<RouteReference> {
        let grammars = Grammars::new(&ScannerConfig::default()).unwrap();
        extract_references(content, Path::new("src/app/page.tsx"), &grammars)
    }

    fn found(content: &str) -> Vec<(ExtractionKind, String)> {
        extract(content)
            .into_iter()
            .map(|r| (r.extraction_kind, r.raw_path))
            .collect()
    }

    #[test]
    fn test_link_plain_quoted() {
        let refs = extract(r#"<Link href="/courses">Courses</Link>"#);
        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].normalized_path, "/courses");
        assert_eq!(refs[0].extraction_kind, ExtractionKind::Link);
        assert!(!refs[0].is_dynamic);
    }

    #[test]
    fn test_link_braced_forms() {
        assert_eq!(
            found(r#"<Link className="x" href={"/a"}>"#),
            vec![(ExtractionKind::Link, "/a".to_string())]
        );
        assert_eq!(
            found("<a href={ '/b' }>"),
            vec![(ExtractionKind::Link, "/b".to_string())]
        );
    }

    #[test]
    fn test_link_template_also_matches_template_grammar() {
        assert_eq!(
            found("<Link href={`/courses/${id}`}>"),
            vec![
                (ExtractionKind::Link, "/courses/${id}".to_string()),
                (ExtractionKind::Template, "/courses/${id}".to_string()),
            ]
        );
    }

    #[test]
    fn test_link_attribute_spanning_lines() {
        let refs = extract("<Link\n  prefetch={false}\n  href=\"/docs\"\n>");
        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].source_line, 1);
        assert_eq!(refs[0].surrounding_text, "<Link");
    }

    #[test]
    fn test_navigation_verbs() {
        let content = r#"
            router.push("/home");
            router.replace('/login');
            router.prefetch(`/about`);
            router.back();
        "#;
        assert_eq!(
            found(content),
            vec![
                (ExtractionKind::Navigation, "/home".to_string()),
                (ExtractionKind::Navigation, "/login".to_string()),
                (ExtractionKind::Navigation, "/about".to_string()),
            ]
        );
    }

    #[test]
    fn test_free_navigation_calls() {
        let content = r#"
            redirect('/login');
            permanentRedirect("/moved");
            const navigate = useNavigate();
            navigate("/x");
            useRedirect('/nope');
        "#;
        assert_eq!(
            found(content),
            vec![
                (ExtractionKind::Navigation, "/login".to_string()),
                (ExtractionKind::Navigation, "/moved".to_string()),
                (ExtractionKind::Navigation, "/x".to_string()),
            ]
        );
    }

    #[test]
    fn test_other_handle_ignored() {
        assert!(found(r#"history.push("/home")"#).is_empty());
    }

    #[test]
    fn test_interpolated_navigation() {
        let refs = extract("router.push(`/courses/${id}`)");
        assert_eq!(refs.len(), 2);
        let template = refs
            .iter()
            .find(|r| r.extraction_kind == ExtractionKind::Template)
            .unwrap();
        assert!(template.is_dynamic);
        assert_eq!(template.dynamic_normalized_path.as_deref(), Some("/courses/*"));
    }

    #[test]
    fn test_template_assignment_and_redirect() {
        let content = "const url = `/u/${user.id}/edit`;\nredirect(`/orgs/${org}`);";
        assert_eq!(
            found(content),
            vec![
                (ExtractionKind::Navigation, "/orgs/${org}".to_string()),
                (ExtractionKind::Template, "/u/${user.id}/edit".to_string()),
                (ExtractionKind::Template, "/orgs/${org}".to_string()),
            ]
        );
    }

    #[test]
    fn test_template_without_interpolation_not_template_grammar() {
        assert!(found("const a = `/static`;").is_empty());
    }

    #[test]
    fn test_template_must_start_with_slash() {
        assert!(found("const a = `${base}/x`;").is_empty());
    }

    #[test]
    fn test_property_literal() {
        let content = "const nav = [{ label: 'Home', href: '/' }, { href: \"/pricing\" }, { href: 'https://x.io' }];";
        assert_eq!(
            found(content),
            vec![
                (ExtractionKind::Property, "/".to_string()),
                (ExtractionKind::Property, "/pricing".to_string()),
            ]
        );
    }

    #[test]
    fn test_line_numbers_and_context() {
        let content = "import Link from 'next/link';\n\nexport default function Nav() {\n  return <Link href=\"/about\">About</Link>;\n}\n";
        let refs = extract(content);
        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].source_line, 4);
        assert_eq!(refs[0].surrounding_text, "return <Link href=\"/about\">About</Link>;");
    }

    #[test]
    fn test_line_index_last_line_without_newline() {
        let index = LineIndex::new("a\nb\n  c  ");
        assert_eq!(index.line_of(0), 1);
        assert_eq!(index.line_of(2), 2);
        assert_eq!(index.line_of(6), 3);
        assert_eq!(index.text_of(3), "c");
    }

    #[test]
    fn test_custom_handle_and_keys() {
        let config = ScannerConfig {
            navigation_handle: "nav".to_string(),
            navigation_verbs: vec!["go".to_string()],
            link_keys: vec!["to".to_string()],
            ..ScannerConfig::default()
        };
        let grammars = Grammars::new(&config).unwrap();
        let content = "nav.go('/x'); const r = { to: '/y' };";
        let refs = extract_references(content, Path::new("a.ts"), &grammars);
        let raw: Vec<&str> = refs.iter().map(|r| r.raw_path.as_str()).collect();
        assert_eq!(raw, vec!["/x", "/y"]);
    }

    #[test]
    fn test_empty_lists_disable_grammars() {
        let config = ScannerConfig {
            navigation_verbs: Vec::new(),
            navigation_functions: Vec::new(),
            link_elements: Vec::new(),
            link_keys: Vec::new(),
            ..ScannerConfig::default()
        };
        let grammars = Grammars::new(&config).unwrap();
        let kinds: Vec<ExtractionKind> = grammars.iter().map(|(kind, _)| *kind).collect();
        assert_eq!(kinds, vec![ExtractionKind::Template]);

        let content = r#"<div href="/x"> router.anything('/y') f('/z') { anyKey: '/w' }"#;
        assert!(extract_references(content, Path::new("a.ts"), &grammars).is_empty());

        let content = "const u = `/u/${id}`; go(`/v/${id}`);";
        let refs = extract_references(content, Path::new("a.ts"), &grammars);
        let raw: Vec<&str> = refs.iter().map(|r| r.raw_path.as_str()).collect();
        assert_eq!(raw, vec!["/u/${id}"]);
    }

    #[test]
    fn test_free_functions_without_method_verbs() {
        let config = ScannerConfig {
            navigation_verbs: Vec::new(),
            ..ScannerConfig::default()
        };
        let grammars = Grammars::new(&config).unwrap();
        let content = "router.push('/a'); redirect('/b');";
        let refs = extract_references(content, Path::new("a.ts"), &grammars);
        let raw: Vec<&str> = refs.iter().map(|r| r.raw_path.as_str()).collect();
        assert_eq!(raw, vec!["/b"]);
    }
}

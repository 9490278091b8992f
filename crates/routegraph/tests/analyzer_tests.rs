//! End-to-end tests for the analyzer pipeline
//!
//! Each test builds a small project tree in a temp directory:
//! - `src/app/...` routing root with page and layout files
//! - `src/components/...` sources holding route references

use std::fs;
use std::path::Path;

use chrono::{TimeZone, Utc};
use pretty_assertions::assert_eq;
use routegraph::{Analyzer, Config, IssueKind, Report};
use tempfile::TempDir;

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn config_for(root: &Path) -> Config {
    let mut config = Config::default();
    config.roots.app_dir = root.join("src/app");
    config.roots.source_dir = root.join("src");
    config.report.output = root.join("reports/route-report.json");
    config
}

fn run(root: &Path) -> Report {
    let at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    Analyzer::new(config_for(root)).run_at(at).unwrap()
}

fn project() -> TempDir {
    let dir = TempDir::new().unwrap();
    populate(dir.path());
    dir
}

fn populate(root: &Path) {

    write(root, "src/app/layout.tsx", "export default function RootLayout() {}");
    write(root, "src/app/page.tsx", "export default function Home() {}");
    write(root, "src/app/(marketing)/pricing/page.tsx", "export default function Pricing() {}");
    write(
        root,
        "src/app/course/[id]/lesson/[lessonId]/page.tsx",
        "export default function Lesson() {}",
    );
    write(root, "src/app/legal/terms/page.tsx", "export default function Terms() {}");
    write(root, "src/app/search/page.tsx", "export default function Search() {}");
    write(root, "src/app/_drafts/page.tsx", "export default function Draft() {}");
    write(root, "src/app/not-found/page.tsx", "export default function NotFound() {}");

    write(
        root,
        "src/components/Nav.tsx",
        r##"import Link from 'next/link';

export function Nav() {
  return (
    <nav>
      <Link href="/">Home</Link>
      <Link href="/pricing?plan=pro">Pricing</Link>
      <Link href="/blog">Blog</Link>
      <a href="https://github.com/acme">GitHub</a>
      <a href="#main">Skip</a>
    </nav>
  );
}
"##,
    );
    write(
        root,
        "src/components/Lesson.tsx",
        r#"export function open(router, c, l, q) {
  router.prefetch('/search');
  router.push(`/course/${c.id}/lesson/${l.id}`);
  router.replace(`/search/${encodeURIComponent(q)}`);
}
"#,
    );
    write(root, "src/lib/math.ts", "export const add = (a, b) => a + b;");
}

#[test]
fn test_full_run() {
    let dir = project();
    let report = run(dir.path());
    let s = &report.summary;

    // root layout + 6 pages, drafts pruned
    assert_eq!(s.total_app_routes, 7);
    assert_eq!(s.total_page_routes, 6);

    let broken: Vec<&str> = report.broken_routes.iter().map(|b| b.path.as_str()).collect();
    assert_eq!(broken, vec!["/blog"]);

    assert_eq!(s.external_routes, 1);
    assert_eq!(s.special_routes, 1);
    assert_eq!(s.dynamic_routes, 2);
    // "/", "/pricing", "/search", course lesson, plus the DynamicValid search template
    assert_eq!(s.valid_routes, 5);

    let unused: Vec<&str> = report.unused_routes.iter().map(|u| u.path.as_str()).collect();
    assert_eq!(unused, vec!["/legal/terms"]);
    assert!(report.errors.is_empty());
}

#[test]
fn test_checkout_below_excluded_directory_name() {
    let dir = TempDir::new().unwrap();
    let root = dir.path().join("error/not-found/shop");
    populate(&root);

    let report = run(&root);
    let unused: Vec<&str> = report.unused_routes.iter().map(|u| u.path.as_str()).collect();
    assert_eq!(unused, vec!["/legal/terms"]);
    assert_eq!(report.summary.unused_routes, 1);
}

#[test]
fn test_dynamic_valid_does_not_mark_base_used() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "src/app/search/page.tsx", "export default function Search() {}");
    write(dir.path(), "src/lib/go.ts", "router.push(`/search/${q}`);");

    let report = run(dir.path());
    assert_eq!(report.summary.valid_routes, 1);
    assert_eq!(report.unused_routes[0].path, "/search");
}

#[test]
fn test_broken_usage_sites() {
    let dir = project();
    let report = run(dir.path());

    let blog = &report.broken_routes[0];
    assert_eq!(blog.usages.len(), 1);
    assert_eq!(blog.usages[0].line, 8);
    assert!(blog.usages[0].file.ends_with("Nav.tsx"));
    assert_eq!(blog.usages[0].context, r#"<Link href="/blog">Blog</Link>"#);
}

#[test]
fn test_idempotent_apart_from_timestamp() {
    let dir = project();
    let analyzer = Analyzer::new(config_for(dir.path()));

    let first = analyzer.run().unwrap();
    let mut second = analyzer.run().unwrap();
    second.generated_at = first.generated_at.clone();

    assert_eq!(first, second);
}

#[test]
fn test_unused_disappears_once_referenced() {
    let dir = project();
    assert_eq!(run(dir.path()).summary.unused_routes, 1);

    write(
        dir.path(),
        "src/components/Footer.tsx",
        "const links = [{ label: 'Terms', href: '/legal/terms' }];",
    );
    let report = run(dir.path());
    assert!(report.unused_routes.is_empty());

    fs::remove_file(dir.path().join("src/components/Footer.tsx")).unwrap();
    assert_eq!(run(dir.path()).summary.unused_routes, 1);
}

#[test]
fn test_unreadable_file_is_recorded_not_fatal() {
    let dir = project();
    let path = dir.path().join("src/components/Broken.tsx");
    fs::write(&path, [b'h', b'r', b'e', b'f', 0xff, 0xfe, 0xfd]).unwrap();

    let report = run(dir.path());
    assert_eq!(report.errors.len(), 1);
    assert_eq!(report.errors[0].kind, IssueKind::UnreadableFile);
    assert_eq!(report.broken_routes.len(), 1);
}

#[test]
fn test_missing_roots_yield_empty_report() {
    let dir = TempDir::new().unwrap();
    let report = run(dir.path());

    assert_eq!(report.summary.total_app_routes, 0);
    assert_eq!(report.summary.total_used_routes, 0);
    assert_eq!(report.errors.len(), 2);
    assert!(report.errors.iter().all(|e| e.kind == IssueKind::MissingRoot));
}

#[test]
fn test_missing_root_strict_fails() {
    let dir = TempDir::new().unwrap();
    let mut config = config_for(dir.path());
    config.roots.strict = true;

    assert!(Analyzer::new(config).run().is_err());
}

#[test]
fn test_no_references_means_every_page_unused() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "src/app/page.tsx", "export default function Home() {}");
    write(dir.path(), "src/app/about/page.tsx", "export default function About() {}");

    let report = run(dir.path());
    assert_eq!(report.summary.total_used_routes, 0);
    assert_eq!(report.summary.unused_routes, 2);
}

#[test]
fn test_write_report_json_keys() {
    let dir = project();
    let analyzer = Analyzer::new(config_for(dir.path()));
    let report = analyzer.run().unwrap();

    let written = analyzer.write_report(&report).unwrap();
    assert_eq!(written, dir.path().join("reports/route-report.json"));

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&written).unwrap()).unwrap();
    for key in [
        "generatedAt",
        "summary",
        "brokenRoutes",
        "unusedRoutes",
        "dynamicRoutes",
        "allAppRoutes",
        "allUsedRoutes",
        "errors",
    ] {
        assert!(json.get(key).is_some(), "missing key {key}");
    }
    for key in [
        "totalAppRoutes",
        "totalPageRoutes",
        "totalUsedRoutes",
        "validRoutes",
        "brokenRoutes",
        "unusedRoutes",
        "externalRoutes",
        "dynamicRoutes",
        "specialRoutes",
    ] {
        assert!(json["summary"].get(key).is_some(), "missing summary key {key}");
    }
}

#[test]
fn test_scanned_tree_is_not_modified() {
    let dir = project();
    let before = fs::read_to_string(dir.path().join("src/components/Nav.tsx")).unwrap();

    let analyzer = Analyzer::new(config_for(dir.path()));
    let report = analyzer.run().unwrap();
    analyzer.write_report(&report).unwrap();

    let after = fs::read_to_string(dir.path().join("src/components/Nav.tsx")).unwrap();
    assert_eq!(before, after);
}

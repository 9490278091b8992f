// File: src/summary.rs
// Purpose: Console summary of a report, with capped broken and unused listings

use colored::Colorize;
use routegraph::config::ReportConfig;
use routegraph::report::{BrokenRoute, UnusedRoute};
use routegraph::Report;

/// Renders the summary block followed by the capped listings
pub fn render(report: &Report, config: &ReportConfig) -> String {
    let mut lines = summary_block(report);

    if !report.broken_routes.is_empty() {
        lines.push(String::new());
        lines.push("Broken routes:".red().bold().to_string());
        lines.extend(broken_listing(&report.broken_routes, config));
    }

    if !report.unused_routes.is_empty() {
        lines.push(String::new());
        lines.push("Unused routes:".yellow().bold().to_string());
        lines.extend(unused_listing(&report.unused_routes, config.max_listed));
    }

    if report.broken_routes.is_empty() && report.unused_routes.is_empty() {
        lines.push(String::new());
        lines.push("No broken or unused routes.".green().bold().to_string());
    }

    lines.push(String::new());
    lines.join("\n")
}

fn summary_block(report: &Report) -> Vec<String> {
    let s = &report.summary;
    let row = |label: &str, count: usize| format!("  {:<16}{}", label, count);

    vec![
        "Summary".bold().to_string(),
        row("Routes:", s.total_app_routes),
        row("Pages:", s.total_page_routes),
        row("Used paths:", s.total_used_routes),
        row("Valid:", s.valid_routes).green().to_string(),
        row("Broken:", s.broken_routes).red().to_string(),
        row("Unused:", s.unused_routes).yellow().to_string(),
        row("External:", s.external_routes),
        row("Dynamic:", s.dynamic_routes).cyan().to_string(),
        row("Special:", s.special_routes),
        row("Errors:", report.errors.len()),
    ]
}

fn broken_listing(broken: &[BrokenRoute], config: &ReportConfig) -> Vec<String> {
    let mut lines = Vec::new();

    for route in broken.iter().take(config.max_listed) {
        lines.push(format!("  {} {}", "✗".red(), route.path));

        for usage in route.usages.iter().take(config.max_sites) {
            lines.push(format!("      {}:{} ({:?})", usage.file, usage.line, usage.kind));
        }
        if route.usages.len() > config.max_sites {
            lines.push(format!(
                "      ... {} more occurrences",
                route.usages.len() - config.max_sites
            ));
        }
    }

    if broken.len() > config.max_listed {
        lines.push(format!("  ... and {} more", broken.len() - config.max_listed));
    }

    lines
}

fn unused_listing(unused: &[UnusedRoute], max_listed: usize) -> Vec<String> {
    let mut lines: Vec<String> = unused
        .iter()
        .take(max_listed)
        .map(|route| format!("  {} {} ({})", "○".yellow(), route.path, route.file))
        .collect();

    if unused.len() > max_listed {
        lines.push(format!("  ... and {} more", unused.len() - max_listed));
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use routegraph::report::{Summary, Usage};
    use routegraph::ExtractionKind;

    fn usage(line: usize) -> Usage {
        Usage {
            file: "src/nav.tsx".to_string(),
            kind: ExtractionKind::Link,
            line,
            context: String::new(),
        }
    }

    fn broken(path: &str, sites: usize) -> BrokenRoute {
        BrokenRoute {
            path: path.to_string(),
            clean_path: None,
            is_dynamic: false,
            usages: (1..=sites).map(usage).collect(),
            issue: "Route not found in app directory".to_string(),
        }
    }

    fn report(broken_routes: Vec<BrokenRoute>, unused: usize) -> Report {
        Report {
            generated_at: "2024-05-01T12:00:00.000Z".to_string(),
            summary: Summary::default(),
            broken_routes,
            unused_routes: (0..unused)
                .map(|i| UnusedRoute {
                    path: format!("/p{i}"),
                    file: format!("app/p{i}/page.tsx"),
                    has_params: false,
                    issue: "Page exists but no references found".to_string(),
                })
                .collect(),
            dynamic_routes: Vec::new(),
            all_app_routes: Vec::new(),
            all_used_routes: Vec::new(),
            errors: Vec::new(),
        }
    }

    fn config(max_listed: usize) -> ReportConfig {
        ReportConfig {
            max_listed,
            ..ReportConfig::default()
        }
    }

    #[test]
    fn test_broken_sites_capped_with_overflow() {
        colored::control::set_override(false);

        let lines = broken_listing(&[broken("/gone", 5)], &config(20));
        assert_eq!(
            lines,
            vec![
                "  ✗ /gone",
                "      src/nav.tsx:1 (Link)",
                "      src/nav.tsx:2 (Link)",
                "      ... 3 more occurrences",
            ]
        );
    }

    #[test]
    fn test_broken_listing_remainder() {
        colored::control::set_override(false);

        let routes: Vec<BrokenRoute> = (0..4).map(|i| broken(&format!("/b{i}"), 1)).collect();
        let lines = broken_listing(&routes, &config(2));
        assert_eq!(lines.last().unwrap(), "  ... and 2 more");
        assert_eq!(lines.len(), 5);
    }

    #[test]
    fn test_unused_listing_remainder() {
        colored::control::set_override(false);

        let rendered = render(&report(Vec::new(), 3), &config(1));
        assert!(rendered.contains("  ○ /p0 (app/p0/page.tsx)"));
        assert!(!rendered.contains("/p1"));
        assert!(rendered.contains("  ... and 2 more"));
    }

    #[test]
    fn test_clean_run() {
        colored::control::set_override(false);

        let rendered = render(&report(Vec::new(), 0), &config(20));
        assert!(rendered.starts_with("Summary\n"));
        assert!(rendered.contains("  Errors:         0"));
        assert!(rendered.contains("No broken or unused routes."));
    }
}

// routegraph - Route Graph Extraction & Validation
// Cross-checks the routes a directory-based routing root declares against the
// routes source code refers to

pub mod classify;
pub mod collector;
pub mod config;
pub mod error;
pub mod reference;
pub mod report;
pub mod scanner;

mod walk;

use std::path::PathBuf;

use chrono::{DateTime, Utc};

pub use classify::{classify, unused_routes, Classification, ClassifiedGroup, Verdict};
pub use collector::{Collection, RouteCollector};
pub use config::{Config, DEFAULT_CONFIG_FILE};
pub use error::{AnalyzeError, Issue, IssueKind, Result, RootRole};
pub use reference::{group_references, ExtractionKind, RouteReference, UsageGroup};
pub use report::{Report, Summary};
pub use scanner::{extract_references, Grammars, ScanOutcome, SourceScanner};

/// The full pipeline: collect, scan, group, classify, find unused, assemble
///
/// Reads only. The report is written by [`Analyzer::write_report`].
pub struct Analyzer {
    config: Config,
}

impl Analyzer {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Route inventory of the configured routing root
    pub fn collect_routes(&self) -> Result<Collection> {
        tracing::info!("Collecting routes from {:?}", self.config.roots.app_dir);

        RouteCollector::new(&self.config.collector)
            .strict(self.config.roots.strict)
            .collect(&self.config.roots.app_dir)
    }

    /// Route references found below the configured source root
    pub fn scan_sources(&self) -> Result<ScanOutcome> {
        tracing::info!("Scanning sources under {:?}", self.config.roots.source_dir);

        SourceScanner::new(&self.config.scanner)?
            .strict(self.config.roots.strict)
            .scan(&self.config.roots.source_dir)
    }

    /// Derives the report from a collection and a scan
    pub fn analyze(
        &self,
        collection: &Collection,
        scan: ScanOutcome,
        generated_at: DateTime<Utc>,
    ) -> Report {
        let pages = collection.table.pages();

        let groups = group_references(scan.references);
        tracing::info!("Grouped references into {} distinct paths", groups.len());

        let classification = Classification::new(groups, &pages);
        let unused = unused_routes(
            &pages,
            &classification.groups,
            &self.config.report.unused_exclusions,
            &self.config.roots.app_dir,
        );
        tracing::info!(
            "{} broken, {} unused",
            classification.count(Verdict::Broken),
            unused.len()
        );

        let errors = collection
            .issues
            .iter()
            .cloned()
            .chain(scan.issues)
            .collect();

        Report::build(
            generated_at,
            &collection.table,
            &classification,
            &unused,
            errors,
        )
    }

    pub fn run(&self) -> Result<Report> {
        self.run_at(Utc::now())
    }

    /// [`Analyzer::run`] with a fixed timestamp
    pub fn run_at(&self, generated_at: DateTime<Utc>) -> Result<Report> {
        let collection = self.collect_routes()?;
        let scan = self.scan_sources()?;
        Ok(self.analyze(&collection, scan, generated_at))
    }

    /// Writes the report to the configured output path and returns that path
    pub fn write_report(&self, report: &Report) -> Result<PathBuf> {
        let output = self.config.report.output.clone();
        report.write(&output)?;
        tracing::info!("Report written to {:?}", output);
        Ok(output)
    }
}

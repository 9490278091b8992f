use anyhow::{Context, Result};
use chrono::Utc;
use colored::Colorize;
use routegraph::{Analyzer, Config};
use std::path::PathBuf;

use crate::summary;

/// Command-line overrides layered over the loaded configuration
pub struct CheckArgs {
    pub config: Option<PathBuf>,
    pub app_dir: Option<PathBuf>,
    pub source_dir: Option<PathBuf>,
    pub output: Option<PathBuf>,
}

impl CheckArgs {
    fn load_config(&self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load(path)?,
            None => Config::load_default()?,
        };

        if let Some(dir) = &self.app_dir {
            config.roots.app_dir = dir.clone();
        }
        if let Some(dir) = &self.source_dir {
            config.roots.source_dir = dir.clone();
        }
        if let Some(output) = &self.output {
            config.report.output = output.clone();
        }

        Ok(config)
    }
}

pub fn execute(args: CheckArgs) -> Result<()> {
    let config = args.load_config()?;

    println!("{}", "Checking routes...".green().bold());
    println!();

    let analyzer = Analyzer::new(config);

    let collection = analyzer
        .collect_routes()
        .context("Failed to collect routes")?;
    println!(
        "  {} {} routes ({} pages) in {}",
        "✓".green(),
        collection.table.len(),
        collection.page_count(),
        analyzer.config().roots.app_dir.display()
    );

    let scan = analyzer
        .scan_sources()
        .context("Failed to scan sources")?;
    println!(
        "  {} {} references in {} of {} files under {}",
        "✓".green(),
        scan.references.len(),
        scan.files_scanned,
        scan.candidates,
        analyzer.config().roots.source_dir.display()
    );

    let report = analyzer.analyze(&collection, scan, Utc::now());
    println!("  {} {} distinct paths classified", "✓".green(), report.summary.total_used_routes);

    let written = analyzer
        .write_report(&report)
        .context("Failed to write report")?;
    println!("  {} Report written to {}", "✓".green(), written.display().to_string().cyan());
    println!();

    print!("{}", summary::render(&report, &analyzer.config().report));

    Ok(())
}

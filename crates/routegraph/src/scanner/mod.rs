// File: src/scanner/mod.rs
// Purpose: Finds candidate source files and extracts route references from them

use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::config::ScannerConfig;
use crate::error::{AnalyzeError, Issue, IssueKind, Result, RootRole};
use crate::reference::RouteReference;
use crate::walk::{has_allowed_extension, probe_root, walk};

mod grammar;

pub use grammar::{extract_references, Grammars};

/// Everything one scan produced, merged across files
#[derive(Debug, Default)]
pub struct ScanOutcome {
    pub references: Vec<RouteReference>,
    pub issues: Vec<Issue>,
    /// Files that passed the extension allow-list
    pub candidates: usize,
    /// Files that also passed the marker pre-filter and were extracted
    pub files_scanned: usize,
}

/// Per-file result, produced independently on any thread
enum FileScan {
    NoMarker,
    Extracted(Vec<RouteReference>),
    Unreadable(Issue),
}

pub struct SourceScanner<'a> {
    config: &'a ScannerConfig,
    grammars: Grammars,
    strict: bool,
}

impl<'a> SourceScanner<'a> {
    pub fn new(config: &'a ScannerConfig) -> Result<Self> {
        Ok(Self {
            config,
            grammars: Grammars::new(config)?,
            strict: false,
        })
    }

    /// Fail on a missing root instead of returning an empty outcome
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Scans every candidate below `root`
    ///
    /// Unreadable files are recorded and skipped; they never abort the scan.
    pub fn scan(&self, root: &Path) -> Result<ScanOutcome> {
        let mut outcome = ScanOutcome::default();

        if let Some(issue) = probe_root(RootRole::Source, root, self.strict)? {
            outcome.issues.push(issue);
            return Ok(outcome);
        }

        let files = self.candidate_files(root, &mut outcome.issues);
        outcome.candidates = files.len();

        let per_file: Vec<FileScan> = if self.config.parallel {
            files.par_iter().map(|file| self.scan_file(file)).collect()
        } else {
            files.iter().map(|file| self.scan_file(file)).collect()
        };

        // Single merge step after all files are done
        for scan in per_file {
            match scan {
                FileScan::NoMarker => {}
                FileScan::Extracted(references) => {
                    outcome.files_scanned += 1;
                    outcome.references.extend(references);
                }
                FileScan::Unreadable(issue) => outcome.issues.push(issue),
            }
        }

        outcome.references.sort_by(|a, b| {
            (&a.source_file, a.source_line, a.extraction_kind)
                .cmp(&(&b.source_file, b.source_line, b.extraction_kind))
        });

        tracing::info!(
            "Scanned {} of {} files under {:?}, {} references",
            outcome.files_scanned,
            outcome.candidates,
            root,
            outcome.references.len()
        );

        Ok(outcome)
    }

    /// Files passing the extension allow-list, in sorted walk order
    fn candidate_files(&self, root: &Path, issues: &mut Vec<Issue>) -> Vec<PathBuf> {
        let mut files = Vec::new();

        for entry in walk(root, &self.config.skip_dirs, |_| true) {
            match entry {
                Ok(entry) => {
                    if entry.file_type().is_file()
                        && has_allowed_extension(entry.path(), &self.config.extensions)
                    {
                        files.push(entry.into_path());
                    }
                }
                Err(e) => {
                    let path = e.path().unwrap_or(root).to_path_buf();
                    tracing::warn!("Skipping unreadable entry {:?}: {}", path, e);
                    issues.push(Issue::new(IssueKind::WalkError, path, e.to_string()));
                }
            }
        }

        files
    }

    fn scan_file(&self, file: &Path) -> FileScan {
        let content = match fs::read_to_string(file) {
            Ok(content) => content,
            Err(source) => {
                let err = AnalyzeError::UnreadableFile {
                    path: file.to_path_buf(),
                    source,
                };
                tracing::warn!("{}", err);
                return match Issue::from_error(&err) {
                    Some(issue) => FileScan::Unreadable(issue),
                    None => FileScan::NoMarker,
                };
            }
        };

        if !self.has_marker(&content) {
            tracing::debug!("No navigation marker in {:?}", file);
            return FileScan::NoMarker;
        }

        FileScan::Extracted(extract_references(&content, file, &self.grammars))
    }

    /// Cheap substring pre-filter
    fn has_marker(&self, content: &str) -> bool {
        self.config.markers.iter().any(|m| content.contains(m.as_str()))
    }
}

// File: src/report.rs
// Purpose: The JSON report, the engine's only written artifact

use std::fs;
use std::path::Path;

use chrono::{DateTime, SecondsFormat, Utc};
use routegraph_router::{RouteEntry, RouteTable};
use serde::{Deserialize, Serialize};

use crate::classify::{Classification, Verdict};
use crate::error::{AnalyzeError, Issue, Result};
use crate::reference::ExtractionKind;

const BROKEN_ISSUE: &str = "Route not found in app directory";
const UNUSED_ISSUE: &str = "Page exists but no references found";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    /// ISO-8601 / RFC 3339, UTC
    pub generated_at: String,
    pub summary: Summary,
    pub broken_routes: Vec<BrokenRoute>,
    pub unused_routes: Vec<UnusedRoute>,
    pub dynamic_routes: Vec<DynamicRoute>,
    pub all_app_routes: Vec<AppRoute>,
    pub all_used_routes: Vec<UsedRoute>,
    pub errors: Vec<Issue>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub total_app_routes: usize,
    pub total_page_routes: usize,
    pub total_used_routes: usize,
    /// Valid plus DynamicValid
    pub valid_routes: usize,
    pub broken_routes: usize,
    pub unused_routes: usize,
    pub external_routes: usize,
    /// Groups whose references carry an interpolation, whatever their verdict
    pub dynamic_routes: usize,
    pub special_routes: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrokenRoute {
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub clean_path: Option<String>,
    pub is_dynamic: bool,
    pub usages: Vec<Usage>,
    pub issue: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usage {
    pub file: String,
    #[serde(rename = "type")]
    pub kind: ExtractionKind,
    pub line: usize,
    pub context: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnusedRoute {
    pub path: String,
    pub file: String,
    pub has_params: bool,
    pub issue: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DynamicRoute {
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub clean_path: Option<String>,
    pub usages: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppRoute {
    pub path: String,
    pub file: String,
    pub has_params: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsedRoute {
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub clean_path: Option<String>,
    pub is_dynamic: bool,
    pub usage_count: usize,
    pub files: Vec<String>,
}

fn display(entry: &RouteEntry) -> String {
    entry.source_location.to_string_lossy().into_owned()
}

impl Report {
    /// Assembles the report from the pipeline's derived sets
    ///
    /// Every list is deterministic given the inputs, so two runs over the same
    /// tree differ only in `generatedAt`.
    pub fn build(
        generated_at: DateTime<Utc>,
        table: &RouteTable,
        classification: &Classification,
        unused: &[&RouteEntry],
        mut errors: Vec<Issue>,
    ) -> Self {
        let summary = Summary {
            total_app_routes: table.len(),
            total_page_routes: table.entries().filter(|e| e.is_page()).count(),
            total_used_routes: classification.len(),
            valid_routes: classification.valid_count(),
            broken_routes: classification.count(Verdict::Broken),
            unused_routes: unused.len(),
            external_routes: classification.count(Verdict::External),
            dynamic_routes: classification.dynamic_count(),
            special_routes: classification.count(Verdict::Special),
        };

        let broken_routes = classification
            .with_verdict(Verdict::Broken)
            .map(|c| BrokenRoute {
                path: c.group.path.clone(),
                clean_path: c.group.clean_path.clone(),
                is_dynamic: c.group.is_dynamic,
                usages: c
                    .group
                    .occurrences
                    .iter()
                    .map(|r| Usage {
                        file: r.source_file.to_string_lossy().into_owned(),
                        kind: r.extraction_kind,
                        line: r.source_line,
                        context: r.surrounding_text.clone(),
                    })
                    .collect(),
                issue: BROKEN_ISSUE.to_string(),
            })
            .collect();

        let mut unused_routes: Vec<UnusedRoute> = unused
            .iter()
            .map(|entry| UnusedRoute {
                path: entry.declared_path.clone(),
                file: display(entry),
                has_params: entry.has_parameters,
                issue: UNUSED_ISSUE.to_string(),
            })
            .collect();
        unused_routes.sort_by(|a, b| (&a.path, &a.file).cmp(&(&b.path, &b.file)));

        let dynamic_routes = classification
            .dynamic()
            .map(|c| DynamicRoute {
                path: c.group.path.clone(),
                clean_path: c.group.clean_path.clone(),
                usages: c.group.usage_count(),
            })
            .collect();

        let all_app_routes = table
            .entries()
            .map(|entry| AppRoute {
                path: entry.declared_path.clone(),
                file: display(entry),
                has_params: entry.has_parameters,
            })
            .collect();

        let all_used_routes = classification
            .groups
            .iter()
            .map(|c| UsedRoute {
                path: c.group.path.clone(),
                clean_path: c.group.clean_path.clone(),
                is_dynamic: c.group.is_dynamic,
                usage_count: c.group.usage_count(),
                files: c.group.files(),
            })
            .collect();

        errors.sort();

        Self {
            generated_at: generated_at.to_rfc3339_opts(SecondsFormat::Millis, true),
            summary,
            broken_routes,
            unused_routes,
            dynamic_routes,
            all_app_routes,
            all_used_routes,
            errors,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Writes the pretty-printed report, creating parent directories
    pub fn write(&self, path: &Path) -> Result<()> {
        let json = self.to_json()?;
        let io_err = |source| AnalyzeError::Report {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        fs::write(path, json).map_err(io_err)
    }
}

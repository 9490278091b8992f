// File: src/reference.rs
// Purpose: Route references extracted from source files, and their grouping

use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

use routegraph_router::path::has_interpolation;
use routegraph_router::{strip_query_and_fragment, wildcard_form};
use serde::{Deserialize, Serialize};

/// Grammar that produced a reference
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtractionKind {
    /// `<Link href="/x">`, `<a href={'/x'}>`, `` <Link href={`/x/${id}`}> ``
    Link,
    /// `router.push('/x')`
    Navigation,
    /// `` = `/x/${id}` `` and friends
    Template,
    /// `{ href: '/x' }`
    Property,
}

/// One textual occurrence of a route in source code
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteReference {
    /// Value exactly as written
    pub raw_path: String,
    /// Query and fragment stripped
    pub normalized_path: String,
    pub extraction_kind: ExtractionKind,
    pub source_file: PathBuf,
    /// 1-based
    pub source_line: usize,
    /// Trimmed source line
    pub surrounding_text: String,
    /// Still carries a `${...}` interpolation
    pub is_dynamic: bool,
    /// Each interpolation replaced by `*`
    pub dynamic_normalized_path: Option<String>,
}

impl RouteReference {
    pub fn new(
        raw_path: impl Into<String>,
        extraction_kind: ExtractionKind,
        source_file: impl Into<PathBuf>,
        source_line: usize,
        surrounding_text: impl Into<String>,
    ) -> Self {
        let raw_path = raw_path.into();
        let normalized_path = strip_query_and_fragment(&raw_path).to_string();
        let is_dynamic = has_interpolation(&normalized_path);
        let dynamic_normalized_path = is_dynamic.then(|| wildcard_form(&normalized_path));

        Self {
            raw_path,
            normalized_path,
            extraction_kind,
            source_file: source_file.into(),
            source_line,
            surrounding_text: surrounding_text.into(),
            is_dynamic,
            dynamic_normalized_path,
        }
    }
}

/// All references sharing one normalized path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsageGroup {
    /// The grouping key
    pub path: String,
    /// Wildcard form, present for dynamic groups
    pub clean_path: Option<String>,
    pub is_dynamic: bool,
    pub occurrences: Vec<RouteReference>,
}

impl UsageGroup {
    pub fn usage_count(&self) -> usize {
        self.occurrences.len()
    }

    /// Distinct files, sorted
    pub fn files(&self) -> Vec<String> {
        self.occurrences
            .iter()
            .map(|r| r.source_file.to_string_lossy().into_owned())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

/// Groups references by normalized path, sorted by key
pub fn group_references(references: Vec<RouteReference>) -> Vec<UsageGroup> {
    let mut groups: BTreeMap<String, UsageGroup> = BTreeMap::new();

    for reference in references {
        let group = groups
            .entry(reference.normalized_path.clone())
            .or_insert_with(|| UsageGroup {
                path: reference.normalized_path.clone(),
                clean_path: None,
                is_dynamic: false,
                occurrences: Vec::new(),
            });

        if reference.is_dynamic {
            group.is_dynamic = true;
            if group.clean_path.is_none() {
                group.clean_path = reference.dynamic_normalized_path.clone();
            }
        }
        group.occurrences.push(reference);
    }

    groups.into_values().collect()
}

// File: src/error.rs
// Purpose: Error taxonomy and the per-item issue record written to the report

use serde::{Deserialize, Serialize};
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

/// Which configured root an error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RootRole {
    App,
    Source,
}

impl fmt::Display for RootRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RootRole::App => write!(f, "routing root"),
            RootRole::Source => write!(f, "source root"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AnalyzeError {
    #[error("{role} does not exist: {path:?}")]
    MissingRoot { role: RootRole, path: PathBuf },

    #[error("{role} is not readable: {path:?}")]
    RootUnreachable {
        role: RootRole,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to read {path:?}")]
    UnreadableFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed route pattern in {path:?}: {reason}")]
    MalformedPattern { path: PathBuf, reason: String },

    #[error("invalid scanner grammar: {0}")]
    Grammar(#[from] regex::Error),

    #[error("failed to write report to {path:?}")]
    Report {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to serialize report")]
    Serialize(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, AnalyzeError>;

/// Kind tag of a non-fatal issue
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum IssueKind {
    MissingRoot,
    UnreadableFile,
    MalformedPattern,
    WalkError,
}

/// A per-item failure, downgraded to a skip and tallied in the report
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Issue {
    pub kind: IssueKind,
    pub path: String,
    pub message: String,
}

impl Issue {
    pub fn new(kind: IssueKind, path: impl AsRef<Path>, message: impl Into<String>) -> Self {
        Self {
            kind,
            path: path.as_ref().to_string_lossy().into_owned(),
            message: message.into(),
        }
    }

    /// Downgrades a per-item error; returns `None` for errors that must stay fatal
    pub fn from_error(err: &AnalyzeError) -> Option<Self> {
        let (kind, path) = match err {
            AnalyzeError::MissingRoot { path, .. } => (IssueKind::MissingRoot, path),
            AnalyzeError::UnreadableFile { path, .. } => (IssueKind::UnreadableFile, path),
            AnalyzeError::MalformedPattern { path, .. } => (IssueKind::MalformedPattern, path),
            _ => return None,
        };

        Some(Self::new(kind, path, error_chain(err)))
    }
}

/// Renders an error with its sources, `outer: inner: ...`
fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(inner) = source {
        message.push_str(": ");
        message.push_str(&inner.to_string());
        source = inner.source();
    }
    message
}

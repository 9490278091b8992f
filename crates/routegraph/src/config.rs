// File: src/config.rs
// Purpose: Configuration parsing from routegraph.toml

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default configuration file name, looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "routegraph.toml";

/// Analyzer configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub roots: RootsConfig,

    #[serde(default)]
    pub collector: CollectorConfig,

    #[serde(default)]
    pub scanner: ScannerConfig,

    #[serde(default)]
    pub report: ReportConfig,
}

/// Where to look
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RootsConfig {
    /// Routing root holding page/layout files (default: "src/app")
    #[serde(default = "default_app_dir")]
    pub app_dir: PathBuf,

    /// Source root scanned for references (default: "src")
    #[serde(default = "default_source_dir")]
    pub source_dir: PathBuf,

    /// Treat a missing root as an error instead of a warning
    #[serde(default = "default_false")]
    pub strict: bool,
}

/// Route collection from the routing root
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CollectorConfig {
    /// Accepted extensions for `page.*` and `layout.*` leaf files
    #[serde(default = "default_extensions")]
    pub route_extensions: Vec<String>,

    /// Directory names never descended into (dot-directories are always skipped)
    #[serde(default = "default_skip_dirs")]
    pub skip_dirs: Vec<String>,
}

/// Reference extraction from the source root
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScannerConfig {
    /// Extension allow-list for candidate files
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    /// Directory names never descended into (dot-directories are always skipped)
    #[serde(default = "default_skip_dirs")]
    pub skip_dirs: Vec<String>,

    /// A file must contain at least one of these to be scanned
    #[serde(default = "default_markers")]
    pub markers: Vec<String>,

    /// Identifier of the navigation handle (`router.push(...)`)
    #[serde(default = "default_navigation_handle")]
    pub navigation_handle: String,

    /// Navigation verbs called on the handle
    #[serde(default = "default_navigation_verbs")]
    pub navigation_verbs: Vec<String>,

    /// Free navigation calls such as `redirect("/x")`
    #[serde(default = "default_navigation_functions")]
    pub navigation_functions: Vec<String>,

    /// Markup elements whose `href` is a route
    #[serde(default = "default_link_elements")]
    pub link_elements: Vec<String>,

    /// Object-literal keys whose string value is a route
    #[serde(default = "default_link_keys")]
    pub link_keys: Vec<String>,

    /// Extract files on the rayon thread pool
    #[serde(default = "default_true")]
    pub parallel: bool,
}

/// Report output and console listing
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReportConfig {
    /// JSON report path (default: "route-report.json")
    #[serde(default = "default_output")]
    pub output: PathBuf,

    /// Broken/unused routes listed on the console before "... and N more"
    #[serde(default = "default_max_listed")]
    pub max_listed: usize,

    /// Occurrence sites shown per broken route
    #[serde(default = "default_max_sites")]
    pub max_sites: usize,

    /// Path segments and directory names that never count as unused pages
    #[serde(default = "default_unused_exclusions")]
    pub unused_exclusions: Vec<String>,
}

// Default values
fn default_app_dir() -> PathBuf {
    PathBuf::from("src/app")
}

fn default_source_dir() -> PathBuf {
    PathBuf::from("src")
}

fn default_output() -> PathBuf {
    PathBuf::from("route-report.json")
}

pub(crate) fn default_extensions() -> Vec<String> {
    strings(&["tsx", "ts", "jsx", "js"])
}

pub(crate) fn default_skip_dirs() -> Vec<String> {
    strings(&[
        "node_modules",
        ".next",
        ".git",
        "dist",
        "build",
        "out",
        "coverage",
        "target",
    ])
}

fn default_markers() -> Vec<String> {
    strings(&["href", "router", "redirect", "navigate"])
}

fn default_navigation_handle() -> String {
    "router".to_string()
}

fn default_navigation_verbs() -> Vec<String> {
    strings(&["push", "replace", "prefetch"])
}

fn default_navigation_functions() -> Vec<String> {
    strings(&["redirect", "permanentRedirect", "navigate"])
}

fn default_link_elements() -> Vec<String> {
    strings(&["Link", "a"])
}

fn default_link_keys() -> Vec<String> {
    strings(&["href"])
}

fn default_unused_exclusions() -> Vec<String> {
    strings(&["not-found", "_not-found", "error", "global-error"])
}

fn default_max_listed() -> usize {
    20
}

fn default_max_sites() -> usize {
    2
}

fn default_true() -> bool {
    true
}

fn default_false() -> bool {
    false
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

// Default implementations
impl Default for RootsConfig {
    fn default() -> Self {
        Self {
            app_dir: default_app_dir(),
            source_dir: default_source_dir(),
            strict: false,
        }
    }
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            route_extensions: default_extensions(),
            skip_dirs: default_skip_dirs(),
        }
    }
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            extensions: default_extensions(),
            skip_dirs: default_skip_dirs(),
            markers: default_markers(),
            navigation_handle: default_navigation_handle(),
            navigation_verbs: default_navigation_verbs(),
            navigation_functions: default_navigation_functions(),
            link_elements: default_link_elements(),
            link_keys: default_link_keys(),
            parallel: true,
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            output: default_output(),
            max_listed: default_max_listed(),
            max_sites: default_max_sites(),
            unused_exclusions: default_unused_exclusions(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        // If file doesn't exist or is empty, return default config
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;

        Ok(config)
    }

    /// Load configuration from default path (./routegraph.toml)
    pub fn load_default() -> Result<Self> {
        Self::load(DEFAULT_CONFIG_FILE)
    }

    /// Serialize for `routegraph init`
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize configuration")
    }
}

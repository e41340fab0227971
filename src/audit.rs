//! End-to-end audit of a project directory.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::analysis::ImportScanner;
use crate::parser::{load_manifests, GitDetector, ManifestResult};
use crate::report::{reconcile, Report};

/// Default directory scanned for imports, relative to the project root.
pub const DEFAULT_SOURCE_DIR: &str = "lib";

/// Where to find the project and its sources.
#[derive(Debug, Clone)]
pub struct AuditOptions {
    /// Directory holding `pubspec.yaml` and `pubspec.lock`.
    pub root: PathBuf,
    /// Directory to scan for imports, relative to `root`.
    pub source_dir: PathBuf,
}

impl AuditOptions {
    /// Audits `root`, scanning its `lib` directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            source_dir: PathBuf::from(DEFAULT_SOURCE_DIR),
        }
    }

    /// Overrides the scanned directory.
    pub fn with_source_dir(mut self, source_dir: impl Into<PathBuf>) -> Self {
        self.source_dir = source_dir.into();
        self
    }

    /// The absolute or root-relative directory that is scanned.
    pub fn source_root(&self) -> PathBuf {
        self.root.join(&self.source_dir)
    }
}

impl Default for AuditOptions {
    fn default() -> Self {
        Self::new(".")
    }
}

/// Loads the manifests, scans the sources and reconciles the results.
///
/// # Errors
///
/// Fails before any scanning if either manifest is missing or malformed.
pub fn check_project(options: &AuditOptions) -> ManifestResult<Report> {
    let manifests = load_manifests(&options.root)?;

    let git = GitDetector::new().detect(&manifests.pubspec_text);
    let used = ImportScanner::new().scan_dir(&options.source_root());

    info!(
        git = git.len(),
        imported = used.len(),
        files = used.files_scanned,
        "collected references"
    );

    Ok(reconcile(
        &manifests.pubspec.declarations(),
        &manifests.lock,
        &git,
        &used,
    ))
}

/// Audits the project at `root` with the default source directory.
pub fn check_dir(root: &Path) -> ManifestResult<Report> {
    check_project(&AuditOptions::new(root))
}

//! Cross-referencing of declarations, lock entries and import usage.
//!
//! The lock file drives iteration: only packages that are both declared
//! under `dependencies` and present in `pubspec.lock` are classified.
//! Counts are a fold over the classified entries.

use std::collections::{BTreeMap, HashSet};
use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::analysis::UsedPackages;
use crate::parser::{DependencyDeclaration, LockedPackage, PubspecLock, SourceKind};

/// Packages that ship with the Flutter SDK or are consumed without an
/// explicit import. They are never flagged as unused.
pub const EXEMPT_PACKAGES: [&str; 4] = [
    "flutter",
    "flutter_test",
    "flutter_localizations",
    "cupertino_icons",
];

/// Returns true if `name` is on the exemption list.
pub fn is_exempt(name: &str) -> bool {
    EXEMPT_PACKAGES.contains(&name)
}

/// How a locked direct dependency was classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Classification {
    /// Declared with a git source.
    Git,
    /// Never imported under the source root.
    Unused,
    /// Imported and resolved from the registry.
    HostedUsed,
    /// Imported but neither hosted nor git (path, sdk, ...).
    Other,
}

impl Classification {
    /// Returns the label used in reports.
    pub fn label(&self) -> &'static str {
        match self {
            Classification::Git => "git",
            Classification::Unused => "unused",
            Classification::HostedUsed => "hosted-used",
            Classification::Other => "other",
        }
    }

    /// Returns true if the classification gets its own report line.
    pub fn is_reported(&self) -> bool {
        !matches!(self, Classification::Other)
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A classified direct dependency.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageEntry {
    /// The package name.
    pub name: String,
    /// The locked version.
    pub version: String,
    /// The lock file source.
    pub source: SourceKind,
    /// The outcome of classification.
    pub classification: Classification,
}

impl PackageEntry {
    fn new(name: &str, locked: &LockedPackage, classification: Classification) -> Self {
        Self {
            name: name.to_string(),
            version: locked.version.clone(),
            source: locked.source.clone(),
            classification,
        }
    }
}

/// Aggregate counts for a report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    /// Number of declared direct dependencies, locked or not.
    pub total: usize,
    /// Entries classified [`Classification::Git`].
    pub git: usize,
    /// Entries classified [`Classification::HostedUsed`].
    pub hosted: usize,
    /// Entries classified [`Classification::Unused`].
    pub unused: usize,
}

impl Summary {
    fn tally(mut self, classification: Classification) -> Self {
        match classification {
            Classification::Git => self.git += 1,
            Classification::HostedUsed => self.hosted += 1,
            Classification::Unused => self.unused += 1,
            Classification::Other => {}
        }
        self
    }
}

/// The result of auditing a project.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    /// Classified entries, in lock file order.
    pub entries: Vec<PackageEntry>,
    /// Aggregate counts.
    pub summary: Summary,
    /// Names classified unused, in declaration order.
    pub unused: Vec<String>,
    /// Direct dependencies with no lock entry, in declaration order.
    pub unlocked: Vec<String>,
    /// SDK constraints from the lock file.
    pub sdks: BTreeMap<String, String>,
}

impl Report {
    /// Returns true if no dependency was flagged unused.
    pub fn is_clean(&self) -> bool {
        self.unused.is_empty()
    }

    /// Entries that get their own report line.
    pub fn reported_entries(&self) -> impl Iterator<Item = &PackageEntry> {
        self.entries
            .iter()
            .filter(|e| e.classification.is_reported())
    }

    /// Looks up the classification of a package.
    pub fn classification_of(&self, name: &str) -> Option<Classification> {
        self.entries
            .iter()
            .find(|e| e.name == name)
            .map(|e| e.classification)
    }
}

fn classify(
    name: &str,
    locked: &LockedPackage,
    git: &HashSet<String>,
    unused: &HashSet<&str>,
) -> Classification {
    if git.contains(name) {
        Classification::Git
    } else if unused.contains(name) {
        Classification::Unused
    } else if locked.is_hosted() {
        Classification::HostedUsed
    } else {
        Classification::Other
    }
}

/// Builds a report from the manifests and the import scan.
///
/// Only `dependencies` entries take part; `dev_dependencies` are ignored.
/// Exempt packages count towards `total` and nothing else.
///
/// # Example
///
/// ```
/// use std::collections::HashSet;
/// use pubscope::analysis::UsedPackages;
/// use pubscope::parser::{parse_lock_str, parse_pubspec_str};
/// use pubscope::report::{reconcile, Classification};
///
/// let pubspec = parse_pubspec_str("dependencies:\n  foo: ^1.0.0\n").unwrap();
/// let lock = parse_lock_str(
///     "packages:\n  foo:\n    dependency: direct main\n    source: hosted\n    version: \"1.0.0\"\n",
/// )
/// .unwrap();
///
/// let report = reconcile(&pubspec.declarations(), &lock, &HashSet::new(), &UsedPackages::new());
/// assert_eq!(report.classification_of("foo"), Some(Classification::Unused));
/// assert_eq!(report.unused, vec!["foo"]);
/// ```
pub fn reconcile(
    declarations: &[DependencyDeclaration],
    lock: &PubspecLock,
    git: &HashSet<String>,
    used: &UsedPackages,
) -> Report {
    let direct: Vec<&str> = declarations
        .iter()
        .filter(|d| d.is_direct())
        .map(|d| d.name.as_str())
        .collect();
    let direct_set: HashSet<&str> = direct.iter().copied().collect();

    let unused_candidates: HashSet<&str> = direct
        .iter()
        .copied()
        .filter(|name| !is_exempt(name) && !used.contains(name))
        .collect();

    let entries: Vec<PackageEntry> = lock
        .packages
        .iter()
        .filter(|(name, _)| direct_set.contains(name.as_str()) && !is_exempt(name))
        .map(|(name, locked)| {
            PackageEntry::new(name, locked, classify(name, locked, git, &unused_candidates))
        })
        .collect();

    let summary = entries.iter().map(|e| e.classification).fold(
        Summary {
            total: direct_set.len(),
            ..Summary::default()
        },
        Summary::tally,
    );

    let classified_unused: HashSet<&str> = entries
        .iter()
        .filter(|e| e.classification == Classification::Unused)
        .map(|e| e.name.as_str())
        .collect();
    let unused: Vec<String> = direct
        .iter()
        .filter(|name| classified_unused.contains(*name))
        .map(|name| name.to_string())
        .collect();

    let unlocked: Vec<String> = direct
        .iter()
        .filter(|name| !lock.contains(name))
        .map(|name| name.to_string())
        .collect();

    debug!(
        total = summary.total,
        git = summary.git,
        hosted = summary.hosted,
        unused = summary.unused,
        unlocked = unlocked.len(),
        "reconciled dependencies"
    );

    Report {
        entries,
        summary,
        unused,
        unlocked,
        sdks: lock.sdks.clone(),
    }
}

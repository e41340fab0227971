//! Shared types for pubspec parsing.
//!
//! This module defines the data structures used to represent the
//! `pubspec.yaml` declaration document and the `pubspec.lock` lock
//! document of a Dart/Flutter project.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Represents the parts of a `pubspec.yaml` file needed for dependency auditing.
///
/// Dependency values are kept as raw YAML because their shape varies
/// (null, a version constraint, or a nested source map). Only the keys
/// matter for the audit. `serde_yaml::Mapping` preserves declaration order.
///
/// # Example
///
/// ```
/// use pubscope::parser::types::Pubspec;
///
/// let yaml = "name: my_app\ndependencies:\n  http: ^1.0.0\n";
/// let pubspec: Pubspec = serde_yaml::from_str(yaml).unwrap();
/// assert_eq!(pubspec.name.as_deref(), Some("my_app"));
/// assert_eq!(pubspec.dependency_names(), vec!["http"]);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Pubspec {
    /// The name of the package.
    pub name: Option<String>,

    /// Runtime dependencies.
    #[serde(default)]
    pub dependencies: Option<serde_yaml::Mapping>,

    /// Development-only dependencies (tests, code generation, lints).
    #[serde(default)]
    pub dev_dependencies: Option<serde_yaml::Mapping>,
}

impl Pubspec {
    /// Names of the normal dependencies, in declaration order.
    pub fn dependency_names(&self) -> Vec<&str> {
        mapping_keys(self.dependencies.as_ref())
    }

    /// Names of the dev dependencies, in declaration order.
    pub fn dev_dependency_names(&self) -> Vec<&str> {
        mapping_keys(self.dev_dependencies.as_ref())
    }

    /// Flattens both dependency groups into tagged declarations.
    ///
    /// Normal dependencies come first, followed by dev dependencies, each
    /// group in declaration order.
    pub fn declarations(&self) -> Vec<DependencyDeclaration> {
        self.dependency_names()
            .into_iter()
            .map(|name| DependencyDeclaration::new(name, DependencyGroup::Normal))
            .chain(
                self.dev_dependency_names()
                    .into_iter()
                    .map(|name| DependencyDeclaration::new(name, DependencyGroup::Dev)),
            )
            .collect()
    }
}

fn mapping_keys(mapping: Option<&serde_yaml::Mapping>) -> Vec<&str> {
    mapping
        .map(|m| m.keys().filter_map(|k| k.as_str()).collect())
        .unwrap_or_default()
}

/// Which dependency section of `pubspec.yaml` a declaration came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DependencyGroup {
    /// Declared under `dependencies`.
    Normal,
    /// Declared under `dev_dependencies`.
    Dev,
}

impl DependencyGroup {
    /// Returns the `pubspec.yaml` key for this group.
    pub fn key(&self) -> &'static str {
        match self {
            DependencyGroup::Normal => "dependencies",
            DependencyGroup::Dev => "dev_dependencies",
        }
    }
}

/// A package declared in `pubspec.yaml`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyDeclaration {
    /// The package name, e.g. `http`.
    pub name: String,

    /// The section it was declared in.
    pub group: DependencyGroup,
}

impl DependencyDeclaration {
    /// Creates a new declaration.
    pub fn new(name: impl Into<String>, group: DependencyGroup) -> Self {
        Self {
            name: name.into(),
            group,
        }
    }

    /// Returns true if declared under `dependencies`.
    pub fn is_direct(&self) -> bool {
        self.group == DependencyGroup::Normal
    }
}

/// Represents the structure of a `pubspec.lock` file.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct PubspecLock {
    /// Every resolved package, direct and transitive, keyed by name.
    #[serde(default)]
    pub packages: BTreeMap<String, LockedPackage>,

    /// SDK constraints the resolution was made under, e.g. `dart: ">=3.0.0 <4.0.0"`.
    #[serde(default)]
    pub sdks: BTreeMap<String, String>,
}

impl PubspecLock {
    /// Looks up a locked package by name.
    pub fn get(&self, name: &str) -> Option<&LockedPackage> {
        self.packages.get(name)
    }

    /// Returns true if the lock file has an entry for `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.packages.contains_key(name)
    }
}

/// A single resolved entry from `pubspec.lock`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LockedPackage {
    /// How the package entered the graph (`direct main`, `transitive`, ...).
    pub dependency: DependencyKind,

    /// Where the package was resolved from.
    pub source: SourceKind,

    /// The exact resolved version.
    pub version: String,
}

impl LockedPackage {
    /// Creates a new locked package record.
    pub fn new(dependency: DependencyKind, source: SourceKind, version: impl Into<String>) -> Self {
        Self {
            dependency,
            source,
            version: version.into(),
        }
    }

    /// Returns true if the package was resolved from the package registry.
    pub fn is_hosted(&self) -> bool {
        self.source == SourceKind::Hosted
    }
}

/// The `dependency` label recorded by `pubspec.lock`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "String")]
pub enum DependencyKind {
    /// `direct main`: listed under `dependencies`.
    DirectMain,
    /// `direct dev`: listed under `dev_dependencies`.
    DirectDev,
    /// `direct overridden`: pinned through `dependency_overrides`.
    DirectOverridden,
    /// `transitive`: pulled in by another package.
    Transitive,
    /// Any label this tool does not know about, kept verbatim.
    Other(String),
}

impl From<String> for DependencyKind {
    fn from(label: String) -> Self {
        match label.as_str() {
            "direct main" => DependencyKind::DirectMain,
            "direct dev" => DependencyKind::DirectDev,
            "direct overridden" => DependencyKind::DirectOverridden,
            "transitive" => DependencyKind::Transitive,
            _ => DependencyKind::Other(label),
        }
    }
}

impl fmt::Display for DependencyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DependencyKind::DirectMain => "direct main",
            DependencyKind::DirectDev => "direct dev",
            DependencyKind::DirectOverridden => "direct overridden",
            DependencyKind::Transitive => "transitive",
            DependencyKind::Other(label) => label,
        };
        write!(f, "{}", s)
    }
}

/// The `source` of a locked package.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "String")]
pub enum SourceKind {
    /// Resolved from a package registry (pub.dev or a custom host).
    Hosted,
    /// Checked out from a git repository.
    Git,
    /// A local path dependency.
    Path,
    /// Shipped with an SDK (e.g. `flutter`).
    Sdk,
    /// Any other source, kept verbatim.
    Other(String),
}

impl From<String> for SourceKind {
    fn from(label: String) -> Self {
        match label.as_str() {
            "hosted" => SourceKind::Hosted,
            "git" => SourceKind::Git,
            "path" => SourceKind::Path,
            "sdk" => SourceKind::Sdk,
            _ => SourceKind::Other(label),
        }
    }
}

impl SourceKind {
    /// Returns the label as written in `pubspec.lock`.
    pub fn label(&self) -> &str {
        match self {
            SourceKind::Hosted => "hosted",
            SourceKind::Git => "git",
            SourceKind::Path => "path",
            SourceKind::Sdk => "sdk",
            SourceKind::Other(label) => label,
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_kind_from_label() {
        assert_eq!(SourceKind::from("hosted".to_string()), SourceKind::Hosted);
        assert_eq!(SourceKind::from("git".to_string()), SourceKind::Git);
        assert_eq!(SourceKind::from("path".to_string()), SourceKind::Path);
        assert_eq!(SourceKind::from("sdk".to_string()), SourceKind::Sdk);
        assert_eq!(
            SourceKind::from("mirror".to_string()),
            SourceKind::Other("mirror".to_string())
        );
    }

    #[test]
    fn test_source_kind_is_case_sensitive() {
        assert_eq!(
            SourceKind::from("Hosted".to_string()),
            SourceKind::Other("Hosted".to_string())
        );
    }

    #[test]
    fn test_dependency_kind_display() {
        assert_eq!(
            DependencyKind::from("direct main".to_string()).to_string(),
            "direct main"
        );
        assert_eq!(
            DependencyKind::from("transitive".to_string()),
            DependencyKind::Transitive
        );
        assert_eq!(
            DependencyKind::from("weird".to_string()).to_string(),
            "weird"
        );
    }

    #[test]
    fn test_locked_package_is_hosted() {
        let pkg = LockedPackage::new(DependencyKind::DirectMain, SourceKind::Hosted, "1.0.0");
        assert!(pkg.is_hosted());

        let pkg = LockedPackage::new(DependencyKind::DirectMain, SourceKind::Git, "1.0.0");
        assert!(!pkg.is_hosted());
    }

    #[test]
    fn test_pubspec_default() {
        let pubspec = Pubspec::default();
        assert!(pubspec.name.is_none());
        assert!(pubspec.dependency_names().is_empty());
        assert!(pubspec.declarations().is_empty());
    }

    #[test]
    fn test_pubspec_declarations_preserve_order() {
        let yaml = r#"
dependencies:
  zeta: ^1.0.0
  alpha:
  flutter:
    sdk: flutter
dev_dependencies:
  lints: ^3.0.0
"#;
        let pubspec: Pubspec = serde_yaml::from_str(yaml).unwrap();
        let decls = pubspec.declarations();

        let names: Vec<_> = decls.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["zeta", "alpha", "flutter", "lints"]);
        assert!(decls[0].is_direct());
        assert_eq!(decls[3].group, DependencyGroup::Dev);
        assert_eq!(decls[3].group.key(), "dev_dependencies");
    }
}

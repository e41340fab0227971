//! Loader for `pubspec.yaml` and `pubspec.lock`.
//!
//! This module reads both manifests of a Dart/Flutter project and parses
//! them into typed records. Either manifest being missing or malformed is
//! fatal to the audit.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::types::{Pubspec, PubspecLock};

/// File name of the dependency declaration document.
pub const PUBSPEC_FILE: &str = "pubspec.yaml";

/// File name of the lock document.
pub const LOCK_FILE: &str = "pubspec.lock";

/// Errors that can occur while loading the manifests.
#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    /// The manifest could not be read from disk.
    #[error("{} not found: {source}", path.display())]
    NotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The manifest is not well-formed YAML of the expected shape.
    #[error("Failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

impl ManifestError {
    /// Returns the path of the manifest that failed.
    pub fn path(&self) -> &Path {
        match self {
            ManifestError::NotFound { path, .. } | ManifestError::Parse { path, .. } => path,
        }
    }

    /// Returns a suggestion for the user, if there is an obvious one.
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            ManifestError::NotFound { path, .. }
                if path.file_name().is_some_and(|name| name == LOCK_FILE) =>
            {
                Some("Run 'flutter pub get' or 'dart pub get' first.")
            }
            _ => None,
        }
    }
}

/// Result type alias for manifest operations.
pub type ManifestResult<T> = Result<T, ManifestError>;

/// Both manifests of a project, plus the raw declaration text.
///
/// The raw text is kept because git detection works on the text layout
/// rather than on the parsed structure.
#[derive(Debug, Clone)]
pub struct Manifests {
    /// Parsed `pubspec.yaml`.
    pub pubspec: Pubspec,

    /// Verbatim contents of `pubspec.yaml`.
    pub pubspec_text: String,

    /// Parsed `pubspec.lock`.
    pub lock: PubspecLock,
}

/// Parses a `pubspec.yaml` document from a string.
///
/// # Example
///
/// ```
/// use pubscope::parser::pubspec::parse_pubspec_str;
///
/// let pubspec = parse_pubspec_str("dependencies:\n  http: ^1.2.0\n").unwrap();
/// assert_eq!(pubspec.dependency_names(), vec!["http"]);
/// ```
pub fn parse_pubspec_str(content: &str) -> Result<Pubspec, serde_yaml::Error> {
    serde_yaml::from_str(content)
}

/// Parses a `pubspec.lock` document from a string.
pub fn parse_lock_str(content: &str) -> Result<PubspecLock, serde_yaml::Error> {
    serde_yaml::from_str(content)
}

/// Reads and parses a `pubspec.yaml` file.
pub fn parse_pubspec_file(path: &Path) -> ManifestResult<Pubspec> {
    let content = read_manifest(path)?;
    parse_pubspec_str(&content).map_err(|source| ManifestError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Reads and parses a `pubspec.lock` file.
pub fn parse_lock_file(path: &Path) -> ManifestResult<PubspecLock> {
    let content = read_manifest(path)?;
    parse_lock_str(&content).map_err(|source| ManifestError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Loads both manifests from a project root.
///
/// Both files are read before either is parsed, so a missing lock file is
/// reported as missing even when `pubspec.yaml` is malformed.
///
/// # Errors
///
/// Returns [`ManifestError::NotFound`] if either file cannot be read and
/// [`ManifestError::Parse`] if either is malformed.
pub fn load_manifests(root: &Path) -> ManifestResult<Manifests> {
    let pubspec_path = root.join(PUBSPEC_FILE);
    let lock_path = root.join(LOCK_FILE);

    let pubspec_text = read_manifest(&pubspec_path)?;
    let lock_text = read_manifest(&lock_path)?;

    let pubspec = parse_pubspec_str(&pubspec_text).map_err(|source| ManifestError::Parse {
        path: pubspec_path.clone(),
        source,
    })?;
    let lock = parse_lock_str(&lock_text).map_err(|source| ManifestError::Parse {
        path: lock_path.clone(),
        source,
    })?;

    debug!(
        dependencies = pubspec.dependency_names().len(),
        dev_dependencies = pubspec.dev_dependency_names().len(),
        locked = lock.packages.len(),
        "loaded manifests"
    );

    Ok(Manifests {
        pubspec,
        pubspec_text,
        lock,
    })
}

fn read_manifest(path: &Path) -> ManifestResult<String> {
    debug!(path = %path.display(), "reading manifest");
    fs::read_to_string(path).map_err(|source| ManifestError::NotFound {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::types::{DependencyKind, SourceKind};

    const SAMPLE_PUBSPEC: &str = r#"
name: sample_app
description: A sample Flutter app.
version: 1.0.0+1

environment:
  sdk: ">=3.0.0 <4.0.0"

dependencies:
  flutter:
    sdk: flutter
  http: ^1.2.0
  provider:
  my_fork:
    git:
      url: https://github.com/example/my_fork.git
      ref: main

dev_dependencies:
  flutter_test:
    sdk: flutter
  lints: ^3.0.0
"#;

    const SAMPLE_LOCK: &str = r#"
# Generated by pub
# See https://dart.dev/tools/pub/glossary#lockfile
packages:
  flutter:
    dependency: "direct main"
    description: flutter
    source: sdk
    version: "0.0.0"
  http:
    dependency: "direct main"
    description:
      name: http
      sha256: "abc"
      url: "https://pub.dev"
    source: hosted
    version: "1.2.1"
  my_fork:
    dependency: "direct main"
    description:
      path: "."
      ref: main
      resolved-ref: "0123456789"
      url: "https://github.com/example/my_fork.git"
    source: git
    version: "0.3.0"
  meta:
    dependency: transitive
    description:
      name: meta
      url: "https://pub.dev"
    source: hosted
    version: "1.11.0"
sdks:
  dart: ">=3.3.0 <4.0.0"
  flutter: ">=3.18.0"
"#;

    #[test]
    fn test_parse_pubspec_groups() {
        let pubspec = parse_pubspec_str(SAMPLE_PUBSPEC).unwrap();

        assert_eq!(pubspec.name.as_deref(), Some("sample_app"));
        assert_eq!(
            pubspec.dependency_names(),
            vec!["flutter", "http", "provider", "my_fork"]
        );
        assert_eq!(pubspec.dev_dependency_names(), vec!["flutter_test", "lints"]);
    }

    #[test]
    fn test_parse_pubspec_without_dependencies() {
        let pubspec = parse_pubspec_str("name: empty\n").unwrap();
        assert!(pubspec.dependency_names().is_empty());

        let pubspec = parse_pubspec_str("name: empty\ndependencies:\n").unwrap();
        assert!(pubspec.dependency_names().is_empty());
    }

    #[test]
    fn test_parse_pubspec_wrong_shape() {
        assert!(parse_pubspec_str("dependencies: [a, b]\n").is_err());
        assert!(parse_pubspec_str("dependencies:\n  - a\n").is_err());
    }

    #[test]
    fn test_parse_pubspec_invalid_yaml() {
        assert!(parse_pubspec_str("dependencies:\n  http: [unterminated\n").is_err());
    }

    #[test]
    fn test_parse_lock_records() {
        let lock = parse_lock_str(SAMPLE_LOCK).unwrap();

        assert_eq!(lock.packages.len(), 4);

        let http = lock.get("http").unwrap();
        assert_eq!(http.dependency, DependencyKind::DirectMain);
        assert_eq!(http.source, SourceKind::Hosted);
        assert_eq!(http.version, "1.2.1");

        let fork = lock.get("my_fork").unwrap();
        assert_eq!(fork.source, SourceKind::Git);

        assert_eq!(lock.get("meta").unwrap().dependency, DependencyKind::Transitive);
        assert_eq!(lock.sdks.get("dart").map(String::as_str), Some(">=3.3.0 <4.0.0"));
    }

    #[test]
    fn test_parse_lock_missing_fields() {
        let lock = "packages:\n  http:\n    source: hosted\n";
        assert!(parse_lock_str(lock).is_err());
    }

    #[test]
    fn test_load_manifests_from_dir() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(PUBSPEC_FILE), SAMPLE_PUBSPEC).unwrap();
        fs::write(dir.path().join(LOCK_FILE), SAMPLE_LOCK).unwrap();

        let manifests = load_manifests(dir.path()).unwrap();

        assert_eq!(manifests.pubspec_text, SAMPLE_PUBSPEC);
        assert!(manifests.lock.contains("http"));
        assert_eq!(manifests.pubspec.dependency_names().len(), 4);
    }

    #[test]
    fn test_load_manifests_missing_pubspec() {
        let dir = tempfile::tempdir().unwrap();

        let err = load_manifests(dir.path()).unwrap_err();

        assert!(matches!(err, ManifestError::NotFound { .. }));
        assert!(err.path().ends_with(PUBSPEC_FILE));
        assert!(err.hint().is_none());
    }

    #[test]
    fn test_load_manifests_missing_lock() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(PUBSPEC_FILE), SAMPLE_PUBSPEC).unwrap();

        let err = load_manifests(dir.path()).unwrap_err();

        assert!(matches!(err, ManifestError::NotFound { .. }));
        assert!(err.path().ends_with(LOCK_FILE));
        assert!(err.hint().unwrap().contains("pub get"));
    }

    #[test]
    fn test_load_manifests_malformed_lock() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(PUBSPEC_FILE), SAMPLE_PUBSPEC).unwrap();
        fs::write(dir.path().join(LOCK_FILE), "packages: {{{").unwrap();

        let err = load_manifests(dir.path()).unwrap_err();

        assert!(matches!(err, ManifestError::Parse { .. }));
        assert!(err.to_string().contains("Failed to parse"));
    }

    #[test]
    fn test_parse_pubspec_file_missing() {
        let err = parse_pubspec_file(Path::new("/definitely/not/here/pubspec.yaml")).unwrap_err();
        assert!(err.to_string().contains("not found"));
    }
}

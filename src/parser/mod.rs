//! Parser module for pubscope.
//!
//! This module loads the two manifests of a Dart/Flutter project and
//! derives the git classification from the declaration text.
//!
//! # Supported Formats
//!
//! - **pubspec.yaml** - dependency declarations (normal and dev)
//! - **pubspec.lock** - resolved packages and SDK constraints
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use pubscope::parser::{find_git_packages, load_manifests};
//!
//! let manifests = load_manifests(Path::new("."))?;
//! let git = find_git_packages(&manifests.pubspec_text);
//!
//! for name in manifests.pubspec.dependency_names() {
//!     println!("{} (git: {})", name, git.contains(name));
//! }
//! ```

pub mod git;
pub mod pubspec;
pub mod types;

// Re-export commonly used types for convenience
pub use git::{find_git_packages, GitDetector};
pub use pubspec::{
    load_manifests, parse_lock_file, parse_lock_str, parse_pubspec_file, parse_pubspec_str,
    ManifestError, ManifestResult, Manifests, LOCK_FILE, PUBSPEC_FILE,
};

pub use types::{
    DependencyDeclaration, DependencyGroup, DependencyKind, LockedPackage, Pubspec, PubspecLock,
    SourceKind,
};

//! Import scanning for Dart sources.
//!
//! This module walks a source tree and collects the package names that
//! appear in `import 'package:<name>/...'` directives. It is a lexical scan:
//! conditional imports, `export` directives and re-exports are not followed.

use std::collections::HashSet;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, warn};
use walkdir::WalkDir;

/// File extension of Dart source files.
pub const DART_EXTENSION: &str = "dart";

/// `import` keyword, a quote, the `package:` scheme and the package name.
static PACKAGE_IMPORT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"import\s+['"]package:([^/]+)"#).expect("valid regex"));

/// The set of packages referenced by imports under a source root.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UsedPackages {
    /// Package names seen in at least one import.
    pub packages: HashSet<String>,
    /// Number of source files that were read.
    pub files_scanned: usize,
}

impl UsedPackages {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if some import references `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.packages.contains(name)
    }

    /// Number of distinct packages referenced.
    pub fn len(&self) -> usize {
        self.packages.len()
    }

    /// Returns true if no package is referenced.
    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }

    /// Merges the names found in one file.
    pub fn add_file_packages(&mut self, packages: HashSet<String>) {
        self.files_scanned += 1;
        self.packages.extend(packages);
    }

    /// Returns the referenced names in sorted order.
    pub fn sorted(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.packages.iter().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

/// Scans source files for package imports.
#[derive(Debug, Clone)]
pub struct ImportScanner {
    extension: String,
}

impl ImportScanner {
    /// Creates a scanner for `.dart` files.
    pub fn new() -> Self {
        Self::with_extension(DART_EXTENSION)
    }

    /// Creates a scanner for files with the given extension (without the dot).
    pub fn with_extension(extension: impl Into<String>) -> Self {
        Self {
            extension: extension.into(),
        }
    }

    /// Returns true if `path` has the scanned extension.
    pub fn is_source_file(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e == self.extension)
    }

    /// Collects the package names imported by a single line.
    pub fn scan_line(&self, line: &str) -> Vec<String> {
        PACKAGE_IMPORT
            .captures_iter(line)
            .filter_map(|caps| caps.get(1).map(|m| m.as_str().to_string()))
            .collect()
    }

    /// Collects the package names imported anywhere in `source`.
    pub fn scan_text(&self, source: &str) -> HashSet<String> {
        source.lines().flat_map(|line| self.scan_line(line)).collect()
    }

    /// Reads a file line by line and collects its package imports.
    ///
    /// Lines are decoded lossily, so bytes that are not valid UTF-8 (e.g. a
    /// latin-1 comment) never hide the imports around them.
    pub fn scan_file(&self, path: &Path) -> io::Result<HashSet<String>> {
        let reader = BufReader::new(File::open(path)?);
        Ok(reader
            .split(b'\n')
            .map_while(Result::ok)
            .flat_map(|line| self.scan_line(&String::from_utf8_lossy(&line)))
            .collect())
    }

    /// Lists every source file under `root`.
    ///
    /// Every directory is descended; entries that cannot be read are
    /// skipped and the walk continues with their siblings.
    pub fn source_files<'a>(&'a self, root: &Path) -> impl Iterator<Item = PathBuf> + 'a {
        WalkDir::new(root)
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    debug!(error = %e, "skipping unreadable path");
                    None
                }
            })
            .filter(|entry| !entry.file_type().is_dir())
            .map(walkdir::DirEntry::into_path)
            .filter(move |path| self.is_source_file(path))
    }

    /// Scans every source file under `root`.
    ///
    /// Files that cannot be opened contribute nothing; a missing root
    /// yields an empty result.
    pub fn scan_dir(&self, root: &Path) -> UsedPackages {
        if !root.is_dir() {
            warn!(root = %root.display(), "source directory not found, no imports collected");
        }

        let used = self
            .source_files(root)
            .map(|path| match self.scan_file(&path) {
                Ok(packages) => Some(packages),
                Err(e) => {
                    debug!(path = %path.display(), error = %e, "skipping unreadable file");
                    None
                }
            })
            .fold(UsedPackages::new(), |mut used, packages| {
                if let Some(packages) = packages {
                    used.add_file_packages(packages);
                }
                used
            });

        debug!(
            root = %root.display(),
            files = used.files_scanned,
            packages = used.len(),
            "import scan finished"
        );
        used
    }
}

impl Default for ImportScanner {
    fn default() -> Self {
        Self::new()
    }
}

/// Collects the package names imported in a piece of Dart source.
///
/// # Example
///
/// ```
/// use pubscope::analysis::scan_imports_in_text;
///
/// let names = scan_imports_in_text("import 'package:http/http.dart' as http;");
/// assert!(names.contains("http"));
/// ```
pub fn scan_imports_in_text(source: &str) -> HashSet<String> {
    ImportScanner::new().scan_text(source)
}

/// Scans every `.dart` file under `root` for package imports.
pub fn find_used_packages(root: &Path) -> UsedPackages {
    ImportScanner::new().scan_dir(root)
}

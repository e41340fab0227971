//! Git dependency detection over raw `pubspec.yaml` text.
//!
//! A git dependency is written as a nested map, either across lines:
//!
//! ```yaml
//!   my_fork:
//!     git:
//!       url: https://github.com/example/my_fork.git
//! ```
//!
//! or with the `git:` key on the package line itself. Detection works on
//! the text layout instead of the parsed YAML, so both layouts are matched
//! with one pattern each and the results are merged.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

/// Package line followed by an indented `git:` line.
static MULTI_LINE_GIT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^[ \t]{2,}([A-Za-z0-9_]+):[ \t]*\r?\n[ \t]{4,}git:").expect("valid regex")
});

/// `git:` on the same line as the package name.
static INLINE_GIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^[ \t]{2,}([A-Za-z0-9_]+):[ \t]*git:").expect("valid regex"));

/// Finds git-sourced packages in `pubspec.yaml` text.
#[derive(Debug, Clone, Copy, Default)]
pub struct GitDetector;

impl GitDetector {
    /// Creates a new detector.
    pub fn new() -> Self {
        Self
    }

    /// Returns the names of every package declared with a git source.
    ///
    /// A package matching both layouts is reported once.
    pub fn detect(&self, pubspec_text: &str) -> HashSet<String> {
        [&*MULTI_LINE_GIT, &*INLINE_GIT]
            .into_iter()
            .flat_map(|re| re.captures_iter(pubspec_text))
            .filter_map(|caps| caps.get(1).map(|m| m.as_str().to_string()))
            .collect()
    }
}

/// Convenience wrapper around [`GitDetector::detect`].
///
/// # Example
///
/// ```
/// use pubscope::parser::git::find_git_packages;
///
/// let yaml = "dependencies:\n  my_fork:\n    git:\n      url: https://example.com/f.git\n";
/// assert!(find_git_packages(yaml).contains("my_fork"));
/// ```
pub fn find_git_packages(pubspec_text: &str) -> HashSet<String> {
    GitDetector::new().detect(pubspec_text)
}

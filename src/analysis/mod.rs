//! Source code analysis module for pubscope.
//!
//! This module scans Dart source trees to find which packages are
//! actually imported, so that declared dependencies can be checked
//! against real usage.
//!
//! # Features
//!
//! - Match `import 'package:<name>/...'` directives (single or double quotes)
//! - Walk the whole tree recursively, with no excluded directories
//! - Skip unreadable files and paths without aborting the scan
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use pubscope::analysis::find_used_packages;
//!
//! let used = find_used_packages(Path::new("lib"));
//! for name in used.sorted() {
//!     println!("{} is imported", name);
//! }
//! ```

pub mod imports;

// Re-export main types for convenience
pub use imports::{
    find_used_packages, scan_imports_in_text, ImportScanner, UsedPackages, DART_EXTENSION,
};

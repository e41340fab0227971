//! pubscope - dependency auditor for Dart/Flutter projects
//!
//! This crate reads a project's `pubspec.yaml` and `pubspec.lock`, scans
//! its Dart sources for `package:` imports, and reports which declared
//! dependencies are git-sourced, hosted, or possibly unused.

pub mod analysis;
pub mod audit;
pub mod export;
pub mod parser;
pub mod report;

pub use audit::{check_dir, check_project, AuditOptions};

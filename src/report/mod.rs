//! Reconciliation of declared dependencies against real usage.
//!
//! This module joins the parsed manifests, the git classification and the
//! import scan into a [`Report`]: one classified entry per locked direct
//! dependency, aggregate counts, and the list of packages that look unused.

mod reconcile;

pub use reconcile::{
    is_exempt, reconcile, Classification, PackageEntry, Report, Summary, EXEMPT_PACKAGES,
};

//! licensetool-core: Yocto license manifest handling
//!
//! This crate provides:
//! - Parsing of `license.manifest` files with structural validation
//! - Classification of package changes between two manifests
//! - The column set shared by list and change reports

pub mod columns;
pub mod diff;
pub mod error;
pub mod manifest;

pub use columns::{Column, CHANGES_COLUMNS, CHANGE_MARK, LIST_COLUMNS};
pub use diff::{diff, ChangeCategory, ChangeSummary, DiffRow, ManifestDiff};
pub use error::{Error, Result};
pub use manifest::{
    parse, read_manifest, IssueKind, ManifestIssue, PackageRecord, ParseStatus, ParsedManifest,
};

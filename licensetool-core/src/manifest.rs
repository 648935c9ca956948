//! Yocto license manifest parsing
//!
//! A manifest is a sequence of four-line blocks, each terminated by a
//! blank line:
//!
//! ```text
//! PACKAGE NAME: acl
//! PACKAGE VERSION: 2.2.53
//! RECIPE NAME: acl
//! LICENSE: GPLv2+
//!
//! ```
//!
//! Parsing never fails on malformed content. Problems are collected in
//! [`ParseStatus`] and the caller decides whether the records may be used.

use std::{
    fmt,
    path::{Path, PathBuf},
    sync::LazyLock,
};

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::{Error, Result};

static BLOCK_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        "PACKAGE NAME: (.+)\nPACKAGE VERSION: (.+)\nRECIPE NAME: (.+)\nLICENSE: (.+)\n\n",
    )
    .expect("manifest block pattern is valid")
});

/// One package entry of a manifest. All fields are non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageRecord {
    name: String,
    version: String,
    recipe: String,
    license: String,
}

impl PackageRecord {
    pub fn new(
        name: impl Into<String>,
        version: impl Into<String>,
        recipe: impl Into<String>,
        license: impl Into<String>,
    ) -> Result<Self> {
        let record = Self {
            name: name.into(),
            version: version.into(),
            recipe: recipe.into(),
            license: license.into(),
        };

        let empty = [
            ("name", &record.name),
            ("version", &record.version),
            ("recipe", &record.recipe),
            ("license", &record.license),
        ]
        .into_iter()
        .find(|(_, value)| value.is_empty());

        match empty {
            Some((field, _)) => Err(Error::InvalidRecord(format!(
                "empty {} for package '{}'",
                field, record.name
            ))),
            None => Ok(record),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn recipe(&self) -> &str {
        &self.recipe
    }

    pub fn license(&self) -> &str {
        &self.license
    }
}

/// Kind of structural problem found in a manifest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IssueKind {
    /// Bytes between two blocks (or before the first) that are not a block
    UnaccountedContent { start: usize, end: usize },
    /// Not a single block was found
    NoPackages,
    /// Bytes after the last block
    TrailingContent { start: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestIssue {
    #[serde(flatten)]
    pub kind: IssueKind,
    /// 1-based line where the problem starts
    pub line: usize,
}

impl fmt::Display for ManifestIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            IssueKind::UnaccountedContent { start, end } => write!(
                f,
                "invalid content at line {} (bytes {}..{})",
                self.line, start, end
            ),
            IssueKind::NoPackages => write!(f, "package count is zero"),
            IssueKind::TrailingContent { start } => write!(
                f,
                "invalid content at end of file, line {} (byte {})",
                self.line, start
            ),
        }
    }
}

/// Structural summary of one parse. `has_errors` is derived from the
/// issues when the status is built and cannot change afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParseStatus {
    line_count: usize,
    package_count: usize,
    has_errors: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    issues: Vec<ManifestIssue>,
}

impl ParseStatus {
    fn new(line_count: usize, package_count: usize, issues: Vec<ManifestIssue>) -> Self {
        Self {
            line_count,
            package_count,
            has_errors: !issues.is_empty(),
            issues,
        }
    }

    pub fn line_count(&self) -> usize {
        self.line_count
    }

    pub fn package_count(&self) -> usize {
        self.package_count
    }

    pub fn has_errors(&self) -> bool {
        self.has_errors
    }

    pub fn issues(&self) -> &[ManifestIssue] {
        &self.issues
    }
}

impl fmt::Display for ParseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "lines: {}, packages: {}, errors: {}",
            self.line_count, self.package_count, self.has_errors
        )
    }
}

/// Records of a manifest together with its structural status.
///
/// Records only leave through [`ParsedManifest::into_records`], which
/// refuses manifests with structural errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedManifest {
    records: Vec<PackageRecord>,
    status: ParseStatus,
}

impl ParsedManifest {
    pub fn status(&self) -> &ParseStatus {
        &self.status
    }

    pub fn is_valid(&self) -> bool {
        !self.status.has_errors
    }

    /// Release the records, refusing manifests with structural errors.
    pub fn into_records(self, path: &Path) -> Result<Vec<PackageRecord>> {
        if self.status.has_errors {
            return Err(Error::InvalidManifest {
                path: path.to_path_buf(),
                status: self.status,
            });
        }
        Ok(self.records)
    }
}

/// Parse manifest text.
///
/// Blocks are matched holistically over the whole text. A malformed block
/// is not partially recovered: it becomes unaccounted-for content and
/// scanning continues with the next well-formed block.
pub fn parse(text: &str) -> ParsedManifest {
    let mut records = Vec::new();
    let mut issues = Vec::new();
    let mut prev_end = 0;

    for caps in BLOCK_PATTERN.captures_iter(text) {
        let Some(block) = caps.get(0) else {
            continue;
        };

        if block.start() != prev_end {
            issues.push(ManifestIssue {
                kind: IssueKind::UnaccountedContent {
                    start: prev_end,
                    end: block.start(),
                },
                line: line_at(text, prev_end),
            });
        }
        prev_end = block.end();

        // The pattern only matches non-empty fields.
        let record = PackageRecord {
            name: caps[1].to_string(),
            version: caps[2].to_string(),
            recipe: caps[3].to_string(),
            license: caps[4].to_string(),
        };
        debug!(
            "Package {} {} (recipe {}, license {})",
            record.name, record.version, record.recipe, record.license
        );
        records.push(record);
    }

    if records.is_empty() {
        issues.push(ManifestIssue {
            kind: IssueKind::NoPackages,
            line: 1,
        });
    }

    if prev_end != text.len() {
        issues.push(ManifestIssue {
            kind: IssueKind::TrailingContent { start: prev_end },
            line: line_at(text, prev_end),
        });
    }

    for issue in &issues {
        error!("{} (got {} packages)", issue, records.len());
    }

    let status = ParseStatus::new(text.split('\n').count(), records.len(), issues);

    ParsedManifest { records, status }
}

/// Read a manifest file in full and parse it.
pub fn read_manifest(path: &Path) -> Result<ParsedManifest> {
    let text = std::fs::read_to_string(path).map_err(|source| Error::ReadManifest {
        path: PathBuf::from(path),
        source,
    })?;
    Ok(parse(&text))
}

fn line_at(text: &str, offset: usize) -> usize {
    text[..offset].matches('\n').count() + 1
}

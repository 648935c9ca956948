//! Change classification between two manifests
//!
//! Both record sets are joined on package name and every resulting row is
//! put into exactly one [`ChangeCategory`].

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{columns::CHANGE_MARK, Column, PackageRecord};

/// Change category of a package, in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeCategory {
    Added,
    Removed,
    VersionChanged,
    LicenseChanged,
    Unchanged,
}

impl ChangeCategory {
    /// Classify a joined pair. The first matching rule wins; a recipe
    /// difference alone never counts as a change.
    pub fn classify(previous: Option<&PackageRecord>, current: Option<&PackageRecord>) -> Self {
        match (previous, current) {
            (None, _) => ChangeCategory::Added,
            (Some(_), None) => ChangeCategory::Removed,
            (Some(prev), Some(curr)) if prev.version() != curr.version() => {
                ChangeCategory::VersionChanged
            }
            (Some(prev), Some(curr)) if prev.license() != curr.license() => {
                ChangeCategory::LicenseChanged
            }
            _ => ChangeCategory::Unchanged,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeCategory::Added => "added",
            ChangeCategory::Removed => "removed",
            ChangeCategory::VersionChanged => "version_changed",
            ChangeCategory::LicenseChanged => "license_changed",
            ChangeCategory::Unchanged => "unchanged",
        }
    }

    /// Marker column that flags this category in a change table
    pub fn column(&self) -> Option<Column> {
        match self {
            ChangeCategory::Added => Some(Column::PackageAdded),
            ChangeCategory::Removed => Some(Column::PackageRemoved),
            ChangeCategory::VersionChanged => Some(Column::VersionChange),
            ChangeCategory::LicenseChanged => Some(Column::LicenseChange),
            ChangeCategory::Unchanged => None,
        }
    }
}

impl std::fmt::Display for ChangeCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One package of the joined manifests
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiffRow {
    pub name: String,
    pub previous: Option<PackageRecord>,
    pub current: Option<PackageRecord>,
    pub category: ChangeCategory,
    pub changed: bool,
}

impl DiffRow {
    pub fn new(
        name: impl Into<String>,
        previous: Option<PackageRecord>,
        current: Option<PackageRecord>,
    ) -> Self {
        let category = ChangeCategory::classify(previous.as_ref(), current.as_ref());
        Self {
            name: name.into(),
            previous,
            current,
            category,
            changed: category != ChangeCategory::Unchanged,
        }
    }

    /// Cell value of this row for a change-table column. Absent sides,
    /// unset markers and list-only columns render as empty strings.
    pub fn cell(&self, column: Column) -> &str {
        let prev = self.previous.as_ref();
        let curr = self.current.as_ref();
        match column {
            Column::Package => self.name.as_str(),
            Column::PreviousVersion => prev.map_or("", |r| r.version()),
            Column::PreviousRecipe => prev.map_or("", |r| r.recipe()),
            Column::PreviousLicense => prev.map_or("", |r| r.license()),
            Column::CurrentVersion => curr.map_or("", |r| r.version()),
            Column::CurrentRecipe => curr.map_or("", |r| r.recipe()),
            Column::CurrentLicense => curr.map_or("", |r| r.license()),
            Column::Change => mark(self.changed),
            marker => mark(self.category.column() == Some(marker)),
        }
    }
}

fn mark(set: bool) -> &'static str {
    if set {
        CHANGE_MARK
    } else {
        ""
    }
}

/// Per-category change counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeSummary {
    pub added: usize,
    pub removed: usize,
    pub version_changed: usize,
    pub license_changed: usize,
}

impl ChangeSummary {
    pub fn record(&mut self, category: ChangeCategory) {
        match category {
            ChangeCategory::Added => self.added += 1,
            ChangeCategory::Removed => self.removed += 1,
            ChangeCategory::VersionChanged => self.version_changed += 1,
            ChangeCategory::LicenseChanged => self.license_changed += 1,
            ChangeCategory::Unchanged => {}
        }
    }

    pub fn total(&self) -> usize {
        self.added + self.removed + self.version_changed + self.license_changed
    }

    pub fn package_changes(&self) -> usize {
        self.added + self.removed
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ManifestDiff {
    pub rows: Vec<DiffRow>,
    pub summary: ChangeSummary,
}

/// Join two record sets on package name and classify every row.
///
/// Rows follow the previous manifest's order, then packages only present
/// in the current manifest in their order. Names are expected to be unique
/// per side; if one repeats, its last record is used and the row keeps the
/// position of the first occurrence.
pub fn diff(previous: &[PackageRecord], current: &[PackageRecord]) -> ManifestDiff {
    info!("Finding changes...");

    let mut joined: IndexMap<&str, (Option<&PackageRecord>, Option<&PackageRecord>)> =
        IndexMap::with_capacity(previous.len().max(current.len()));
    for record in previous {
        joined.entry(record.name()).or_default().0 = Some(record);
    }
    for record in current {
        joined.entry(record.name()).or_default().1 = Some(record);
    }

    let mut summary = ChangeSummary::default();
    let rows: Vec<DiffRow> = joined
        .into_iter()
        .map(|(name, (prev, curr))| {
            let row = DiffRow::new(name, prev.cloned(), curr.cloned());
            debug!("{}: {}", row.name, row.category);
            summary.record(row.category);
            row
        })
        .collect();

    ManifestDiff { rows, summary }
}

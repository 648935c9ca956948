//! Report column set
//!
//! Column headers shared by the package list and the change table.

use serde::{Deserialize, Serialize};

/// Value written into a change column when the row carries that change.
pub const CHANGE_MARK: &str = "y";

/// Columns of a package list, in output order.
pub const LIST_COLUMNS: &[Column] = &[
    Column::Package,
    Column::Version,
    Column::Recipe,
    Column::License,
];

/// Columns of a change table, in output order.
pub const CHANGES_COLUMNS: &[Column] = &[
    Column::Package,
    Column::PreviousVersion,
    Column::PreviousRecipe,
    Column::PreviousLicense,
    Column::CurrentVersion,
    Column::CurrentRecipe,
    Column::CurrentLicense,
    Column::Change,
    Column::VersionChange,
    Column::LicenseChange,
    Column::PackageAdded,
    Column::PackageRemoved,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Column {
    Package,
    Version,
    Recipe,
    License,
    PreviousVersion,
    PreviousRecipe,
    PreviousLicense,
    CurrentVersion,
    CurrentRecipe,
    CurrentLicense,
    Change,
    VersionChange,
    LicenseChange,
    PackageAdded,
    PackageRemoved,
}

impl Column {
    pub fn header(&self) -> &'static str {
        match self {
            Column::Package => "Package",
            Column::Version => "version",
            Column::Recipe => "recipe",
            Column::License => "license",
            Column::PreviousVersion => "Previous version",
            Column::PreviousRecipe => "Previous recipe",
            Column::PreviousLicense => "Previous license",
            Column::CurrentVersion => "Current version",
            Column::CurrentRecipe => "Current recipe",
            Column::CurrentLicense => "Current license",
            Column::Change => "Change",
            Column::VersionChange => "Version change",
            Column::LicenseChange => "License change",
            Column::PackageAdded => "Package added",
            Column::PackageRemoved => "Package removed",
        }
    }

    /// Whether the column holds a change marker rather than package data.
    pub fn is_marker(&self) -> bool {
        matches!(
            self,
            Column::Change
                | Column::VersionChange
                | Column::LicenseChange
                | Column::PackageAdded
                | Column::PackageRemoved
        )
    }

    pub fn headers(columns: &[Column]) -> Vec<&'static str> {
        columns.iter().map(Column::header).collect()
    }
}

impl std::fmt::Display for Column {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.header())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_headers() {
        assert_eq!(
            Column::headers(LIST_COLUMNS),
            vec!["Package", "version", "recipe", "license"]
        );
    }

    #[test]
    fn test_changes_headers_order() {
        let headers = Column::headers(CHANGES_COLUMNS);
        assert_eq!(headers.len(), 12);
        assert_eq!(headers[0], "Package");
        assert_eq!(headers[3], "Previous license");
        assert_eq!(headers[4], "Current version");
        assert_eq!(headers[7], "Change");
        assert_eq!(headers[11], "Package removed");
    }

    #[test]
    fn test_marker_columns() {
        let markers: Vec<_> = CHANGES_COLUMNS.iter().filter(|c| c.is_marker()).collect();
        assert_eq!(markers.len(), 5);
        assert!(!Column::Package.is_marker());
        assert!(LIST_COLUMNS.iter().all(|c| !c.is_marker()));
    }
}

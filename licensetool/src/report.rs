//! Report rendering for package lists and change tables

use std::io::Write;

use clap::ValueEnum;
use licensetool_core::{
    ChangeSummary, Column, DiffRow, ManifestDiff, PackageRecord, ParseStatus, CHANGES_COLUMNS,
    LIST_COLUMNS,
};
use serde::Serialize;

use crate::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    Csv,
    Json,
    Markdown,
}

impl ReportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ReportFormat::Csv => "csv",
            ReportFormat::Json => "json",
            ReportFormat::Markdown => "md",
        }
    }
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.extension())
    }
}

/// JSON body of a package list
#[derive(Debug, Serialize)]
struct ListReport<'a> {
    source: &'a str,
    status: &'a ParseStatus,
    packages: &'a [PackageRecord],
}

/// JSON body of a change table
#[derive(Debug, Serialize)]
struct ChangeReport<'a> {
    title: &'a str,
    rows: &'a [DiffRow],
    summary: SummaryCounts,
}

/// Change counts including the derived totals
#[derive(Debug, Serialize)]
struct SummaryCounts {
    #[serde(flatten)]
    counts: ChangeSummary,
    total: usize,
    package_changes: usize,
}

impl From<&ChangeSummary> for SummaryCounts {
    fn from(summary: &ChangeSummary) -> Self {
        Self {
            counts: *summary,
            total: summary.total(),
            package_changes: summary.package_changes(),
        }
    }
}

fn list_cells(record: &PackageRecord) -> [&str; 4] {
    [
        record.name(),
        record.version(),
        record.recipe(),
        record.license(),
    ]
}

fn change_cells(row: &DiffRow) -> Vec<&str> {
    CHANGES_COLUMNS.iter().map(|c| row.cell(*c)).collect()
}

/// Write a package list, one row per record in manifest order.
pub fn write_list<W: Write>(
    mut writer: W,
    format: ReportFormat,
    title: &str,
    records: &[PackageRecord],
    status: &ParseStatus,
) -> Result<()> {
    match format {
        ReportFormat::Csv => {
            let mut csv = csv::Writer::from_writer(writer);
            csv.write_record(Column::headers(LIST_COLUMNS))?;
            for record in records {
                csv.write_record(list_cells(record))?;
            }
            csv.flush()?;
        }
        ReportFormat::Json => {
            let report = ListReport {
                source: title,
                status,
                packages: records,
            };
            serde_json::to_writer_pretty(&mut writer, &report)?;
            writeln!(writer)?;
        }
        ReportFormat::Markdown => {
            let mut md = String::new();
            md.push_str(&format!("# License list: {}\n\n", title));
            md.push_str(&format!("Generated: {}\n\n", timestamp()));
            md.push_str(&format!(
                "{} packages, {} lines\n\n",
                status.package_count(),
                status.line_count()
            ));
            push_table(
                &mut md,
                LIST_COLUMNS,
                records.iter().map(|r| list_cells(r).to_vec()),
            );
            writer.write_all(md.as_bytes())?;
        }
    }
    Ok(())
}

/// Write a change table with previous and current values side by side.
pub fn write_changes<W: Write>(
    mut writer: W,
    format: ReportFormat,
    title: &str,
    diff: &ManifestDiff,
) -> Result<()> {
    match format {
        ReportFormat::Csv => {
            let mut csv = csv::Writer::from_writer(writer);
            csv.write_record(Column::headers(CHANGES_COLUMNS))?;
            for row in &diff.rows {
                csv.write_record(change_cells(row))?;
            }
            csv.flush()?;
        }
        ReportFormat::Json => {
            let report = ChangeReport {
                title,
                rows: &diff.rows,
                summary: SummaryCounts::from(&diff.summary),
            };
            serde_json::to_writer_pretty(&mut writer, &report)?;
            writeln!(writer)?;
        }
        ReportFormat::Markdown => {
            let summary = &diff.summary;
            let mut md = String::new();
            md.push_str(&format!("# License changes: {}\n\n", title));
            md.push_str(&format!("Generated: {}\n\n", timestamp()));

            md.push_str("## Summary\n\n");
            md.push_str("| Change | Count |\n");
            md.push_str("|--------|-------|\n");
            md.push_str(&format!("| Total changes | {} |\n", summary.total()));
            md.push_str(&format!("| Package changes | {} |\n", summary.package_changes()));
            md.push_str(&format!("| Added | {} |\n", summary.added));
            md.push_str(&format!("| Removed | {} |\n", summary.removed));
            md.push_str(&format!("| License changes | {} |\n", summary.license_changed));
            md.push_str(&format!("| Version changes | {} |\n\n", summary.version_changed));

            md.push_str("## Packages\n\n");
            push_table(&mut md, CHANGES_COLUMNS, diff.rows.iter().map(change_cells));
            writer.write_all(md.as_bytes())?;
        }
    }
    Ok(())
}

/// Console summary printed after a change run.
pub fn format_change_summary(summary: &ChangeSummary) -> String {
    let mut out = String::new();
    out.push_str(&format!("Total changes  : {}\n", summary.total()));
    out.push_str(&format!("Package changes: {}\n", summary.package_changes()));
    out.push_str(&format!("- Added        : {}\n", summary.added));
    out.push_str(&format!("- Removed      : {}\n", summary.removed));
    out.push_str(&format!("License changes: {}\n", summary.license_changed));
    out.push_str(&format!("Version changes: {}\n", summary.version_changed));
    out
}

fn push_table<'a, I>(md: &mut String, columns: &[Column], rows: I)
where
    I: Iterator<Item = Vec<&'a str>>,
{
    let headers = Column::headers(columns);
    md.push_str(&format!("| {} |\n", headers.join(" | ")));
    md.push_str(&format!("|{}\n", "---|".repeat(headers.len())));
    for row in rows {
        let escaped: Vec<String> = row.iter().map(|cell| cell.replace('|', "\\|")).collect();
        md.push_str(&format!("| {} |\n", escaped.join(" | ")));
    }
}

fn timestamp() -> String {
    chrono::Utc::now().format("%Y-%m-%d %H:%M UTC").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use licensetool_core::{diff, parse};
    use std::path::Path;

    fn records_of(text: &str) -> (Vec<PackageRecord>, ParseStatus) {
        let parsed = parse(text);
        let status = parsed.status().clone();
        (parsed.into_records(Path::new("license.manifest")).unwrap(), status)
    }

    const PREVIOUS: &str = "PACKAGE NAME: acl\nPACKAGE VERSION: 2.2.53\nRECIPE NAME: acl\nLICENSE: GPLv2+\n\n\
PACKAGE NAME: bash\nPACKAGE VERSION: 5.0\nRECIPE NAME: bash\nLICENSE: GPLv3+\n\n\
PACKAGE NAME: zlib\nPACKAGE VERSION: 1.2.11\nRECIPE NAME: zlib\nLICENSE: Zlib\n\n";

    const CURRENT: &str = "PACKAGE NAME: acl\nPACKAGE VERSION: 2.3.1\nRECIPE NAME: acl\nLICENSE: GPLv2+\n\n\
PACKAGE NAME: bash\nPACKAGE VERSION: 5.0\nRECIPE NAME: bash\nLICENSE: GPLv3+ | GPLv2\n\n\
PACKAGE NAME: curl\nPACKAGE VERSION: 7.69.1\nRECIPE NAME: curl\nLICENSE: MIT\n\n";

    fn render_changes(format: ReportFormat) -> String {
        let (previous, _) = records_of(PREVIOUS);
        let (current, _) = records_of(CURRENT);
        let mut out = Vec::new();
        write_changes(&mut out, format, "v1..v2", &diff(&previous, &current)).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_list_csv() {
        let (records, status) = records_of(PREVIOUS);
        let mut out = Vec::new();
        write_list(&mut out, ReportFormat::Csv, "v1", &records, &status).unwrap();

        let csv = String::from_utf8(out).unwrap();
        assert_eq!(
            csv,
            "Package,version,recipe,license\n\
acl,2.2.53,acl,GPLv2+\n\
bash,5.0,bash,GPLv3+\n\
zlib,1.2.11,zlib,Zlib\n"
        );
    }

    #[test]
    fn test_list_json() {
        let (records, status) = records_of(PREVIOUS);
        let mut out = Vec::new();
        write_list(&mut out, ReportFormat::Json, "v1", &records, &status).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["status"]["package_count"], 3);
        assert_eq!(value["status"]["has_errors"], false);
        assert_eq!(value["packages"][1]["name"], "bash");
        assert_eq!(value["packages"][2]["license"], "Zlib");
        assert_eq!(value["source"], "v1");
        assert!(value["status"].get("issues").is_none());
    }

    #[test]
    fn test_changes_csv() {
        let csv = render_changes(ReportFormat::Csv);
        let lines: Vec<_> = csv.lines().collect();
        assert_eq!(
            lines,
            vec![
                "Package,Previous version,Previous recipe,Previous license,\
Current version,Current recipe,Current license,Change,Version change,\
License change,Package added,Package removed",
                "acl,2.2.53,acl,GPLv2+,2.3.1,acl,GPLv2+,y,y,,,",
                "bash,5.0,bash,GPLv3+,5.0,bash,GPLv3+ | GPLv2,y,,y,,",
                "zlib,1.2.11,zlib,Zlib,,,,y,,,,y",
                "curl,,,,7.69.1,curl,MIT,y,,,y,",
            ]
        );
    }

    #[test]
    fn test_changes_json_summary() {
        let value: serde_json::Value =
            serde_json::from_str(&render_changes(ReportFormat::Json)).unwrap();
        let summary = &value["summary"];
        assert_eq!(summary["added"], 1);
        assert_eq!(summary["removed"], 1);
        assert_eq!(summary["version_changed"], 1);
        assert_eq!(summary["license_changed"], 1);
        assert_eq!(summary["total"], 4);
        assert_eq!(summary["package_changes"], 2);
        assert_eq!(value["rows"][3]["category"], "added");
        assert!(value["rows"][3]["previous"].is_null());
        assert_eq!(value["title"], "v1..v2");
        assert_eq!(value["rows"].as_array().unwrap().len(), 4);
    }

    #[test]
    fn test_changes_markdown() {
        let md = render_changes(ReportFormat::Markdown);
        assert!(md.starts_with("# License changes: v1..v2\n"));
        assert!(md.contains("| Total changes | 4 |"));
        assert!(md.contains("| bash | 5.0 | bash | GPLv3+ | 5.0 | bash | GPLv3+ \\| GPLv2 | y |  | y |  |  |"));
    }

    #[test]
    fn test_change_summary_text() {
        let summary = ChangeSummary {
            added: 2,
            removed: 1,
            version_changed: 3,
            license_changed: 0,
        };
        assert_eq!(
            format_change_summary(&summary),
            "Total changes  : 6\n\
Package changes: 3\n\
- Added        : 2\n\
- Removed      : 1\n\
License changes: 0\n\
Version changes: 3\n"
        );
    }
}

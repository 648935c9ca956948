//! `list` and `changes` command implementations

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use colored::Colorize;
use licensetool_core::{diff, read_manifest, ManifestDiff, PackageRecord, ParseStatus};
use tracing::{debug, info};

use crate::{
    output::{check_output, ensure_input, output_path},
    report::{format_change_summary, write_changes, write_list, ReportFormat},
    Result,
};

/// Options shared by both commands
#[derive(Debug, Clone, Copy)]
pub struct Settings {
    pub format: ReportFormat,
    pub force: bool,
}

/// Generate a package list from one manifest. Returns the written file.
pub fn cmd_list(input: &Path, output_base: &Path, settings: Settings) -> Result<PathBuf> {
    debug!("list: {:?} -> {:?}", input, output_base);

    ensure_input("input", input)?;
    let output = output_path(output_base, settings.format);
    check_output(&output, settings.force)?;

    let (records, status) = load_manifest(input)?;

    info!("Export {}: {:?}", settings.format, output);
    let mut writer = BufWriter::new(File::create(&output)?);
    write_list(
        &mut writer,
        settings.format,
        &input.display().to_string(),
        &records,
        &status,
    )?;
    writer.flush()?;

    Ok(output)
}

/// Generate a change list from a previous and a current manifest.
pub fn cmd_changes(
    previous: &Path,
    current: &Path,
    output_base: &Path,
    settings: Settings,
) -> Result<ManifestDiff> {
    debug!(
        "changes: {:?}, {:?} -> {:?}",
        previous, current, output_base
    );

    ensure_input("previous license", previous)?;
    ensure_input("current license", current)?;
    let output = output_path(output_base, settings.format);
    check_output(&output, settings.force)?;

    let (previous_records, _) = load_manifest(previous)?;
    let (current_records, _) = load_manifest(current)?;

    info!("Merging manifests...");
    let changes = diff(&previous_records, &current_records);

    info!("Export {}: {:?}", settings.format, output);
    let title = format!("{} -> {}", previous.display(), current.display());
    let mut writer = BufWriter::new(File::create(&output)?);
    write_changes(&mut writer, settings.format, &title, &changes)?;
    writer.flush()?;

    println!();
    print!("{}", format_change_summary(&changes.summary));

    Ok(changes)
}

/// Read and validate one manifest, printing its status line.
///
/// Structural errors abort before anything is written.
fn load_manifest(path: &Path) -> Result<(Vec<PackageRecord>, ParseStatus)> {
    let parsed = read_manifest(path)?;
    let status = parsed.status().clone();

    if status.has_errors() {
        eprintln!(
            "{} handling of {:?} failed ({})",
            "ERROR -".red().bold(),
            path,
            status
        );
        for issue in status.issues() {
            eprintln!("  {}", issue);
        }
    } else {
        println!("{} {} {}", "✔".bright_green().bold(), path.display(), status);
    }

    let records = parsed.into_records(path)?;
    Ok((records, status))
}

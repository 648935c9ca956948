//! Input checks and output file policy

use std::{
    ffi::OsString,
    path::{Path, PathBuf},
};

use colored::Colorize;
use tracing::debug;

use crate::{report::ReportFormat, Error, Result};

/// Fail unless `path` is an existing regular file.
pub fn ensure_input(role: &'static str, path: &Path) -> Result<()> {
    if !path.is_file() {
        return Err(Error::InputNotFound {
            role,
            path: path.to_path_buf(),
        });
    }
    Ok(())
}

/// `<base>.<ext>`; the extension is appended, never substituted.
pub fn output_path(base: &Path, format: ReportFormat) -> PathBuf {
    let mut name = OsString::from(base.as_os_str());
    name.push(".");
    name.push(format.extension());
    PathBuf::from(name)
}

/// Refuse to clobber an existing output unless `force` is set.
pub fn check_output(path: &Path, force: bool) -> Result<()> {
    if !path.exists() {
        debug!("Output {:?} is free", path);
        return Ok(());
    }
    if !force {
        return Err(Error::OutputExists(path.to_path_buf()));
    }
    eprintln!(
        "{} output file: {:?} already exists. Will overwrite.",
        "Warning -".yellow().bold(),
        path
    );
    Ok(())
}

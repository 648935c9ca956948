//! licensetool: Yocto license manifest reports
//!
//! Turns license manifests into package lists and change tables:
//! - `list`: one row per package of a manifest
//! - `changes`: previous/current values side by side with change markers
//!
//! Output is written as CSV, JSON or Markdown.

pub mod cli;
pub mod commands;
pub mod error;
pub mod logging;
pub mod output;
pub mod report;

pub use error::{Error, Result};
pub use report::ReportFormat;

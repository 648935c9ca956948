//! Command line definition

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::report::ReportFormat;

#[derive(Parser, Debug)]
#[command(name = "licensetool")]
#[command(about = "Yocto license manifest tool", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Overwrite existing output files
    #[arg(long, global = true)]
    pub force: bool,

    /// Verbose diagnostics
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Extra diagnostic output
    #[arg(long, global = true)]
    pub debug: bool,

    /// Log level (error, warn, info, debug, trace), overrides --verbose/--debug
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Output format
    #[arg(
        short,
        long,
        global = true,
        value_enum,
        default_value = "csv",
        env = "LICENSETOOL_FORMAT"
    )]
    pub format: ReportFormat,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a package list from a Yocto license manifest
    List {
        /// Yocto license manifest file (input)
        inputfile: PathBuf,

        /// Output name base, the format extension is appended (<listfile>.csv)
        listfile: PathBuf,
    },

    /// Create a change list from two Yocto license manifests
    Changes {
        /// Previous Yocto license manifest file
        previous: PathBuf,

        /// Current Yocto license manifest file
        current: PathBuf,

        /// Output name base, the format extension is appended (<changefile>.csv)
        changefile: PathBuf,
    },
}

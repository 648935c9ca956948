use std::path::PathBuf;

use thiserror::Error;

/// ENOENT, used for missing inputs and refused overwrites
pub const EXIT_NOT_FOUND: i32 = 2;
/// EPROTO, used for manifests with structural errors
pub const EXIT_INVALID_MANIFEST: i32 = 71;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Manifest(#[from] licensetool_core::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{role} file: {path:?} does not exist")]
    InputNotFound { role: &'static str, path: PathBuf },

    #[error("output file: {0:?} already exists")]
    OutputExists(PathBuf),
}

impl Error {
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::InputNotFound { .. } | Error::OutputExists(_) => EXIT_NOT_FOUND,
            Error::Manifest(licensetool_core::Error::InvalidManifest { .. }) => {
                EXIT_INVALID_MANIFEST
            }
            _ => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

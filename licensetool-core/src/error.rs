use std::path::PathBuf;

use thiserror::Error;

use crate::manifest::ParseStatus;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to read manifest {path:?}: {source}")]
    ReadManifest {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid package record: {0}")]
    InvalidRecord(String),

    #[error("Invalid license manifest {path:?} ({status})")]
    InvalidManifest { path: PathBuf, status: ParseStatus },
}

pub type Result<T> = std::result::Result<T, Error>;

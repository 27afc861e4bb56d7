use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to create temporary workspace: {0}")]
    Workspace(#[source] io::Error),

    #[error("cannot derive a filename from download URL '{0}'")]
    InvalidUrl(String),

    #[error("{0}")]
    Download(#[source] binstate_fetch::Error),

    #[error("failed to extract {asset}: {source}")]
    Extraction {
        asset:  String,
        source: binstate_archive::Error,
    },

    #[error("expected binary not found at {0}")]
    BinaryNotFound(PathBuf),

    #[error("failed to copy binary to {path}: {source}")]
    Place { path: PathBuf, source: io::Error },

    #[error("failed to set permissions on {path}: {source}")]
    Permissions { path: PathBuf, source: io::Error },

    #[error("failed to remove {path}: {source}")]
    Remove { path: PathBuf, source: io::Error },
}

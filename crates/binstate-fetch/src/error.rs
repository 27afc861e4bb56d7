//! Error types for binstate-fetch.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(String),

    #[error("failed to start async runtime: {0}")]
    Runtime(#[source] io::Error),

    #[error("request to {url} failed: {message}")]
    Network { url: String, message: String },

    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("failed to write {path}: {source}")]
    Write { path: PathBuf, source: io::Error },
}

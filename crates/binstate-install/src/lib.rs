//! Placement of one executable at `<dir>/<name>`.
//!
//! An install downloads the asset into a private temporary directory,
//! unpacks it when the filename says it is an archive, copies the binary
//! over the destination and marks it executable. The temporary directory is
//! removed on every exit path.

pub use error::{Error, Result};
pub use installer::{Installer, asset_filename};

mod error;
mod installer;

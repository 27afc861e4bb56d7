//! Archive extraction for downloaded release assets.
//!
//! # Architecture
//!
//! - `format.rs` - Archive kind from the asset filename, tar codec from the stream
//! - `sanitize.rs` - Path sanitization (zip-slip prevention)
//! - `extract/` - Per-format implementations

pub use error::{Error, Result};
pub use extract::{Extracted, extract};
pub use format::{ArchiveKind, TarCompress};

mod error;
pub mod extract;
pub mod format;
mod sanitize;

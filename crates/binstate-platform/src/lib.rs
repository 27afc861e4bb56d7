//! Host platform detection and subprocess capture.
//!
//! - `os.rs` - operating system name as used in release asset names
//! - `arch.rs` - machine architecture, with `aarch64` folded into `arm64`
//! - `platform.rs` - the normalized `(os, arch)` pair handed to asset selection
//! - `command.rs` - argv-style process invocation with captured output

pub use error::{Error, Result};
pub use platform::Platform;

pub mod arch;
pub mod command;
mod error;
pub mod os;
pub mod platform;

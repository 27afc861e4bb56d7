//! Release metadata sources.
//!
//! A [`ReleaseSource`] knows where a product's latest release is described
//! and how to pick the one asset matching a platform. [`CachedSource`] wraps
//! a source for the duration of one run so the metadata is fetched at most
//! once.
//!
//! - [`GithubSource`] - repository-hosted releases keyed by `owner/repo`
//! - [`HashicorpSource`] - vendor catalog keyed by product name

pub use error::{Error, Result};
pub use github::{GithubAsset, GithubRelease, GithubSource};
pub use hashicorp::{Build, HashicorpRelease, HashicorpSource};
pub use release::{CachedSource, ReleaseSource};

mod error;
pub mod github;
pub mod hashicorp;
mod release;

/// Append a trailing slash so endpoint templates can be joined by concatenation.
pub(crate) fn with_trailing_slash(base: impl Into<String>) -> String {
    let mut base = base.into();
    if !base.ends_with('/') {
        base.push('/');
    }
    base
}

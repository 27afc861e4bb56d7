//! Converge one release binary on a host to a desired state.
//!
//! A run compares what is on disk at `<install_dir>/<name>` with the
//! requested [`DesiredState`] and performs at most one mutation to close the
//! gap. Every run ends in an [`InstallOutcome`]; errors are folded into it
//! rather than returned.
//!
//! # Architecture
//!
//! - [`PackageSpec`] - validated per-run descriptor of the managed binary
//! - [`VersionOracle`] - runs the installed binary and matches its output
//! - [`Reconciler`] - the present/latest/absent state machine
//! - [`Settings`] - layered network and platform configuration
//!
//! Release metadata comes from `binstate-source`, downloads and placement
//! from `binstate-install`.

pub use binstate_source::{GithubSource, HashicorpSource, ReleaseSource};
pub use config::Settings;
pub use error::{Error, Result};
pub use oracle::{VersionOracle, VersionStatus, output_contains};
pub use outcome::InstallOutcome;
pub use package::{DesiredState, PackageSpec};
pub use reconcile::Reconciler;

pub mod config;
mod error;
mod oracle;
mod outcome;
mod package;
mod reconcile;

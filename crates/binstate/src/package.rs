use std::fmt;
use std::path::{Path, PathBuf};

use clap::ValueEnum;

use crate::error::{Error, Result};

/// Target condition of the managed binary for one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, ValueEnum)]
pub enum DesiredState {
    /// Some version is installed.
    #[default]
    Present,
    /// The upstream latest version is installed.
    Latest,
    /// Nothing is installed.
    Absent,
}

impl DesiredState {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Present => "present",
            Self::Latest => "latest",
            Self::Absent => "absent",
        }
    }
}

impl fmt::Display for DesiredState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

/// Immutable description of the binary managed by a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageSpec {
    name:         String,
    install_dir:  PathBuf,
    version_flag: Vec<String>,
}

impl PackageSpec {
    /// Validate and build a spec.
    ///
    /// `name` is joined onto `install_dir` and used as the file name inside
    /// archives, so it must be a single path component. `version_flag` is
    /// split on whitespace into argv tokens.
    pub fn new(name: impl Into<String>, install_dir: impl Into<PathBuf>, version_flag: &str) -> Result<Self> {
        let name = name.into();
        let install_dir = install_dir.into();

        if name.is_empty() {
            return Err(Error::EmptyName);
        }
        if name.chars().any(std::path::is_separator) || name == "." || name == ".." || name.contains('\0') {
            return Err(Error::InvalidName(name));
        }
        if !install_dir.is_absolute() {
            return Err(Error::RelativeInstallDir(install_dir));
        }

        Ok(Self {
            name,
            install_dir,
            version_flag: version_flag.split_whitespace().map(str::to_string).collect(),
        })
    }

    pub fn name(&self) -> &str { &self.name }

    pub fn install_dir(&self) -> &Path { &self.install_dir }

    pub fn version_flag(&self) -> &[String] { &self.version_flag }

    pub fn binary_path(&self) -> PathBuf { self.install_dir.join(&self.name) }
}

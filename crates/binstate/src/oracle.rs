use std::path::{Path, PathBuf};

use binstate_platform::command::Command;

use crate::error::{Error, Result};

/// Result of comparing the installed binary against the latest release.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionStatus {
    Latest,
    Outdated,
    /// Either the latest version or the installed one could not be determined.
    Unknown,
}

/// Reads the installed binary's self-reported version.
///
/// The binary is spawned at most once; its standard output is kept for the
/// rest of the run.
#[derive(Debug)]
pub struct VersionOracle {
    binary: PathBuf,
    flag:   Vec<String>,
    output: Option<Vec<u8>>,
}

impl VersionOracle {
    pub fn new(binary: impl Into<PathBuf>, flag: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            binary: binary.into(),
            flag:   flag.into_iter().map(Into::into).collect(),
            output: None,
        }
    }

    pub fn binary(&self) -> &Path { &self.binary }

    /// Standard output of `<binary> <flag...>`.
    ///
    /// A non-zero exit is reported as [`Error::VersionCheckFailed`] with the
    /// captured standard error.
    pub fn current_output(&mut self) -> Result<&[u8]> {
        let stdout = match self.output.take() {
            Some(stdout) => stdout,
            None => self.probe()?,
        };
        Ok(self.output.insert(stdout).as_slice())
    }

    /// Whether `latest` occurs anywhere in the version output.
    pub fn is_latest(&mut self, latest: &str) -> Result<bool> {
        let output = self.current_output()?;
        Ok(output_contains(output, latest))
    }

    fn probe(&self) -> Result<Vec<u8>> {
        let output = Command::new(&self.binary).args(&self.flag).capture()?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim_end().to_string();
            tracing::warn!(binary = %self.binary.display(), status = %output.status, "version check failed");
            return Err(Error::VersionCheckFailed { stderr });
        }

        tracing::debug!(
            binary = %self.binary.display(),
            output = %String::from_utf8_lossy(&output.stdout).trim_end(),
            "version probed"
        );
        Ok(output.stdout)
    }
}

/// Substring match of `version` in the lossily decoded `output`.
pub fn output_contains(output: &[u8], version: &str) -> bool { String::from_utf8_lossy(output).contains(version) }

use std::ffi::OsStr;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command as StdCommand, Output, Stdio};

use crate::error::{Error, Result};

/// A process invocation by path, without a shell in between.
#[derive(Debug)]
pub struct Command {
    inner:   StdCommand,
    program: PathBuf,
}

impl Command {
    pub fn new(program: impl AsRef<Path>) -> Self {
        let program = program.as_ref().to_path_buf();
        Self {
            inner: StdCommand::new(&program),
            program,
        }
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.inner.args(args);
        self
    }

    /// Run to completion with stdin closed and both output streams captured.
    ///
    /// A non-zero exit status is not an error here; callers inspect
    /// `Output::status` themselves.
    pub fn capture(mut self) -> Result<Output> {
        tracing::debug!(program = %self.program.display(), "spawning");
        self.inner
            .stdin(Stdio::null())
            .output()
            .map_err(|e| self.spawn_error(e))
    }

    fn spawn_error(&self, source: io::Error) -> Error {
        let cmd = self.program.display().to_string();
        if source.kind() == io::ErrorKind::NotFound {
            Error::CommandNotFound { cmd }
        } else {
            Error::CommandFailed { cmd, source }
        }
    }
}

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("package name must not be empty")]
    EmptyName,

    #[error("package name '{0}' must be a plain file name")]
    InvalidName(String),

    #[error("install directory '{}' must be an absolute path", .0.display())]
    RelativeInstallDir(PathBuf),

    /// The installed binary exited non-zero; carries its standard error.
    #[error("{stderr}")]
    VersionCheckFailed { stderr: String },

    #[error(transparent)]
    Command(#[from] binstate_platform::Error),

    #[error(transparent)]
    Source(#[from] binstate_source::Error),

    #[error(transparent)]
    Install(#[from] binstate_install::Error),

    #[error("config file not found: {}", .0.display())]
    ConfigNotFound(PathBuf),

    #[error(transparent)]
    Config(#[from] Box<figment::Error>),
}

impl From<figment::Error> for Error {
    fn from(e: figment::Error) -> Self { Self::Config(Box::new(e)) }
}

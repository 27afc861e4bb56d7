use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Failures while resolving release metadata.
///
/// Errors carry rendered messages so a failed lookup can be cached and
/// replayed for the rest of a run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("{0}")]
    Network(String),

    #[error("malformed release metadata from {url}: {message}")]
    Parse { url: String, message: String },

    #[error("There are no installation candidates for {platform}, aborting...")]
    NoInstallationCandidate { platform: String },
}

impl From<binstate_fetch::Error> for Error {
    fn from(e: binstate_fetch::Error) -> Self { Self::Network(e.to_string()) }
}

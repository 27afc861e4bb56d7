use std::path::Path;

use crate::error::Result;

/// A request header as `(name, value)`.
pub type Header = (String, String);

/// Blocking HTTP client abstraction.
///
/// This trait provides the minimal interface the installer needs: read a
/// small document into memory, or stream a large body to disk. Both treat a
/// non-2xx status as an error.
///
/// # Implementations
///
/// - [`ReqwestClient`](crate::ReqwestClient): production implementation using `reqwest`
/// - [`ScriptedClient`](crate::mock::ScriptedClient): canned responses for tests
pub trait HttpClient: Send + Sync {
    /// GET `url` and return the full response body.
    fn get(&self, url: &str, headers: &[Header]) -> Result<Vec<u8>>;

    /// GET `url` and write the body to `destination`, returning the byte count.
    fn download(&self, url: &str, destination: &Path) -> Result<u64>;
}

impl<C: HttpClient + ?Sized> HttpClient for &C {
    fn get(&self, url: &str, headers: &[Header]) -> Result<Vec<u8>> { (**self).get(url, headers) }

    fn download(&self, url: &str, destination: &Path) -> Result<u64> { (**self).download(url, destination) }
}

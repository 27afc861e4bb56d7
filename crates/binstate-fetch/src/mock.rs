//! Scripted in-memory client for tests.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Mutex;

use crate::error::{Error, Result};
use crate::http::{Header, HttpClient};

#[derive(Clone, Debug)]
enum Reply {
    Body(Vec<u8>),
    Status(u16),
    Network(String),
}

/// A request as seen by [`ScriptedClient`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Request {
    pub url:     String,
    pub headers: Vec<Header>,
}

/// Replies from a fixed table keyed by URL; unknown URLs answer 404.
#[derive(Debug, Default)]
pub struct ScriptedClient {
    replies:  HashMap<String, Reply>,
    requests: Mutex<Vec<Request>>,
}

impl ScriptedClient {
    pub fn new() -> Self { Self::default() }

    #[must_use]
    pub fn body(mut self, url: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        self.replies.insert(url.into(), Reply::Body(body.into()));
        self
    }

    #[must_use]
    pub fn status(mut self, url: impl Into<String>, status: u16) -> Self {
        self.replies.insert(url.into(), Reply::Status(status));
        self
    }

    #[must_use]
    pub fn network_error(mut self, url: impl Into<String>, message: impl Into<String>) -> Self {
        self.replies.insert(url.into(), Reply::Network(message.into()));
        self
    }

    /// Every request made so far, in order.
    pub fn requests(&self) -> Vec<Request> { self.lock().clone() }

    /// Number of requests made to `url`.
    pub fn hits(&self, url: &str) -> usize { self.lock().iter().filter(|r| r.url == url).count() }

    pub fn total_hits(&self) -> usize { self.lock().len() }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Request>> {
        self.requests.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn reply(&self, url: &str, headers: &[Header]) -> Result<Vec<u8>> {
        self.lock().push(Request {
            url:     url.to_string(),
            headers: headers.to_vec(),
        });

        match self.replies.get(url) {
            Some(Reply::Body(body)) => Ok(body.clone()),
            Some(Reply::Status(status)) => Err(Error::Status {
                url:    url.to_string(),
                status: *status,
            }),
            Some(Reply::Network(message)) => Err(Error::Network {
                url:     url.to_string(),
                message: message.clone(),
            }),
            None => Err(Error::Status {
                url:    url.to_string(),
                status: 404,
            }),
        }
    }
}

impl HttpClient for ScriptedClient {
    fn get(&self, url: &str, headers: &[Header]) -> Result<Vec<u8>> { self.reply(url, headers) }

    fn download(&self, url: &str, destination: &Path) -> Result<u64> {
        let body = self.reply(url, &[])?;
        std::fs::write(destination, &body).map_err(|source| Error::Write {
            path: destination.to_path_buf(),
            source,
        })?;
        Ok(body.len() as u64)
    }
}

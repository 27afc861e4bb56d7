use std::fmt;

use binstate_fetch::{Header, HttpClient};
use binstate_platform::Platform;
use serde::de::DeserializeOwned;

use crate::error::{Error, Result};

/// An upstream provider of "latest release" metadata.
pub trait ReleaseSource {
    /// Parsed metadata document.
    type Release: DeserializeOwned + fmt::Debug;

    /// Short label for logs, e.g. `github:hashicorp/terraform`.
    fn describe(&self) -> String;

    /// Endpoint describing the latest release.
    fn latest_url(&self) -> String;

    /// Extra request headers for the metadata endpoint.
    fn headers(&self) -> Vec<Header> { Vec::new() }

    /// One GET of [`latest_url`](Self::latest_url), parsed as JSON.
    fn fetch_latest(&self, client: &dyn HttpClient) -> Result<Self::Release> {
        let url = self.latest_url();
        let body = client.get(&url, &self.headers())?;
        serde_json::from_slice(&body).map_err(|e| Error::Parse {
            url,
            message: e.to_string(),
        })
    }

    /// Version identifier of `release`.
    fn latest_version(&self, release: &Self::Release) -> Result<String>;

    /// Download URL of the asset matching `platform`.
    fn select_download_url(&self, release: &Self::Release, platform: &Platform) -> Result<String>;
}

/// A source plus its run-scoped metadata.
///
/// The first lookup is stored, success or failure, and replayed for every
/// later call; nothing is refetched within a run.
pub struct CachedSource<S: ReleaseSource> {
    source: S,
    latest: Option<Result<S::Release>>,
}

impl<S: ReleaseSource> CachedSource<S> {
    pub fn new(source: S) -> Self { Self { source, latest: None } }

    pub fn source(&self) -> &S { &self.source }

    /// Whether a lookup has already happened in this run.
    pub fn is_fetched(&self) -> bool { self.latest.is_some() }

    pub fn fetch_latest(&mut self, client: &dyn HttpClient) -> Result<&S::Release> {
        ensure(&self.source, &mut self.latest, client)
    }

    pub fn latest_version(&mut self, client: &dyn HttpClient) -> Result<String> {
        let release = ensure(&self.source, &mut self.latest, client)?;
        self.source.latest_version(release)
    }

    pub fn download_url(&mut self, client: &dyn HttpClient, platform: &Platform) -> Result<String> {
        let release = ensure(&self.source, &mut self.latest, client)?;
        let url = self.source.select_download_url(release, platform)?;
        tracing::debug!(source = %self.source.describe(), %platform, url, "selected asset");
        Ok(url)
    }
}

fn ensure<'a, S: ReleaseSource>(
    source: &S,
    latest: &'a mut Option<Result<S::Release>>,
    client: &dyn HttpClient,
) -> Result<&'a S::Release> {
    let latest = latest.get_or_insert_with(|| {
        tracing::debug!(source = %source.describe(), url = %source.latest_url(), "fetching latest release");
        let fetched = source.fetch_latest(client);
        if let Err(e) = &fetched {
            tracing::warn!(source = %source.describe(), error = %e, "release lookup failed");
        }
        fetched
    });
    latest.as_ref().map_err(Clone::clone)
}
